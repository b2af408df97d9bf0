//! HMAC-SHA256 request signer for the Paytrail REST API.
//!
//! # Signing string
//!
//! ```text
//! checkout-account:<account>\n
//! checkout-algorithm:sha256\n
//! checkout-method:<METHOD>\n
//! checkout-nonce:<uuid>\n
//! checkout-timestamp:<iso-8601>\n
//! <raw body>
//! ```
//!
//! Headers are sorted by key before joining; caller-supplied headers are
//! merged into the sorted set. The digest is sent as lowercase hex in the
//! `signature` header.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::ports::{Clock, NonceSource};

use super::errors::SigningError;
use super::headers::{
    SignatureHeaders, ACCOUNT_HEADER, ALGORITHM_HEADER, METHOD_HEADER, NONCE_HEADER,
    SHA256_ALGORITHM, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};

type HmacSha256 = Hmac<Sha256>;

/// Headers and signature to attach to one outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// The full signed header set.
    pub headers: SignatureHeaders,
    /// Lowercase hex HMAC-SHA256 digest.
    pub signature: String,
}

impl SignedRequest {
    /// Flattens into header pairs, including the `signature` header.
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        pairs.push((SIGNATURE_HEADER.to_string(), self.signature.clone()));
        pairs
    }
}

/// Builds the canonical string the HMAC is computed over.
///
/// Entries are joined as `key:value` with `\n`, followed by a `\n` and the
/// raw body with no trailing separator.
pub fn signing_string(headers: &SignatureHeaders, body: &str) -> String {
    let joined = headers
        .iter()
        .map(|(key, value)| format!("{}:{}", key, value))
        .collect::<Vec<_>>()
        .join("\n");

    let mut out = String::with_capacity(joined.len() + 1 + body.len());
    out.push_str(&joined);
    out.push('\n');
    out.push_str(body);
    out
}

/// Computes the lowercase hex HMAC-SHA256 of the signing string.
pub fn compute_signature(
    secret: &[u8],
    headers: &SignatureHeaders,
    body: &str,
) -> Result<String, SigningError> {
    Ok(hex::encode(digest(secret, headers, body)?))
}

fn digest(secret: &[u8], headers: &SignatureHeaders, body: &str) -> Result<Vec<u8>, SigningError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| SigningError::InvalidKey(e.to_string()))?;
    mac.update(signing_string(headers, body).as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Formats a timestamp the way the API expects: UTC, millisecond precision, `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Signs outbound requests with the merchant's account id and secret key.
///
/// Every call to [`RequestSigner::sign`] draws a fresh timestamp and nonce,
/// so two signatures over identical inputs never match.
pub struct RequestSigner {
    account: String,
    secret: SecretString,
    clock: Arc<dyn Clock>,
    nonces: Arc<dyn NonceSource>,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("account", &self.account)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl RequestSigner {
    /// Creates a signer.
    ///
    /// # Errors
    ///
    /// `MissingAccount` or `MissingSecret` when either credential is blank.
    /// Callers treat both as fatal configuration errors.
    pub fn new(
        account: impl Into<String>,
        secret: impl Into<String>,
        clock: Arc<dyn Clock>,
        nonces: Arc<dyn NonceSource>,
    ) -> Result<Self, SigningError> {
        let account = account.into();
        let secret = secret.into();

        if account.trim().is_empty() {
            return Err(SigningError::MissingAccount);
        }
        if secret.is_empty() {
            return Err(SigningError::MissingSecret);
        }

        Ok(Self {
            account,
            secret: SecretString::new(secret),
            clock,
            nonces,
        })
    }

    /// The merchant account id placed in `checkout-account`.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Signs one request.
    ///
    /// `uri` is not part of the signed string; it is only recorded in the
    /// trace span. `extra_headers` may add keys but cannot replace the
    /// required ones.
    pub fn sign(
        &self,
        method: &str,
        uri: &str,
        extra_headers: &SignatureHeaders,
        body: &str,
    ) -> Result<SignedRequest, SigningError> {
        let timestamp = format_timestamp(self.clock.now());
        let nonce = self.nonces.next_nonce();

        let mut headers = SignatureHeaders::new();
        headers.insert(ACCOUNT_HEADER, self.account.as_str());
        headers.insert(ALGORITHM_HEADER, SHA256_ALGORITHM);
        headers.insert(METHOD_HEADER, method);
        headers.insert(NONCE_HEADER, nonce.as_str());
        headers.insert(TIMESTAMP_HEADER, timestamp.as_str());

        for (key, value) in extra_headers.iter() {
            if headers.contains_key(key) {
                tracing::warn!(header = key, "Ignoring caller header that shadows a required signature header");
                continue;
            }
            headers.insert(key, value);
        }

        let signature = compute_signature(self.secret.expose_secret().as_bytes(), &headers, body)?;

        tracing::debug!(method, uri, nonce = %nonce, timestamp = %timestamp, "Signed outbound request");

        Ok(SignedRequest { headers, signature })
    }

    /// Verifies a signature received from the API.
    ///
    /// Only the `checkout-*` entries of `received` are covered. The
    /// comparison is constant-time.
    pub fn verify(
        &self,
        received: &SignatureHeaders,
        body: &str,
        signature: &str,
    ) -> Result<(), SigningError> {
        let signed = received.checkout_entries();

        if let Some(algorithm) = signed.get(ALGORITHM_HEADER) {
            if algorithm != SHA256_ALGORITHM {
                return Err(SigningError::UnsupportedAlgorithm(algorithm.to_string()));
            }
        }

        let provided = hex::decode(signature.trim()).map_err(|_| SigningError::MalformedSignature)?;
        let expected = digest(self.secret.expose_secret().as_bytes(), &signed, body)?;

        if expected.len() != provided.len() || expected.ct_eq(&provided).unwrap_u8() != 1 {
            tracing::warn!(account = %self.account, "Received signature does not match");
            return Err(SigningError::SignatureMismatch);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ACCOUNT: &str = "375917";
    const SECRET: &str = "SAIPPUAKAUPPIAS";

    struct StaticClock(DateTime<Utc>);

    impl Clock for StaticClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    struct TickingClock(AtomicUsize);

    impl Clock for TickingClock {
        fn now(&self) -> DateTime<Utc> {
            let tick = self.0.fetch_add(1, Ordering::SeqCst) as i64;
            Utc.timestamp_millis_opt(1_700_000_000_000 + tick).unwrap()
        }
    }

    struct CountingNonces(AtomicUsize);

    impl NonceSource for CountingNonces {
        fn next_nonce(&self) -> String {
            format!("nonce-{}", self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 7, 6, 10, 1, 31).unwrap() + chrono::Duration::milliseconds(904)
    }

    fn signer() -> RequestSigner {
        RequestSigner::new(
            ACCOUNT,
            SECRET,
            Arc::new(StaticClock(fixed_time())),
            Arc::new(CountingNonces(AtomicUsize::new(0))),
        )
        .unwrap()
    }

    fn reference_hmac(input: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(input.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    // ══════════════════════════════════════════════════════════════
    // Construction
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn rejects_missing_secret() {
        let result = RequestSigner::new(
            ACCOUNT,
            "",
            Arc::new(StaticClock(fixed_time())),
            Arc::new(CountingNonces(AtomicUsize::new(0))),
        );
        assert_eq!(result.unwrap_err(), SigningError::MissingSecret);
    }

    #[test]
    fn rejects_missing_account() {
        let result = RequestSigner::new(
            "  ",
            SECRET,
            Arc::new(StaticClock(fixed_time())),
            Arc::new(CountingNonces(AtomicUsize::new(0))),
        );
        assert_eq!(result.unwrap_err(), SigningError::MissingAccount);
    }

    #[test]
    fn debug_output_redacts_secret() {
        let rendered = format!("{:?}", signer());
        assert!(!rendered.contains(SECRET));
        assert!(rendered.contains(ACCOUNT));
    }

    // ══════════════════════════════════════════════════════════════
    // Signing string
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn signing_string_sorts_and_appends_body() {
        let headers: SignatureHeaders = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(signing_string(&headers, "{}"), "a:1\nb:2\n{}");
    }

    #[test]
    fn signing_string_with_empty_body_ends_with_newline() {
        let headers: SignatureHeaders = [("a", "1")].into_iter().collect();
        assert_eq!(signing_string(&headers, ""), "a:1\n");
    }

    #[test]
    fn timestamp_matches_iso_millis_format() {
        assert_eq!(format_timestamp(fixed_time()), "2018-07-06T10:01:31.904Z");
    }

    // ══════════════════════════════════════════════════════════════
    // Signing
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn sign_matches_independent_reconstruction() {
        let signed = signer()
            .sign("POST", "/payments", &SignatureHeaders::new(), r#"{"a":1}"#)
            .unwrap();

        let expected_input = format!(
            "checkout-account:375917\ncheckout-algorithm:sha256\ncheckout-method:POST\ncheckout-nonce:nonce-0\ncheckout-timestamp:2018-07-06T10:01:31.904Z\n{}",
            r#"{"a":1}"#
        );

        assert_eq!(signed.signature, reference_hmac(&expected_input));
        assert_eq!(signed.signature.len(), 64);
        assert!(signed
            .signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn sign_includes_required_headers() {
        let signed = signer()
            .sign("GET", "/merchants/payment-providers", &SignatureHeaders::new(), "")
            .unwrap();

        assert_eq!(signed.headers.get(ACCOUNT_HEADER), Some(ACCOUNT));
        assert_eq!(signed.headers.get(ALGORITHM_HEADER), Some("sha256"));
        assert_eq!(signed.headers.get(METHOD_HEADER), Some("GET"));
        assert_eq!(signed.headers.get(NONCE_HEADER), Some("nonce-0"));
        assert_eq!(
            signed.headers.get(TIMESTAMP_HEADER),
            Some("2018-07-06T10:01:31.904Z")
        );
        assert_eq!(signed.headers.len(), 5);
    }

    #[test]
    fn sign_merges_extra_headers_into_signature() {
        let extra: SignatureHeaders = [("checkout-transaction-id", "tx-1")].into_iter().collect();
        let signed = signer().sign("POST", "/payments/tx-1/refund", &extra, "").unwrap();

        assert_eq!(signed.headers.get("checkout-transaction-id"), Some("tx-1"));
        let expected = compute_signature(SECRET.as_bytes(), &signed.headers, "").unwrap();
        assert_eq!(signed.signature, expected);
    }

    #[test]
    fn extra_headers_cannot_replace_required_ones() {
        let extra: SignatureHeaders = [(METHOD_HEADER, "DELETE"), (ACCOUNT_HEADER, "evil")]
            .into_iter()
            .collect();
        let signed = signer().sign("GET", "/merchants", &extra, "").unwrap();

        assert_eq!(signed.headers.get(METHOD_HEADER), Some("GET"));
        assert_eq!(signed.headers.get(ACCOUNT_HEADER), Some(ACCOUNT));
    }

    #[test]
    fn repeated_signing_never_reuses_nonce_or_signature() {
        let signer = RequestSigner::new(
            ACCOUNT,
            SECRET,
            Arc::new(TickingClock(AtomicUsize::new(0))),
            Arc::new(CountingNonces(AtomicUsize::new(0))),
        )
        .unwrap();

        let first = signer.sign("POST", "/payments", &SignatureHeaders::new(), "{}").unwrap();
        let second = signer.sign("POST", "/payments", &SignatureHeaders::new(), "{}").unwrap();

        assert_ne!(first.headers.get(NONCE_HEADER), second.headers.get(NONCE_HEADER));
        assert_ne!(
            first.headers.get(TIMESTAMP_HEADER),
            second.headers.get(TIMESTAMP_HEADER)
        );
        assert_ne!(first.signature, second.signature);
    }

    #[test]
    fn header_pairs_append_signature() {
        let signed = signer().sign("GET", "/", &SignatureHeaders::new(), "").unwrap();
        let pairs = signed.header_pairs();

        assert_eq!(pairs.len(), 6);
        assert_eq!(
            pairs.last(),
            Some(&(SIGNATURE_HEADER.to_string(), signed.signature.clone()))
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Verification
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_accepts_own_signature() {
        let signer = signer();
        let body = r#"{"transactionId":"abc"}"#;
        let signed = signer.sign("POST", "/payments", &SignatureHeaders::new(), body).unwrap();

        assert!(signer.verify(&signed.headers, body, &signed.signature).is_ok());
    }

    #[test]
    fn verify_ignores_unprefixed_entries() {
        let signer = signer();
        let signed = signer.sign("GET", "/", &SignatureHeaders::new(), "").unwrap();

        let mut received = signed.headers.clone();
        received.insert("content-type", "application/json");
        received.insert(SIGNATURE_HEADER, signed.signature.clone());

        assert!(signer.verify(&received, "", &signed.signature).is_ok());
    }

    #[test]
    fn verify_rejects_tampered_body() {
        let signer = signer();
        let signed = signer
            .sign("POST", "/payments", &SignatureHeaders::new(), r#"{"amount":100}"#)
            .unwrap();

        let result = signer.verify(&signed.headers, r#"{"amount":1}"#, &signed.signature);
        assert_eq!(result, Err(SigningError::SignatureMismatch));
    }

    #[test]
    fn verify_rejects_non_hex_signature() {
        let signer = signer();
        let signed = signer.sign("GET", "/", &SignatureHeaders::new(), "").unwrap();

        let result = signer.verify(&signed.headers, "", "not-hex");
        assert_eq!(result, Err(SigningError::MalformedSignature));
    }

    #[test]
    fn verify_rejects_other_algorithms() {
        let signer = signer();
        let mut headers = signer.sign("GET", "/", &SignatureHeaders::new(), "").unwrap().headers;
        headers.insert(ALGORITHM_HEADER, "sha512");

        let result = signer.verify(&headers, "", &"a".repeat(128));
        assert_eq!(
            result,
            Err(SigningError::UnsupportedAlgorithm("sha512".to_string()))
        );
    }
}
