//! Signature header set.
//!
//! Paytrail authenticates a request by an HMAC over a canonical rendering of
//! its `checkout-*` headers. Keys are kept in a `BTreeMap` so iteration order
//! is already the byte-wise lexicographic order the signing string needs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Prefix shared by every header that takes part in the signature.
pub const CHECKOUT_HEADER_PREFIX: &str = "checkout-";

/// Merchant account identifier.
pub const ACCOUNT_HEADER: &str = "checkout-account";

/// Hash algorithm used for the HMAC.
pub const ALGORITHM_HEADER: &str = "checkout-algorithm";

/// HTTP method of the signed request.
pub const METHOD_HEADER: &str = "checkout-method";

/// Single-use random value.
pub const NONCE_HEADER: &str = "checkout-nonce";

/// ISO-8601 time the request was signed.
pub const TIMESTAMP_HEADER: &str = "checkout-timestamp";

/// Header carrying the hex-encoded signature itself.
pub const SIGNATURE_HEADER: &str = "signature";

/// The only algorithm this crate signs with.
pub const SHA256_ALGORITHM: &str = "sha256";

/// Headers every signed request carries.
pub const REQUIRED_HEADERS: [&str; 5] = [
    ACCOUNT_HEADER,
    ALGORITHM_HEADER,
    METHOD_HEADER,
    NONCE_HEADER,
    TIMESTAMP_HEADER,
];

/// Mapping of header name to value, iterated in signing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureHeaders(BTreeMap<String, String>);

impl SignatureHeaders {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, returning the previous value for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value of a header.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether the set holds the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates entries in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns only the `checkout-*` entries.
    ///
    /// Responses and redirect parameters from Paytrail mix signed and
    /// unsigned keys; only the prefixed ones are covered by the signature.
    pub fn checkout_entries(&self) -> SignatureHeaders {
        self.0
            .iter()
            .filter(|(key, _)| key.starts_with(CHECKOUT_HEADER_PREFIX))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SignatureHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for SignatureHeaders {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
