//! Signing error types.

use thiserror::Error;

/// Errors raised while building or checking a request signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    /// The merchant account identifier is not configured.
    #[error("Signing account is not configured")]
    MissingAccount,

    /// The signing secret is not configured.
    #[error("Signing secret key is not configured")]
    MissingSecret,

    /// The HMAC could not be keyed with the configured secret.
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    /// A received message carried no signature.
    #[error("Signature is missing")]
    MissingSignature,

    /// A received signature was not valid lowercase hex.
    #[error("Signature is not valid hex")]
    MalformedSignature,

    /// A received message was signed with an algorithm this crate does not support.
    #[error("Unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A received signature does not match the recomputed one.
    #[error("Signature mismatch")]
    SignatureMismatch,
}

impl SigningError {
    /// Returns true for errors that mean the process is misconfigured.
    ///
    /// These are fatal at startup and never retried.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SigningError::MissingAccount | SigningError::MissingSecret | SigningError::InvalidKey(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_flagged() {
        assert!(SigningError::MissingSecret.is_configuration_error());
        assert!(SigningError::MissingAccount.is_configuration_error());
        assert!(!SigningError::SignatureMismatch.is_configuration_error());
        assert!(!SigningError::MalformedSignature.is_configuration_error());
        assert!(!SigningError::MissingSignature.is_configuration_error());
    }

    #[test]
    fn unsupported_algorithm_displays_name() {
        let err = SigningError::UnsupportedAlgorithm("sha512".to_string());
        assert_eq!(err.to_string(), "Unsupported signature algorithm: sha512");
    }
}
