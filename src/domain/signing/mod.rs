//! Request signing for the Paytrail payment API.
//!
//! Implements the API's HMAC-SHA256 scheme: a canonical, sorted rendering of
//! the `checkout-*` headers plus the raw body, keyed with the merchant secret.
//!
//! # Security
//!
//! - A fresh timestamp and nonce per call; signatures are one-shot
//! - Incoming signatures are compared in constant time
//! - The secret is held in a `secrecy::SecretString`

mod errors;
mod headers;
mod signer;

pub use errors::SigningError;
pub use headers::{
    SignatureHeaders, ACCOUNT_HEADER, ALGORITHM_HEADER, CHECKOUT_HEADER_PREFIX, METHOD_HEADER,
    NONCE_HEADER, REQUIRED_HEADERS, SHA256_ALGORITHM, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
pub use signer::{
    compute_signature, format_timestamp, signing_string, RequestSigner, SignedRequest,
};
