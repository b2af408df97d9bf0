//! Checkout session store port.
//!
//! Holds one `CheckoutState` per active widget session. Updates run inside
//! the store so concurrent callbacks for the same session are serialised.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::checkout::CheckoutState;
use crate::domain::foundation::{CheckoutSessionId, DomainError, ErrorCode};

/// Errors from session storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionStoreError {
    #[error("Checkout session not found: {0}")]
    NotFound(CheckoutSessionId),
}

impl From<SessionStoreError> for DomainError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => {
                DomainError::new(ErrorCode::CheckoutSessionNotFound, err.to_string())
                    .with_detail("session_id", id.to_string())
            }
        }
    }
}

/// Mutation applied to a stored session under its lock.
pub type SessionUpdate = Box<dyn FnOnce(&mut CheckoutState) + Send>;

/// Port for checkout session persistence.
#[async_trait]
pub trait CheckoutSessionStore: Send + Sync {
    /// Stores a new session.
    async fn insert(&self, id: CheckoutSessionId, state: CheckoutState)
        -> Result<(), SessionStoreError>;

    /// Applies `update` to a session atomically and returns the updated state.
    async fn update(
        &self,
        id: &CheckoutSessionId,
        update: SessionUpdate,
    ) -> Result<CheckoutState, SessionStoreError>;

    /// Removes a session. Returns `true` if it existed.
    async fn remove(&self, id: &CheckoutSessionId) -> Result<bool, SessionStoreError>;

    /// Number of live (unexpired) sessions.
    async fn count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn CheckoutSessionStore) {}
    }

    #[test]
    fn not_found_maps_to_domain_code() {
        let id = CheckoutSessionId::new();
        let domain: DomainError = SessionStoreError::NotFound(id).into();
        assert_eq!(domain.code, ErrorCode::CheckoutSessionNotFound);
        assert_eq!(domain.details.get("session_id"), Some(&id.to_string()));
    }
}
