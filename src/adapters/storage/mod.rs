//! Storage Adapters
//!
//! Implementations of the `CheckoutSessionStore` port.
//!
//! ## Available Adapters
//!
//! - **InMemoryCheckoutSessions** - Sessions live in process memory, expire
//!   after an idle time-to-live and are lost on restart

mod in_memory_checkout_sessions;

pub use in_memory_checkout_sessions::{InMemoryCheckoutSessions, DEFAULT_SESSION_TTL};
