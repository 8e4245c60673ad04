//! Foundation module - Shared domain primitives.
//!
//! Error, timestamp and event envelope types used across the payment
//! domain, its ports and adapters.

mod errors;
mod events;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use events::{DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent};
pub use timestamp::Timestamp;
