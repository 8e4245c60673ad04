//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the payment domain to external systems:
//! - `events` - In-process event bus and listener bridge
//! - `http` - Axum endpoints for gateway callbacks
//! - `postgres` - PostgreSQL notification storage
//! - `storage` - In-memory notification storage
//! - `templates` - HTML page rendering

pub mod events;
pub mod http;
pub mod postgres;
pub mod storage;
pub mod templates;

pub use events::{InProcessEventBus, PaymentListenerHandler};
pub use storage::InMemoryNotificationRepository;
pub use templates::HtmlPageRenderer;
