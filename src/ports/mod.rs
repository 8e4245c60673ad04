//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the payment domain and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events
//! - `PaymentListener` - Typed hooks for accepted payment callbacks
//!
//! ## Storage Ports
//!
//! - `NotificationRepository` - Verified result notifications (strict check)
//!
//! ## Presentation Ports
//!
//! - `PageRenderer` - Buyer-facing success, fail, error and form pages

mod event_publisher;
mod event_subscriber;
mod notification_repository;
mod page_renderer;
mod payment_listener;

pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use notification_repository::NotificationRepository;
pub use page_renderer::PageRenderer;
pub use payment_listener::PaymentListener;
