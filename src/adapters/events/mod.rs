//! Event bus adapters.
//!
//! - `InProcessEventBus` - Synchronous, in-process bus
//! - `PaymentListenerHandler` - Routes payment events to a `PaymentListener`

mod in_process;
mod payment_listener;

pub use in_process::InProcessEventBus;
pub use payment_listener::PaymentListenerHandler;
