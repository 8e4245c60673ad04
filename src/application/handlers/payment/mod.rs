//! Payment callback handlers.
//!
//! ## Commands
//! - Receiving the asynchronous result notification
//! - Accepting the buyer's success redirect (with optional strict check)
//! - Accepting the buyer's fail redirect

mod fail_redirect;
mod receive_result;
mod success_redirect;

pub use fail_redirect::{FailRedirectCommand, FailRedirectHandler, FailRedirectResult};
pub use receive_result::{ReceiveResultCommand, ReceiveResultHandler, ReceiveResultResult};
pub use success_redirect::{SuccessRedirectCommand, SuccessRedirectHandler, SuccessRedirectResult};

use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};
use crate::domain::payment::{PaymentError, PaymentEvent};
use crate::ports::EventPublisher;

/// Wraps the event in an envelope, stamps the correlation id and publishes it.
async fn publish(
    publisher: &dyn EventPublisher,
    correlation_id: Option<&str>,
    event: PaymentEvent,
) -> Result<(), PaymentError> {
    let mut envelope = event.to_envelope()?;
    if let Some(id) = correlation_id {
        envelope = envelope.with_correlation_id(id);
    }
    publisher.publish(envelope).await.map_err(|e| {
        tracing::error!(
            event_type = event.event_type(),
            invoice_id = %event.data().invoice_id,
            error = %e,
            "Failed to publish payment event"
        );
        PaymentError::from(e)
    })
}
