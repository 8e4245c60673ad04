//! Bridges the event bus to a typed `PaymentListener`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::domain::payment::PaymentEvent;
use crate::ports::{EventHandler, EventSubscriber, PaymentListener};

/// `EventHandler` that decodes payment events and dispatches them to a listener.
pub struct PaymentListenerHandler {
    listener: Arc<dyn PaymentListener>,
}

impl PaymentListenerHandler {
    pub fn new(listener: Arc<dyn PaymentListener>) -> Self {
        Self { listener }
    }

    /// Subscribes `listener` to every payment event type on `subscriber`.
    pub fn subscribe(subscriber: &dyn EventSubscriber, listener: Arc<dyn PaymentListener>) {
        subscriber.subscribe_all(&PaymentEvent::ALL_TYPES, Arc::new(Self::new(listener)));
    }
}

#[async_trait]
impl EventHandler for PaymentListenerHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let payment_event: PaymentEvent = event.payload_as().map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to decode {}: {}", event.event_type, e),
            )
        })?;

        match &payment_event {
            PaymentEvent::NotificationReceived(data) => {
                self.listener.on_notification_received(data).await
            }
            PaymentEvent::SuccessPageVisited(data) => self.listener.on_success_visited(data).await,
            PaymentEvent::FailPageVisited(data) => self.listener.on_fail_visited(data).await,
        }
    }

    fn name(&self) -> &'static str {
        "PaymentListenerHandler"
    }
}
