//! ReceiveResultHandler - Command handler for the asynchronous result notification.

use std::sync::Arc;

use crate::domain::payment::{
    GatewayCallback, InboundParams, NotificationRecord, PaymentError, PaymentEvent,
    PaymentEventData, PaymentVerifier,
};
use crate::ports::{EventPublisher, NotificationRepository};

/// Command carrying the raw notification parameters.
#[derive(Debug, Clone)]
pub struct ReceiveResultCommand {
    pub params: InboundParams,
    /// Request id stamped on published events.
    pub correlation_id: Option<String>,
}

/// Result of an accepted notification.
#[derive(Debug, Clone)]
pub struct ReceiveResultResult {
    pub callback: GatewayCallback,
}

impl ReceiveResultResult {
    /// Body the gateway expects on success: `OK<InvId>`.
    pub fn response_body(&self) -> String {
        format!("OK{}", self.callback.invoice_id)
    }
}

/// Handler for result notifications.
///
/// Verifies the payload against password2, stores a `NotificationRecord` and
/// publishes `PaymentEvent::NotificationReceived`.
pub struct ReceiveResultHandler {
    verifier: PaymentVerifier,
    repository: Arc<dyn NotificationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ReceiveResultHandler {
    pub fn new(
        verifier: PaymentVerifier,
        repository: Arc<dyn NotificationRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            verifier,
            repository,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: ReceiveResultCommand) -> Result<ReceiveResultResult, PaymentError> {
        // 1. Verify signature and parse fields
        let callback = self.verifier.verify_notification(&cmd.params).map_err(|e| {
            tracing::warn!(error = %e, "Rejected result notification");
            e
        })?;

        // 2. Store proof of payment
        self.repository
            .record(&NotificationRecord::from_callback(&callback))
            .await
            .map_err(|e| {
                tracing::error!(
                    invoice_id = %callback.invoice_id,
                    error = %e,
                    "Failed to record result notification"
                );
                PaymentError::from(e)
            })?;

        // 3. Notify collaborators
        super::publish(
            self.event_publisher.as_ref(),
            cmd.correlation_id.as_deref(),
            PaymentEvent::NotificationReceived(PaymentEventData::from_callback(&callback)),
        )
        .await?;

        tracing::info!(
            invoice_id = %callback.invoice_id,
            out_sum = %callback.out_sum,
            "Result notification accepted"
        );

        Ok(ReceiveResultResult { callback })
    }
}
