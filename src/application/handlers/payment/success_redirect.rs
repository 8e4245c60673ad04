//! SuccessRedirectHandler - Command handler for the buyer's success redirect.

use std::sync::Arc;

use crate::domain::payment::{
    GatewayCallback, InboundParams, PaymentError, PaymentEvent, PaymentEventData, PaymentVerifier,
};
use crate::ports::{EventPublisher, NotificationRepository};

/// Command carrying the raw redirect parameters.
#[derive(Debug, Clone)]
pub struct SuccessRedirectCommand {
    pub params: InboundParams,
    /// Request id stamped on published events.
    pub correlation_id: Option<String>,
}

/// Result of an accepted success redirect.
#[derive(Debug, Clone)]
pub struct SuccessRedirectResult {
    pub callback: GatewayCallback,
}

/// Handler for success redirects.
///
/// Verifies the payload against password1. With strict check enabled, the
/// invoice must also have a stored result notification.
pub struct SuccessRedirectHandler {
    verifier: PaymentVerifier,
    repository: Arc<dyn NotificationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SuccessRedirectHandler {
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

    pub async fn handle(
        &self,
        cmd: SuccessRedirectCommand,
    ) -> Result<SuccessRedirectResult, PaymentError> {
        // 1. Verify signature and parse fields
        let callback = self
            .verifier
            .verify_success_redirect(&cmd.params)
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected success redirect");
                e
            })?;

        // 2. Strict check: require a prior result notification
        if self.verifier.settings().strict_check {
            let notified = self.repository.exists(callback.invoice_id).await.map_err(|e| {
                tracing::error!(
                    invoice_id = %callback.invoice_id,
                    error = %e,
                    "Failed to look up result notification"
                );
                PaymentError::from(e)
            })?;
            if !notified {
                tracing::warn!(
                    invoice_id = %callback.invoice_id,
                    "Success redirect without prior result notification"
                );
                return Err(PaymentError::NoPriorNotification(callback.invoice_id));
            }
        }

        // 3. Notify collaborators
        super::publish(
            self.event_publisher.as_ref(),
            cmd.correlation_id.as_deref(),
            PaymentEvent::SuccessPageVisited(PaymentEventData::from_callback(&callback)),
        )
        .await?;

        tracing::info!(invoice_id = %callback.invoice_id, "Success redirect accepted");

        Ok(SuccessRedirectResult { callback })
    }
}
