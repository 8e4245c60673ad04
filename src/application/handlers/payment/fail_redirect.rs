//! FailRedirectHandler - Command handler for the buyer's fail redirect.

use std::sync::Arc;

use crate::domain::payment::{
    GatewayCallback, InboundParams, PaymentError, PaymentEvent, PaymentEventData, PaymentVerifier,
};
use crate::ports::EventPublisher;

/// Command carrying the raw redirect parameters.
#[derive(Debug, Clone)]
pub struct FailRedirectCommand {
    pub params: InboundParams,
    /// Request id stamped on published events.
    pub correlation_id: Option<String>,
}

/// Result of a fail redirect.
#[derive(Debug, Clone)]
pub struct FailRedirectResult {
    pub callback: GatewayCallback,
}

/// Handler for fail redirects.
///
/// The gateway does not sign this redirect, so nothing here is verified
/// beyond field presence. Consumers of `FailPageVisited` must not cancel
/// orders or release stock on the strength of this event alone.
pub struct FailRedirectHandler {
    verifier: PaymentVerifier,
    event_publisher: Arc<dyn EventPublisher>,
}

impl FailRedirectHandler {
    pub fn new(verifier: PaymentVerifier, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            verifier,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: FailRedirectCommand) -> Result<FailRedirectResult, PaymentError> {
        let callback = self.verifier.verify_fail_redirect(&cmd.params).map_err(|e| {
            tracing::warn!(error = %e, "Rejected fail redirect");
            e
        })?;

        super::publish(
            self.event_publisher.as_ref(),
            cmd.correlation_id.as_deref(),
            PaymentEvent::FailPageVisited(PaymentEventData::from_callback(&callback)),
        )
        .await?;

        tracing::info!(
            invoice_id = %callback.invoice_id,
            "Fail redirect received (unsigned)"
        );

        Ok(FailRedirectResult { callback })
    }
}
