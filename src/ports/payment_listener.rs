//! PaymentListener port - Callback hooks for the order-management side.
//!
//! Every method defaults to a no-op, so a listener only implements the
//! moments it cares about.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::payment::PaymentEventData;

/// Receives accepted payment callbacks.
#[async_trait]
pub trait PaymentListener: Send + Sync {
    /// The gateway confirmed payment of an invoice.
    async fn on_notification_received(&self, _event: &PaymentEventData) -> Result<(), DomainError> {
        Ok(())
    }

    /// The buyer returned through the signed success redirect.
    async fn on_success_visited(&self, _event: &PaymentEventData) -> Result<(), DomainError> {
        Ok(())
    }

    /// The buyer returned through the fail redirect. The data is unsigned.
    async fn on_fail_visited(&self, _event: &PaymentEventData) -> Result<(), DomainError> {
        Ok(())
    }
}
