//! NotificationRepository port - Storage for verified result notifications.
//!
//! The success redirect consults this store when strict check is enabled:
//! a buyer may only see the success page for an invoice the gateway has
//! already confirmed server-to-server.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::payment::{InvoiceId, NotificationRecord};

/// Port for persisting result notifications.
///
/// Records are append-only. Repeated notifications for the same invoice are
/// stored as separate rows.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Stores a notification record.
    async fn record(&self, record: &NotificationRecord) -> Result<(), DomainError>;

    /// Returns true when at least one notification exists for the invoice.
    async fn exists(&self, invoice_id: InvoiceId) -> Result<bool, DomainError>;
}
