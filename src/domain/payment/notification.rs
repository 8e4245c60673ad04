//! Record of a verified result notification.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::callback::GatewayCallback;
use super::InvoiceId;

/// Stored once per accepted result notification.
///
/// Used by the strict check on the success redirect. Duplicates are allowed
/// since the gateway may re-deliver the same notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub invoice_id: InvoiceId,
    pub out_sum: String,
    pub created_at: Timestamp,
}

impl NotificationRecord {
    pub fn new(invoice_id: InvoiceId, out_sum: impl Into<String>) -> Self {
        Self {
            invoice_id,
            out_sum: out_sum.into(),
            created_at: Timestamp::now(),
        }
    }

    pub fn from_callback(callback: &GatewayCallback) -> Self {
        Self::new(callback.invoice_id, callback.out_sum.clone())
    }
}
