//! Payment domain events.
//!
//! Published after a callback has been accepted:
//! - `NotificationReceived` - verified result notification (payment confirmed)
//! - `SuccessPageVisited` - buyer returned through the signed success redirect
//! - `FailPageVisited` - buyer returned through the unsigned fail redirect
//!
//! `FailPageVisited` carries caller-supplied data; consumers must not treat it
//! as proof that the invoice was cancelled.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainEvent, EventId, Timestamp};

use super::callback::GatewayCallback;
use super::{CustomParams, InvoiceId};

/// Data shared by every payment event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEventData {
    /// Unique identifier for this event.
    pub event_id: EventId,

    pub invoice_id: InvoiceId,

    /// `OutSum` as received.
    pub out_sum: String,

    #[serde(default)]
    pub custom_params: CustomParams,

    pub occurred_at: Timestamp,
}

impl PaymentEventData {
    pub fn from_callback(callback: &GatewayCallback) -> Self {
        Self {
            event_id: EventId::new(),
            invoice_id: callback.invoice_id,
            out_sum: callback.out_sum.clone(),
            custom_params: callback.custom_params.clone(),
            occurred_at: Timestamp::now(),
        }
    }
}

/// Event emitted when a gateway callback is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentEvent {
    NotificationReceived(PaymentEventData),
    SuccessPageVisited(PaymentEventData),
    FailPageVisited(PaymentEventData),
}

impl PaymentEvent {
    pub const NOTIFICATION_RECEIVED: &'static str = "payment.notification_received.v1";
    pub const SUCCESS_PAGE_VISITED: &'static str = "payment.success_visited.v1";
    pub const FAIL_PAGE_VISITED: &'static str = "payment.fail_visited.v1";

    /// Event types this module publishes.
    pub const ALL_TYPES: [&'static str; 3] = [
        Self::NOTIFICATION_RECEIVED,
        Self::SUCCESS_PAGE_VISITED,
        Self::FAIL_PAGE_VISITED,
    ];

    pub fn data(&self) -> &PaymentEventData {
        match self {
            PaymentEvent::NotificationReceived(data)
            | PaymentEvent::SuccessPageVisited(data)
            | PaymentEvent::FailPageVisited(data) => data,
        }
    }
}

impl DomainEvent for PaymentEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PaymentEvent::NotificationReceived(_) => Self::NOTIFICATION_RECEIVED,
            PaymentEvent::SuccessPageVisited(_) => Self::SUCCESS_PAGE_VISITED,
            PaymentEvent::FailPageVisited(_) => Self::FAIL_PAGE_VISITED,
        }
    }

    fn aggregate_id(&self) -> String {
        self.data().invoice_id.to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        "Invoice"
    }

    fn occurred_at(&self) -> Timestamp {
        self.data().occurred_at
    }

    fn event_id(&self) -> EventId {
        self.data().event_id.clone()
    }
}
