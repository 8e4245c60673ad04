//! Payment protocol error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MissingField | 400 |
//! | InvalidField | 400 |
//! | BadSignature | 400 |
//! | NoPriorNotification | 403 |
//! | Infrastructure | 500 |

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::DomainError;

use super::InvoiceId;

/// Errors raised while parsing or verifying gateway payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Required field absent (or empty) in the inbound payload.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Field present but not acceptable (not a number, too long).
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Recomputed checksum does not match `SignatureValue`.
    #[error("Bad signature")]
    BadSignature,

    /// Strict check is on and the gateway never notified us about this invoice.
    #[error("No prior notification for invoice {0}")]
    NoPriorNotification(InvoiceId),

    /// Storage or event delivery failed.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl PaymentError {
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        PaymentError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PaymentError::Infrastructure(message.into())
    }

    /// True for failures caused by the payload itself rather than by our side.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, PaymentError::Infrastructure(_))
    }

    /// Maps the error to an HTTP status code for the redirect pages.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::MissingField(_)
            | PaymentError::InvalidField { .. }
            | PaymentError::BadSignature => StatusCode::BAD_REQUEST,
            PaymentError::NoPriorNotification(_) => StatusCode::FORBIDDEN,
            PaymentError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text reason used in the `error: <reason>` body of the result endpoint.
    ///
    /// Infrastructure details stay in the logs.
    pub fn wire_message(&self) -> String {
        match self {
            PaymentError::MissingField(field) => format!("missing field {}", field),
            PaymentError::InvalidField { field, .. } => format!("invalid field {}", field),
            PaymentError::BadSignature => "bad signature".to_string(),
            PaymentError::NoPriorNotification(invoice_id) => {
                format!("no prior notification for invoice {}", invoice_id)
            }
            PaymentError::Infrastructure(_) => "internal error".to_string(),
        }
    }
}

impl From<DomainError> for PaymentError {
    fn from(err: DomainError) -> Self {
        PaymentError::Infrastructure(err.to_string())
    }
}
