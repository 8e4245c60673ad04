//! Response types for payment endpoints.
//!
//! The gateway reads the result endpoint's body as plain text; redirect
//! endpoints answer with HTML pages for the buyer.

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::domain::payment::PaymentError;

/// Plain-text answer to a result notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultResponse {
    /// `OK<InvId>`, HTTP 200.
    Accepted(String),
    /// `error: <reason>`. HTTP 200 for rejected payloads, 500 when our side failed
    /// so the gateway retries.
    Failed(PaymentError),
}

impl ResultResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            ResultResponse::Failed(e) if !e.is_rejection() => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        }
    }

    pub fn body(&self) -> String {
        match self {
            ResultResponse::Accepted(body) => body.clone(),
            ResultResponse::Failed(e) => format!("error: {}", e.wire_message()),
        }
    }
}

impl IntoResponse for ResultResponse {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.body(),
        )
            .into_response()
    }
}

/// Rendered HTML page with its status code.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: StatusCode,
    pub html: String,
}

impl PageResponse {
    pub fn ok(html: String) -> Self {
        Self {
            status: StatusCode::OK,
            html,
        }
    }

    pub fn error(error: &PaymentError, html: String) -> Self {
        Self {
            status: error.status_code(),
            html,
        }
    }
}

impl IntoResponse for PageResponse {
    fn into_response(self) -> Response {
        (self.status, Html(self.html)).into_response()
    }
}
