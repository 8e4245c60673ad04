//! HTTP handlers for the gateway callback endpoints.
//!
//! These handlers connect Axum routes to the payment command handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;

use crate::application::handlers::payment::{
    FailRedirectCommand, FailRedirectHandler, ReceiveResultCommand, ReceiveResultHandler,
    SuccessRedirectCommand, SuccessRedirectHandler,
};
use crate::domain::payment::PaymentVerifier;
use crate::ports::{EventPublisher, NotificationRepository, PageRenderer};

use super::dto::{PageResponse, ResultResponse};
use super::extract::GatewayParams;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the payment endpoints.
///
/// Cloned for each request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct PaymentAppState {
    pub verifier: PaymentVerifier,
    pub notification_repository: Arc<dyn NotificationRepository>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub renderer: Arc<dyn PageRenderer>,
}

impl PaymentAppState {
    pub fn receive_result_handler(&self) -> ReceiveResultHandler {
        ReceiveResultHandler::new(
            self.verifier.clone(),
            self.notification_repository.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn success_redirect_handler(&self) -> SuccessRedirectHandler {
        SuccessRedirectHandler::new(
            self.verifier.clone(),
            self.notification_repository.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn fail_redirect_handler(&self) -> FailRedirectHandler {
        FailRedirectHandler::new(self.verifier.clone(), self.event_publisher.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Header carrying the request id set by the router's request-id layer.
pub const X_REQUEST_ID: &str = "x-request-id";

fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// /result/ - Asynchronous result notification from the gateway
pub async fn receive_result(
    State(state): State<PaymentAppState>,
    headers: HeaderMap,
    GatewayParams(params): GatewayParams,
) -> ResultResponse {
    let cmd = ReceiveResultCommand {
        params,
        correlation_id: request_id(&headers),
    };

    match state.receive_result_handler().handle(cmd).await {
        Ok(result) => ResultResponse::Accepted(result.response_body()),
        Err(e) => ResultResponse::Failed(e),
    }
}

/// /success/ - Buyer redirected after a completed payment
pub async fn success_redirect(
    State(state): State<PaymentAppState>,
    headers: HeaderMap,
    GatewayParams(params): GatewayParams,
) -> PageResponse {
    let cmd = SuccessRedirectCommand {
        params: params.clone(),
        correlation_id: request_id(&headers),
    };

    match state.success_redirect_handler().handle(cmd).await {
        Ok(result) => PageResponse::ok(state.renderer.render_success(&result.callback)),
        Err(e) => PageResponse::error(&e, state.renderer.render_error(&e, &params)),
    }
}

/// /fail/ - Buyer redirected after a cancelled or failed payment
pub async fn fail_redirect(
    State(state): State<PaymentAppState>,
    headers: HeaderMap,
    GatewayParams(params): GatewayParams,
) -> PageResponse {
    let cmd = FailRedirectCommand {
        params: params.clone(),
        correlation_id: request_id(&headers),
    };

    match state.fail_redirect_handler().handle(cmd).await {
        Ok(result) => PageResponse::ok(state.renderer.render_fail(&result.callback)),
        Err(e) => PageResponse::error(&e, state.renderer.render_error(&e, &params)),
    }
}

/// GET /health - Liveness check
pub async fn health() -> &'static str {
    "OK"
}
