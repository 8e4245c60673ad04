//! Axum router configuration for the gateway callback endpoints.

use axum::handler::Handler;
use axum::routing::{get, post, MethodRouter};
use axum::Router;

use crate::domain::payment::TransportMethod;

use super::handlers::{fail_redirect, health, receive_result, success_redirect, PaymentAppState};

/// Create the payment router.
///
/// # Routes
///
/// Callback endpoints accept only the configured method (GET or POST):
/// - `/result/` - Result notification, plain-text answer
/// - `/success/` - Success redirect, HTML page
/// - `/fail/` - Fail redirect, HTML page
///
/// Always available:
/// - `GET /health` - Liveness check
///
/// # Example
///
/// ```ignore
/// let app = payment_router(TransportMethod::Post).with_state(state);
/// ```
pub fn payment_router(method: TransportMethod) -> Router<PaymentAppState> {
    Router::new()
        .route("/result/", on(method, receive_result))
        .route("/success/", on(method, success_redirect))
        .route("/fail/", on(method, fail_redirect))
        .route("/health", get(health))
}

fn on<H, T>(method: TransportMethod, handler: H) -> MethodRouter<PaymentAppState>
where
    H: Handler<T, PaymentAppState>,
    T: 'static,
{
    match method {
        TransportMethod::Get => get(handler),
        TransportMethod::Post => post(handler),
    }
}
