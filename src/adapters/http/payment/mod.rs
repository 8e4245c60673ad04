//! HTTP adapter for the gateway callback endpoints.

mod dto;
mod extract;
mod handlers;
mod routes;

pub use dto::{PageResponse, ResultResponse};
pub use extract::{GatewayParams, GatewayParamsRejection};
pub use handlers::{PaymentAppState, X_REQUEST_ID};
pub use routes::payment_router;
