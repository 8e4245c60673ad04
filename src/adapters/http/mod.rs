//! HTTP adapters.
//!
//! - `payment` - Gateway callback endpoints (`/result/`, `/success/`, `/fail/`)

pub mod payment;

pub use payment::{payment_router, PaymentAppState, X_REQUEST_ID};
