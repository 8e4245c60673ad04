//! Application layer - Command handlers.
//!
//! This layer orchestrates the payment domain and coordinates between ports.

pub mod handlers;

pub use handlers::payment::{
    FailRedirectCommand, FailRedirectHandler, FailRedirectResult, ReceiveResultCommand,
    ReceiveResultHandler, ReceiveResultResult, SuccessRedirectCommand, SuccessRedirectHandler,
    SuccessRedirectResult,
};
