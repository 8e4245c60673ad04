//! Robokassa Gateway - Merchant-side payment gateway integration
//!
//! Builds signed payment forms and verifies the gateway's result
//! notifications and success/fail redirects.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
