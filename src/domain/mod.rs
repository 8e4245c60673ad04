//! Domain layer containing the payment protocol and shared primitives.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors, timestamps, event envelopes)
//! - `payment` - Gateway protocol: signing, verification, forms and events

pub mod foundation;
pub mod payment;
