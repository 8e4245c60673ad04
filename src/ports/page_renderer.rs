//! PageRenderer port - Produces the pages shown to the buyer.
//!
//! Handlers decide what happened; the renderer decides how it looks. Swap the
//! adapter to integrate a template engine.

use crate::domain::payment::{GatewayCallback, InboundParams, PaymentError, SignedForm};

/// Port for rendering buyer-facing HTML.
pub trait PageRenderer: Send + Sync {
    /// Page for an accepted success redirect.
    fn render_success(&self, callback: &GatewayCallback) -> String;

    /// Page for a fail redirect.
    fn render_fail(&self, callback: &GatewayCallback) -> String;

    /// Page for a rejected redirect, echoing the received fields for diagnostics.
    fn render_error(&self, error: &PaymentError, params: &InboundParams) -> String;

    /// Auto-submitting page carrying the signed form as hidden inputs.
    fn render_payment_form(&self, form: &SignedForm) -> String;
}
