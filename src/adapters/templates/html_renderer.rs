//! Minimal HTML pages for the buyer-facing endpoints.
//!
//! Every interpolated value is escaped. Projects with their own look plug a
//! different `PageRenderer` into the router state.

use std::fmt::Write;

use crate::domain::payment::{
    CustomParams, GatewayCallback, InboundParams, PaymentError, SignedForm,
};
use crate::ports::PageRenderer;

/// Default `PageRenderer` producing small self-contained HTML documents.
#[derive(Debug, Clone, Default)]
pub struct HtmlPageRenderer;

impl HtmlPageRenderer {
    pub fn new() -> Self {
        Self
    }
}

/// Custom parameters as a definition list; empty when there are none.
fn custom_param_list(params: &CustomParams) -> String {
    if params.is_empty() {
        return String::new();
    }
    let mut items = String::new();
    for (name, value) in params.iter() {
        let _ = writeln!(items, "<dt>{}</dt><dd>{}</dd>", escape(name), escape(value));
    }
    format!("\n<dl class=\"custom-params\">\n{}</dl>", items)
}

impl PageRenderer for HtmlPageRenderer {
    fn render_success(&self, callback: &GatewayCallback) -> String {
        page(
            "Payment successful",
            &format!(
                "<h1>Thank you!</h1>\n<p>Invoice {} for {} has been paid.</p>{}",
                callback.invoice_id,
                escape(&callback.out_sum),
                custom_param_list(&callback.custom_params)
            ),
        )
    }

    fn render_fail(&self, callback: &GatewayCallback) -> String {
        page(
            "Payment failed",
            &format!(
                "<h1>Payment was not completed</h1>\n<p>Invoice {} for {} was not paid.</p>{}",
                callback.invoice_id,
                escape(&callback.out_sum),
                custom_param_list(&callback.custom_params)
            ),
        )
    }

    fn render_error(&self, error: &PaymentError, params: &InboundParams) -> String {
        let mut rows = String::new();
        for (name, value) in params.iter() {
            let _ = writeln!(
                rows,
                "<tr><th>{}</th><td>{}</td></tr>",
                escape(name),
                escape(value)
            );
        }
        page(
            "Payment error",
            &format!(
                "<h1>Payment error</h1>\n<p>{}</p>\n<table>\n{}</table>",
                escape(&error.wire_message()),
                rows
            ),
        )
    }

    fn render_payment_form(&self, form: &SignedForm) -> String {
        let mut inputs = String::new();
        for field in form.fields() {
            // writing to a String cannot fail
            let _ = writeln!(
                inputs,
                r#"<input type="hidden" name="{}" value="{}">"#,
                escape(&field.name),
                escape(&field.value)
            );
        }
        page(
            "Redirecting to payment",
            &format!(
                "<form id=\"payment-form\" action=\"{}\" method=\"POST\">\n{}<button type=\"submit\">Pay</button>\n</form>\n<script>document.getElementById('payment-form').submit();</script>",
                escape(form.target()),
                inputs
            ),
        )
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
