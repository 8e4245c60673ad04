//! Verification of inbound gateway callbacks.
//!
//! - Result notification: server-to-server, signed with password2.
//! - Success redirect: the buyer's browser, signed with password1.
//! - Fail redirect: the buyer's browser, unsigned.
//!
//! The fail redirect carries no checksum, so its fields are caller-supplied
//! and must never drive state changes on their own.

use std::sync::Arc;

use super::callback::{GatewayCallback, InboundParams};
use super::fields;
use super::signature::Signer;
use super::{GatewaySettings, InvoiceId, PaymentError};

/// Parses and authenticates inbound payloads.
#[derive(Clone)]
pub struct PaymentVerifier {
    settings: Arc<GatewaySettings>,
}

impl PaymentVerifier {
    pub fn new(settings: Arc<GatewaySettings>) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    /// Verifies a result notification against password2.
    pub fn verify_notification(&self, params: &InboundParams) -> Result<GatewayCallback, PaymentError> {
        let callback = self.parse(params)?;
        let expected = Signer::new(&self.settings).result(
            &callback.out_sum,
            callback.invoice_id,
            &callback.custom_params,
        );
        self.check_signature(params, &expected, &callback, "result")?;
        Ok(callback)
    }

    /// Verifies a success redirect against password1.
    pub fn verify_success_redirect(
        &self,
        params: &InboundParams,
    ) -> Result<GatewayCallback, PaymentError> {
        let callback = self.parse(params)?;
        let expected = Signer::new(&self.settings).redirect(
            &callback.out_sum,
            callback.invoice_id,
            &callback.custom_params,
        );
        self.check_signature(params, &expected, &callback, "success")?;
        Ok(callback)
    }

    /// Parses a fail redirect. No checksum is checked.
    pub fn verify_fail_redirect(&self, params: &InboundParams) -> Result<GatewayCallback, PaymentError> {
        self.parse(params)
    }

    fn parse(&self, params: &InboundParams) -> Result<GatewayCallback, PaymentError> {
        let out_sum = params.require_bounded(fields::OUT_SUM, fields::MAX_OUT_SUM_LEN)?;
        let invoice_id = InvoiceId::parse(fields::INV_ID, params.require(fields::INV_ID)?)?;
        let culture = params.optional_bounded(fields::CULTURE, fields::MAX_CULTURE_LEN)?;

        Ok(GatewayCallback {
            invoice_id,
            out_sum: out_sum.to_string(),
            culture: culture.map(str::to_string),
            custom_params: self.settings.custom_params.extract(params),
        })
    }

    fn check_signature(
        &self,
        params: &InboundParams,
        expected: &super::Signature,
        callback: &GatewayCallback,
        flow: &'static str,
    ) -> Result<(), PaymentError> {
        let received = params.require_bounded(fields::SIGNATURE_VALUE, fields::MAX_SIGNATURE_LEN)?;
        if !expected.matches(received) {
            tracing::warn!(
                flow,
                invoice_id = %callback.invoice_id,
                out_sum = %callback.out_sum,
                "Gateway callback signature mismatch"
            );
            return Err(PaymentError::BadSignature);
        }
        Ok(())
    }
}
