//! Outbound payment forms.
//!
//! A [`SignedForm`] is the signed field set for one payment request. It can be
//! submitted by POST (hidden inputs, see [`SignedForm::post_fields`]) or by a
//! GET redirect ([`SignedForm::redirect_url`]); both transports carry exactly
//! the same non-empty fields. Every field is meant to be rendered hidden.

use std::collections::BTreeMap;
use std::sync::Arc;

use url::form_urlencoded;

use super::fields;
use super::signature::{Signature, Signer};
use super::{Amount, CustomParamNames, CustomParams, GatewaySettings, InvoiceId};

/// A one-off purchase request. Every field except the merchant login is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub amount: Option<Amount>,
    pub invoice_id: Option<InvoiceId>,
    pub description: Option<String>,
    /// Suggested payment currency (`IncCurrLabel`).
    pub currency: Option<String>,
    /// Interface language (`Culture`).
    pub locale: Option<String>,
    pub email: Option<String>,
    /// Marks the payment as the parent of a recurring series.
    pub recurring: bool,
    /// Serialized receipt, see [`super::Receipt::to_json`].
    pub receipt: Option<String>,
    pub custom_params: CustomParams,
}

impl PurchaseRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn invoice_id(mut self, invoice_id: impl Into<InvoiceId>) -> Self {
        self.invoice_id = Some(invoice_id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }

    pub fn receipt(mut self, receipt: impl Into<String>) -> Self {
        self.receipt = Some(receipt.into());
        self
    }

    pub fn custom_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_params.insert(name, value);
        self
    }
}

/// A follow-up charge in a recurring series. `InvoiceID` is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringRequest {
    pub invoice_id: InvoiceId,
    /// Invoice of the parent (first) payment.
    pub previous_invoice_id: Option<InvoiceId>,
    pub amount: Option<Amount>,
    pub description: Option<String>,
    pub locale: Option<String>,
    pub email: Option<String>,
    pub receipt: Option<String>,
    pub custom_params: CustomParams,
}

impl RecurringRequest {
    pub fn new(invoice_id: impl Into<InvoiceId>) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            previous_invoice_id: None,
            amount: None,
            description: None,
            locale: None,
            email: None,
            receipt: None,
            custom_params: CustomParams::new(),
        }
    }

    pub fn previous_invoice_id(mut self, invoice_id: impl Into<InvoiceId>) -> Self {
        self.previous_invoice_id = Some(invoice_id.into());
        self
    }

    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn receipt(mut self, receipt: impl Into<String>) -> Self {
        self.receipt = Some(receipt.into());
        self
    }

    pub fn custom_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_params.insert(name, value);
        self
    }
}

/// One hidden form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

/// A signed payment form ready to submit to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedForm {
    target: String,
    fields: Vec<FormField>,
    signature: Signature,
}

impl SignedForm {
    /// The gateway URL the form submits to.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Non-empty fields in submission order.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Field map for a POST submission.
    pub fn post_fields(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// GET redirect to the form's own target.
    pub fn redirect_url(&self) -> String {
        self.redirect_url_with_base(&self.target)
    }

    /// GET redirect to `base`, equivalent to submitting the form by GET.
    pub fn redirect_url_with_base(&self, base: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter().map(|f| (f.name.as_str(), f.value.as_str())))
            .finish();
        let separator = if base.contains('?') { '&' } else { '?' };
        format!("{}{}{}", base, separator, query)
    }
}

/// Collects fields, dropping empty ones.
#[derive(Default)]
struct FieldList(Vec<FormField>);

impl FieldList {
    fn push(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.0.push(FormField {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }

    fn push_custom_params(&mut self, names: &CustomParamNames, values: &CustomParams) {
        for name in names.iter() {
            self.push(&CustomParamNames::wire_name(name), values.get(name));
        }
    }
}

/// Builds signed outbound forms from the gateway settings.
#[derive(Clone)]
pub struct PaymentFormBuilder {
    settings: Arc<GatewaySettings>,
}

impl PaymentFormBuilder {
    pub fn new(settings: Arc<GatewaySettings>) -> Self {
        Self { settings }
    }

    /// Signs a purchase form (`MerchantLogin:OutSum:InvId[:Receipt]:password1[:shp...]`).
    pub fn purchase(&self, request: &PurchaseRequest) -> SignedForm {
        let out_sum = request.amount.map(|a| a.to_wire());
        let invoice_id = request.invoice_id.map(|id| id.to_string());
        let signature = Signer::new(&self.settings).outbound(
            out_sum.as_deref(),
            invoice_id.as_deref(),
            request.receipt.as_deref(),
            &request.custom_params,
        );

        let mut list = FieldList::default();
        list.push(fields::MERCHANT_LOGIN, Some(&self.settings.merchant_login));
        list.push(fields::OUT_SUM, out_sum.as_deref());
        list.push(fields::INV_ID, invoice_id.as_deref());
        list.push(fields::DESCRIPTION, request.description.as_deref());
        list.push(fields::SIGNATURE_VALUE, Some(signature.as_str()));
        list.push(fields::INC_CURR_LABEL, request.currency.as_deref());
        list.push(fields::CULTURE, request.locale.as_deref());
        list.push(fields::EMAIL, request.email.as_deref());
        list.push(fields::RECURRING, request.recurring.then_some("true"));
        list.push(fields::RECEIPT, request.receipt.as_deref());
        list.push_custom_params(&self.settings.custom_params, &request.custom_params);
        self.push_test_flag(&mut list);

        SignedForm {
            target: self.settings.form_target.clone(),
            fields: list.0,
            signature,
        }
    }

    /// Signs a recurring charge (`MerchantLogin:OutSum:InvoiceID[:Receipt]:password1[:shp...]`).
    pub fn recurring(&self, request: &RecurringRequest) -> SignedForm {
        let out_sum = request.amount.map(|a| a.to_wire());
        let invoice_id = request.invoice_id.to_string();
        let previous_invoice_id = request.previous_invoice_id.map(|id| id.to_string());
        let signature = Signer::new(&self.settings).outbound(
            out_sum.as_deref(),
            Some(&invoice_id),
            request.receipt.as_deref(),
            &request.custom_params,
        );

        let mut list = FieldList::default();
        list.push(fields::MERCHANT_LOGIN, Some(&self.settings.merchant_login));
        list.push(fields::OUT_SUM, out_sum.as_deref());
        list.push(fields::INVOICE_ID, Some(&invoice_id));
        list.push(fields::PREVIOUS_INVOICE_ID, previous_invoice_id.as_deref());
        list.push(fields::DESCRIPTION, request.description.as_deref());
        list.push(fields::SIGNATURE_VALUE, Some(signature.as_str()));
        list.push(fields::EMAIL, request.email.as_deref());
        list.push(fields::CULTURE, request.locale.as_deref());
        list.push(fields::RECEIPT, request.receipt.as_deref());
        list.push_custom_params(&self.settings.custom_params, &request.custom_params);
        self.push_test_flag(&mut list);

        SignedForm {
            target: self.settings.recurring_form_target.clone(),
            fields: list.0,
            signature,
        }
    }

    fn push_test_flag(&self, list: &mut FieldList) {
        if self.settings.test_mode {
            list.push(fields::IS_TEST, Some("1"));
        }
    }
}
