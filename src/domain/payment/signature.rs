//! Checksum computation and verification.
//!
//! The gateway authenticates messages with an MD5 digest over a canonical
//! string: the flow's primary fields, then the shared secret, then one
//! `shp<Name>=<Value>` segment per declared custom parameter, all joined with
//! `:` and rendered as uppercase hex. MD5 is mandated by the gateway.
//!
//! | Flow | Primary fields | Secret |
//! |------|----------------|--------|
//! | Purchase form | `MerchantLogin:OutSum:InvId[:Receipt]` | password1 |
//! | Recurring form | `MerchantLogin:OutSum:InvoiceID[:Receipt]` | password1 |
//! | Result notification | `OutSum:InvId` | password2 |
//! | Success / fail redirect | `OutSum:InvId` | password1 |

use md5::{Digest, Md5};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use subtle::ConstantTimeEq;

use super::{CustomParamNames, CustomParams, GatewaySettings, InvoiceId};

/// Computes the uppercase hex MD5 of `parts` joined with `:`.
pub fn compute_signature<S: AsRef<str>>(parts: &[S]) -> Signature {
    let joined = parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(":");
    Signature(hex::encode_upper(Md5::digest(joined.as_bytes())))
}

/// An uppercase hex checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares against a received `SignatureValue`.
    ///
    /// The received value is uppercased first; the comparison itself is
    /// constant-time.
    pub fn matches(&self, received: &str) -> bool {
        let received = received.trim().to_ascii_uppercase();
        constant_time_compare(self.0.as_bytes(), received.as_bytes())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Ordered hash input for one flow.
///
/// Holds the secret in clear once `secret()` is called, so it has no `Debug`.
pub struct CanonicalString {
    parts: Vec<String>,
}

impl CanonicalString {
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Appends a primary field; `None` serializes as an empty segment.
    pub fn field(mut self, value: Option<&str>) -> Self {
        self.parts.push(value.unwrap_or_default().to_string());
        self
    }

    /// Appends a segment only when the value is present and non-empty.
    pub fn optional_field(mut self, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.parts.push(value.to_string());
        }
        self
    }

    pub fn secret(mut self, secret: &SecretString) -> Self {
        self.parts.push(secret.expose_secret().clone());
        self
    }

    /// Appends `shp<Name>=<Value>` for every declared name, in signing order.
    pub fn custom_params(mut self, names: &CustomParamNames, values: &CustomParams) -> Self {
        for name in names.iter() {
            self.parts.push(format!(
                "{}={}",
                CustomParamNames::wire_name(name),
                values.signing_value(name)
            ));
        }
        self
    }

    pub fn sign(&self) -> Signature {
        compute_signature(&self.parts)
    }
}

impl Default for CanonicalString {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the flow-specific canonical strings from the gateway settings.
pub struct Signer<'a> {
    settings: &'a GatewaySettings,
}

impl<'a> Signer<'a> {
    pub fn new(settings: &'a GatewaySettings) -> Self {
        Self { settings }
    }

    /// Outbound purchase or recurring form (`invoice` is `InvId` or `InvoiceID`).
    pub fn outbound(
        &self,
        out_sum: Option<&str>,
        invoice: Option<&str>,
        receipt: Option<&str>,
        custom_params: &CustomParams,
    ) -> Signature {
        CanonicalString::new()
            .field(Some(&self.settings.merchant_login))
            .field(out_sum)
            .field(invoice)
            .optional_field(receipt)
            .secret(&self.settings.password1)
            .custom_params(&self.settings.custom_params, custom_params)
            .sign()
    }

    /// Asynchronous result notification, signed with password2.
    pub fn result(
        &self,
        out_sum: &str,
        invoice_id: InvoiceId,
        custom_params: &CustomParams,
    ) -> Signature {
        self.inbound(out_sum, invoice_id, &self.settings.password2, custom_params)
    }

    /// Browser success/fail redirect, signed with password1.
    pub fn redirect(
        &self,
        out_sum: &str,
        invoice_id: InvoiceId,
        custom_params: &CustomParams,
    ) -> Signature {
        self.inbound(out_sum, invoice_id, &self.settings.password1, custom_params)
    }

    fn inbound(
        &self,
        out_sum: &str,
        invoice_id: InvoiceId,
        secret: &SecretString,
        custom_params: &CustomParams,
    ) -> Signature {
        let invoice_id = invoice_id.to_string();
        CanonicalString::new()
            .field(Some(out_sum))
            .field(Some(&invoice_id))
            .secret(secret)
            .custom_params(&self.settings.custom_params, custom_params)
            .sign()
    }
}
