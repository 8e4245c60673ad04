//! Fiscal receipt (basket) attached to outbound forms as the `Receipt` field.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::PaymentError;

/// Receipt sent with a payment request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    /// Taxation system code (e.g. "osn", "usn_income").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sno: Option<String>,
    pub items: Vec<ReceiptItem>,
}

/// One basket line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptItem {
    pub name: String,
    #[serde(serialize_with = "decimal_as_number")]
    pub quantity: Decimal,
    #[serde(serialize_with = "decimal_as_number")]
    pub sum: Decimal,
    /// VAT code (e.g. "none", "vat20").
    pub tax: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_object: Option<String>,
}

impl ReceiptItem {
    pub fn new(name: impl Into<String>, quantity: Decimal, sum: Decimal, tax: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            sum,
            tax: tax.into(),
            payment_method: None,
            payment_object: None,
        }
    }
}

impl Receipt {
    pub fn new(items: Vec<ReceiptItem>) -> Self {
        Self { sno: None, items }
    }

    /// Compact JSON, the form the gateway expects in the `Receipt` field.
    pub fn to_json(&self) -> Result<String, PaymentError> {
        serde_json::to_string(self)
            .map_err(|e| PaymentError::invalid_field(super::fields::RECEIPT, e.to_string()))
    }
}

fn decimal_as_number<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    match value.to_f64() {
        Some(number) => serializer.serialize_f64(number),
        None => Err(serde::ser::Error::custom("decimal out of range")),
    }
}
