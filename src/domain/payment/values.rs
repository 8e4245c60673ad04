//! Value objects for the payment protocol: amounts and invoice numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::fields;
use super::PaymentError;

/// Non-negative money amount with at most two decimal places.
///
/// Always rendered with exactly two decimals, so `10` and `10.00` sign the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Creates an amount, rejecting negatives and sub-cent precision.
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value < Decimal::ZERO {
            return Err(PaymentError::invalid_field(
                fields::OUT_SUM,
                "amount must not be negative",
            ));
        }
        if value.normalize().scale() > 2 {
            return Err(PaymentError::invalid_field(
                fields::OUT_SUM,
                "amount must have at most two decimal places",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the underlying decimal.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Serializes with exactly two decimal places ("10" -> "10.00").
    pub fn to_wire(&self) -> String {
        let mut value = self.0;
        value.rescale(2);
        value.to_string()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl FromStr for Amount {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|e| PaymentError::invalid_field(fields::OUT_SUM, e.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Merchant-side invoice number (`InvId` / `InvoiceID`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(u64);

impl InvoiceId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Parses an inbound invoice field, reporting errors against `field`.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, PaymentError> {
        raw.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| PaymentError::invalid_field(field, e.to_string()))
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for InvoiceId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
