//! Inbound gateway payloads: raw parameters and the parsed callback.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{CustomParams, InvoiceId, PaymentError};

/// Raw name/value pairs received from the gateway (query string or form body).
///
/// Values are trimmed; the first occurrence of a repeated name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundParams(BTreeMap<String, String>);

impl InboundParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `name`, treating blank values as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Returns the value of a required field.
    pub fn require(&self, name: &'static str) -> Result<&str, PaymentError> {
        self.get(name).ok_or(PaymentError::MissingField(name))
    }

    /// Returns the value of a required field no longer than `max_len` characters.
    pub fn require_bounded(&self, name: &'static str, max_len: usize) -> Result<&str, PaymentError> {
        let value = self.require(name)?;
        check_len(name, value, max_len)?;
        Ok(value)
    }

    /// Returns an optional field no longer than `max_len` characters.
    pub fn optional_bounded(
        &self,
        name: &'static str,
        max_len: usize,
    ) -> Result<Option<&str>, PaymentError> {
        match self.get(name) {
            Some(value) => {
                check_len(name, value, max_len)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn check_len(name: &'static str, value: &str, max_len: usize) -> Result<(), PaymentError> {
    if value.chars().count() > max_len {
        return Err(PaymentError::invalid_field(
            name,
            format!("longer than {} characters", max_len),
        ));
    }
    Ok(())
}

impl FromIterator<(String, String)> for InboundParams {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut params = BTreeMap::new();
        for (name, value) in iter {
            params
                .entry(name)
                .or_insert_with(|| value.trim().to_string());
        }
        Self(params)
    }
}

/// A parsed (and, depending on the flow, verified) gateway callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayCallback {
    pub invoice_id: InvoiceId,
    /// `OutSum` exactly as the gateway sent it.
    pub out_sum: String,
    pub culture: Option<String>,
    pub custom_params: CustomParams,
}
