//! Merchant-defined custom parameters (`shp<Name>` fields).
//!
//! Names are declared once at configuration time. Every flow echoes them and
//! signs them as `shp<Name>=<Value>` segments in a fixed order: declared names
//! are deduplicated and sorted alphabetically, so the order never depends on
//! how the names or the inbound fields were listed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::callback::InboundParams;
use super::fields::CUSTOM_PARAM_PREFIX;
use super::PaymentError;

/// The declared custom parameter names, in signing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomParamNames(Vec<String>);

impl CustomParamNames {
    /// Validates, deduplicates and sorts the declared names.
    ///
    /// Names are given without the `shp` prefix and may only contain ASCII
    /// letters, digits and underscores.
    pub fn new<I, S>(names: I) -> Result<Self, PaymentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut declared = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if name.is_empty() {
                return Err(PaymentError::invalid_field(
                    "custom_params",
                    "custom parameter name cannot be empty",
                ));
            }
            if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(PaymentError::invalid_field(
                    "custom_params",
                    format!("invalid custom parameter name '{}'", name),
                ));
            }
            declared.push(name);
        }
        declared.sort();
        declared.dedup();
        Ok(Self(declared))
    }

    /// Declared names in signing order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wire field name for a declared parameter (`user` -> `shpuser`).
    pub fn wire_name(name: &str) -> String {
        format!("{}{}", CUSTOM_PARAM_PREFIX, name)
    }

    /// Pulls the declared parameters out of an inbound payload.
    ///
    /// Undeclared `shp*` fields are not signed, so they are ignored.
    pub fn extract(&self, params: &InboundParams) -> CustomParams {
        self.iter()
            .filter_map(|name| {
                params
                    .get(&Self::wire_name(name))
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect()
    }
}

/// Custom parameter values keyed by declared name (without the prefix).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomParams(BTreeMap<String, String>);

impl CustomParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Value used in the checksum: missing parameters sign as an empty string.
    pub fn signing_value(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CustomParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_sorted_and_deduplicated() {
        let names = CustomParamNames::new(["user", "order", "user"]).unwrap();
        let ordered: Vec<&str> = names.iter().collect();
        assert_eq!(ordered, vec!["order", "user"]);
    }

    #[test]
    fn declaration_order_does_not_matter() {
        let a = CustomParamNames::new(["b", "a", "c"]).unwrap();
        let b = CustomParamNames::new(["c", "b", "a"]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(CustomParamNames::new([" "]).is_err());
    }

    #[test]
    fn name_with_separator_is_rejected() {
        assert!(CustomParamNames::new(["a=b"]).is_err());
        assert!(CustomParamNames::new(["a:b"]).is_err());
    }

    #[test]
    fn wire_name_adds_prefix() {
        assert_eq!(CustomParamNames::wire_name("user"), "shpuser");
    }

    #[test]
    fn extract_takes_only_declared_params() {
        let names = CustomParamNames::new(["user"]).unwrap();
        let params: InboundParams = vec![
            ("shpuser".to_string(), "17".to_string()),
            ("shpinjected".to_string(), "x".to_string()),
        ]
        .into_iter()
        .collect();

        let extracted = names.extract(&params);

        assert_eq!(extracted.get("user"), Some("17"));
        assert_eq!(extracted.get("injected"), None);
    }

    #[test]
    fn missing_param_signs_as_empty() {
        let params = CustomParams::new().with("user", "1");
        assert_eq!(params.signing_value("user"), "1");
        assert_eq!(params.signing_value("order"), "");
    }
}
