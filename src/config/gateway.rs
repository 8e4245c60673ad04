//! Payment gateway configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::domain::payment::{
    CustomParamNames, GatewaySettings, TransportMethod, DEFAULT_FORM_TARGET,
    DEFAULT_RECURRING_FORM_TARGET,
};

use super::error::ValidationError;

/// Gateway credentials and protocol switches
///
/// Secrets are redacted from `Debug` output. There is no `Clone`: convert once
/// with [`GatewayConfig::to_settings`] and share the result behind an `Arc`.
#[derive(Debug, Default, Deserialize)]
pub struct GatewayConfig {
    /// Merchant identifier (`MerchantLogin`)
    #[serde(default)]
    pub merchant_login: String,

    /// Secret A: outbound forms and success/fail redirects
    pub password1: Option<SecretString>,

    /// Secret B: result notifications
    pub password2: Option<SecretString>,

    /// Send `isTest=1` with outbound forms
    #[serde(default)]
    pub test_mode: bool,

    /// Require a stored result notification before accepting a success redirect
    #[serde(default)]
    pub strict_check: bool,

    /// Purchase form target URL
    #[serde(default = "default_form_target")]
    pub form_target: String,

    /// Recurring payment form target URL
    #[serde(default = "default_recurring_form_target")]
    pub recurring_form_target: String,

    /// Callback transport: POST when true, GET otherwise
    #[serde(default = "default_use_post")]
    pub use_post: bool,

    /// Declared custom parameter names without the `shp` prefix (comma-separated)
    pub custom_params: Option<String>,
}

impl GatewayConfig {
    /// Callback transport method
    pub fn transport(&self) -> TransportMethod {
        TransportMethod::from_use_post(self.use_post)
    }

    /// Parse the declared custom parameter names
    pub fn custom_param_names(&self) -> Result<CustomParamNames, ValidationError> {
        let names = self
            .custom_params
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        CustomParamNames::new(names).map_err(|e| ValidationError::InvalidCustomParams(e.to_string()))
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.merchant_login.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__MERCHANT_LOGIN"));
        }
        if !has_secret(&self.password1) {
            return Err(ValidationError::MissingRequired("GATEWAY__PASSWORD1"));
        }
        if !has_secret(&self.password2) {
            return Err(ValidationError::MissingRequired("GATEWAY__PASSWORD2"));
        }
        validate_target("form_target", &self.form_target)?;
        validate_target("recurring_form_target", &self.recurring_form_target)?;
        self.custom_param_names()?;
        Ok(())
    }

    /// Build the immutable settings shared by the signer, form builder and verifier
    pub fn to_settings(&self) -> Result<GatewaySettings, ValidationError> {
        self.validate()?;
        let password1 = expose(&self.password1, "GATEWAY__PASSWORD1")?;
        let password2 = expose(&self.password2, "GATEWAY__PASSWORD2")?;

        Ok(
            GatewaySettings::new(self.merchant_login.trim(), password1, password2)
                .with_test_mode(self.test_mode)
                .with_strict_check(self.strict_check)
                .with_transport(self.transport())
                .with_form_targets(&self.form_target, &self.recurring_form_target)
                .with_custom_params(self.custom_param_names()?),
        )
    }
}

fn has_secret(secret: &Option<SecretString>) -> bool {
    secret
        .as_ref()
        .is_some_and(|s| !s.expose_secret().is_empty())
}

fn expose(secret: &Option<SecretString>, name: &'static str) -> Result<String, ValidationError> {
    secret
        .as_ref()
        .map(|s| s.expose_secret().clone())
        .ok_or(ValidationError::MissingRequired(name))
}

fn validate_target(field: &'static str, target: &str) -> Result<(), ValidationError> {
    let url = Url::parse(target).map_err(|e| ValidationError::InvalidFormTarget {
        field,
        reason: e.to_string(),
    })?;
    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ValidationError::InvalidFormTarget {
            field,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(())
}

fn default_form_target() -> String {
    DEFAULT_FORM_TARGET.to_string()
}

fn default_recurring_form_target() -> String {
    DEFAULT_RECURRING_FORM_TARGET.to_string()
}

fn default_use_post() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> GatewayConfig {
        GatewayConfig {
            merchant_login: "shop1".to_string(),
            password1: Some(SecretString::new("pw1".to_string())),
            password2: Some(SecretString::new("pw2".to_string())),
            form_target: default_form_target(),
            recurring_form_target: default_recurring_form_target(),
            use_post: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_merchant_login() {
        let config = GatewayConfig {
            merchant_login: "  ".to_string(),
            ..valid_config()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("GATEWAY__MERCHANT_LOGIN"))
        );
    }

    #[test]
    fn test_validation_missing_secrets() {
        let config = GatewayConfig {
            password1: None,
            ..valid_config()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("GATEWAY__PASSWORD1"))
        );

        let config = GatewayConfig {
            password2: Some(SecretString::new(String::new())),
            ..valid_config()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("GATEWAY__PASSWORD2"))
        );
    }

    #[test]
    fn test_validation_invalid_target() {
        let config = GatewayConfig {
            form_target: "not a url".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidFormTarget { field: "form_target", .. })
        ));

        let config = GatewayConfig {
            recurring_form_target: "ftp://example.com/pay".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidFormTarget { field: "recurring_form_target", .. })
        ));
    }

    #[test]
    fn test_custom_params_are_parsed_and_sorted() {
        let config = GatewayConfig {
            custom_params: Some("user, order,,user".to_string()),
            ..valid_config()
        };
        let names: Vec<String> = config
            .custom_param_names()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(names, vec!["order", "user"]);
    }

    #[test]
    fn test_invalid_custom_param_name() {
        let config = GatewayConfig {
            custom_params: Some("user-id".to_string()),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCustomParams(_))
        ));
    }

    #[test]
    fn test_to_settings() {
        let config = GatewayConfig {
            test_mode: true,
            strict_check: true,
            use_post: false,
            custom_params: Some("user".to_string()),
            ..valid_config()
        };

        let settings = config.to_settings().unwrap();

        assert_eq!(settings.merchant_login, "shop1");
        assert!(settings.test_mode);
        assert!(settings.strict_check);
        assert_eq!(settings.transport, TransportMethod::Get);
        assert_eq!(settings.custom_params.len(), 1);
        assert_eq!(settings.password2.expose_secret(), "pw2");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", valid_config());
        assert!(!debug.contains("pw1"));
        assert!(!debug.contains("pw2"));
    }
}
