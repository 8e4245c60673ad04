//! Immutable gateway settings, built once at startup and shared by the
//! signer, the form builder and the verifier.

use secrecy::SecretString;

use super::CustomParamNames;

/// Default purchase form target.
pub const DEFAULT_FORM_TARGET: &str = "https://auth.robokassa.ru/Merchant/Index.aspx";

/// Default recurring payment form target.
pub const DEFAULT_RECURRING_FORM_TARGET: &str = "https://auth.robokassa.ru/Merchant/Recurring";

/// HTTP method the gateway uses for callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMethod {
    Get,
    #[default]
    Post,
}

impl TransportMethod {
    pub fn from_use_post(use_post: bool) -> Self {
        if use_post {
            TransportMethod::Post
        } else {
            TransportMethod::Get
        }
    }
}

/// Merchant credentials and protocol switches.
///
/// `password1` (secret A) signs outbound forms and success/fail redirects;
/// `password2` (secret B) signs asynchronous result notifications only.
#[derive(Debug)]
pub struct GatewaySettings {
    pub merchant_login: String,
    pub password1: SecretString,
    pub password2: SecretString,
    pub test_mode: bool,
    pub strict_check: bool,
    pub form_target: String,
    pub recurring_form_target: String,
    pub transport: TransportMethod,
    pub custom_params: CustomParamNames,
}

impl GatewaySettings {
    /// Settings with default targets, POST callbacks, no custom parameters,
    /// test mode and strict check off.
    pub fn new(
        merchant_login: impl Into<String>,
        password1: impl Into<String>,
        password2: impl Into<String>,
    ) -> Self {
        Self {
            merchant_login: merchant_login.into(),
            password1: SecretString::new(password1.into()),
            password2: SecretString::new(password2.into()),
            test_mode: false,
            strict_check: false,
            form_target: DEFAULT_FORM_TARGET.to_string(),
            recurring_form_target: DEFAULT_RECURRING_FORM_TARGET.to_string(),
            transport: TransportMethod::Post,
            custom_params: CustomParamNames::default(),
        }
    }

    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    pub fn with_strict_check(mut self, strict_check: bool) -> Self {
        self.strict_check = strict_check;
        self
    }

    pub fn with_transport(mut self, transport: TransportMethod) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_custom_params(mut self, names: CustomParamNames) -> Self {
        self.custom_params = names;
        self
    }

    pub fn with_form_targets(
        mut self,
        form_target: impl Into<String>,
        recurring_form_target: impl Into<String>,
    ) -> Self {
        self.form_target = form_target.into();
        self.recurring_form_target = recurring_form_target.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let settings = GatewaySettings::new("shop1", "pw1", "pw2");
        assert_eq!(settings.form_target, DEFAULT_FORM_TARGET);
        assert_eq!(settings.recurring_form_target, DEFAULT_RECURRING_FORM_TARGET);
        assert_eq!(settings.transport, TransportMethod::Post);
        assert!(!settings.test_mode);
        assert!(!settings.strict_check);
        assert!(settings.custom_params.is_empty());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let settings = GatewaySettings::new("shop1", "very-secret-1", "very-secret-2");
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("very-secret-1"));
        assert!(!debug.contains("very-secret-2"));
    }

    #[test]
    fn transport_from_use_post() {
        assert_eq!(TransportMethod::from_use_post(true), TransportMethod::Post);
        assert_eq!(TransportMethod::from_use_post(false), TransportMethod::Get);
    }
}
