//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `ROBOKASSA` prefix and
//! nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use robokassa_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod gateway;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration; notifications stay in memory when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Payment gateway credentials and switches
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ROBOKASSA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ROBOKASSA__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ROBOKASSA__GATEWAY__PASSWORD1=...` -> `gateway.password1 = ...`
    /// - `ROBOKASSA__GATEWAY__CUSTOM_PARAMS=user,order` -> declared `shpuser`, `shporder`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ROBOKASSA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.gateway.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "ROBOKASSA__GATEWAY__MERCHANT_LOGIN",
        "ROBOKASSA__GATEWAY__PASSWORD1",
        "ROBOKASSA__GATEWAY__PASSWORD2",
        "ROBOKASSA__GATEWAY__STRICT_CHECK",
        "ROBOKASSA__GATEWAY__USE_POST",
        "ROBOKASSA__GATEWAY__CUSTOM_PARAMS",
        "ROBOKASSA__DATABASE__URL",
        "ROBOKASSA__SERVER__PORT",
        "ROBOKASSA__SERVER__ENVIRONMENT",
    ];

    fn set_minimal_env() {
        env::set_var("ROBOKASSA__GATEWAY__MERCHANT_LOGIN", "shop1");
        env::set_var("ROBOKASSA__GATEWAY__PASSWORD1", "pw1");
        env::set_var("ROBOKASSA__GATEWAY__PASSWORD2", "pw2");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.gateway.merchant_login, "shop1");
        assert!(config.database.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gateway_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.gateway.use_post);
        assert!(!config.gateway.strict_check);
        assert!(!config.gateway.test_mode);
        assert_eq!(
            config.gateway.form_target,
            "https://auth.robokassa.ru/Merchant/Index.aspx"
        );
    }

    #[test]
    fn test_gateway_switches_and_custom_params() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ROBOKASSA__GATEWAY__STRICT_CHECK", "true");
        env::set_var("ROBOKASSA__GATEWAY__USE_POST", "false");
        env::set_var("ROBOKASSA__GATEWAY__CUSTOM_PARAMS", "user,order");
        let result = AppConfig::load();
        clear_env();

        let settings = result.unwrap().gateway.to_settings().unwrap();
        assert!(settings.strict_check);
        assert_eq!(
            settings.transport,
            crate::domain::payment::TransportMethod::Get
        );
        assert_eq!(settings.custom_params.len(), 2);
    }

    #[test]
    fn test_missing_secret_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ROBOKASSA__GATEWAY__MERCHANT_LOGIN", "shop1");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("GATEWAY__PASSWORD1"))
        );
    }

    #[test]
    fn test_database_section_is_optional() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ROBOKASSA__DATABASE__URL", "postgresql://test@localhost/test");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        let database = config.database.as_ref().unwrap();
        assert_eq!(database.url, "postgresql://test@localhost/test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ROBOKASSA__SERVER__PORT", "3000");
        env::set_var("ROBOKASSA__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
    }
}
