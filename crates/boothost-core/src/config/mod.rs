pub mod schema;

use crate::{Error, ErrorOrigin};
use schema::{ConfigSchemaError, Validate};
use thiserror::Error as ThisError;

pub use schema::{BootstrapConfig, NativeMessagingConfig, UpstreamApiConfig};

/// Errors related to configuration parsing.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    /// TOML could not be parsed into the expected structure.
    #[error("toml error: {0}")]
    CannotParseToml(String),

    /// Wrapper for data schema-level errors.
    #[error(transparent)]
    ConfigSchema(#[from] ConfigSchemaError),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::config(ErrorOrigin::Config, err.to_string())
    }
}

impl BootstrapConfig {
    /// Parse and validate a TOML document. Missing keys fall back to the
    /// compiled-in defaults.
    pub fn from_toml(config_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(config_str).map_err(|e| ConfigError::CannotParseToml(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = BootstrapConfig::from_toml("").unwrap();
        assert_eq!(cfg.product_name, BootstrapConfig::default().product_name);
        assert_eq!(cfg.user_data_env, "BOOTHOST_USER_DATA_DIR");
    }

    #[test]
    fn overrides_are_applied() {
        let toml = r#"
            product_name = "Acme"
            vendor_dir = "acme"

            [upstream_api]
            endpoint = "https://api.acme.test/"

            [native_messaging]
            vendor_path = "Acme/Legacy"
        "#;

        let cfg = BootstrapConfig::from_toml(toml).unwrap();
        assert_eq!(cfg.product_name, "Acme");
        assert_eq!(cfg.vendor_dir, "acme");
        assert_eq!(cfg.upstream_api.endpoint, "https://api.acme.test/");
        assert_eq!(cfg.upstream_api.key_var, "UPSTREAM_API_KEY");
        assert_eq!(cfg.native_messaging.vendor_path, "Acme/Legacy");
    }

    #[test]
    fn product_identity_comes_from_plain_keys() {
        let cfg = BootstrapConfig::from_toml("product_name = \"Acme\"\nproduct_version = \"9.1\"")
            .unwrap();
        assert_eq!(
            cfg.product_identity(),
            crate::model::ProductIdentity::new("Acme", "9.1")
        );

        // the identity is not a nested table of its own
        assert!(BootstrapConfig::from_toml("[product]\nname = \"Acme\"").is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = BootstrapConfig::from_toml("crash_upload_url = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::CannotParseToml(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = BootstrapConfig::from_toml("vendor_dir = \"a/b\"").unwrap_err();
        assert!(matches!(err, ConfigError::ConfigSchema(_)));

        let err = BootstrapConfig::from_toml("user_data_env = \"A=B\"").unwrap_err();
        assert!(err.to_string().contains("user_data_env"));
    }
}
