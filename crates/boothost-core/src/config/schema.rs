use crate::model::ProductIdentity;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigSchemaError
///

#[derive(Debug, ThisError)]
pub enum ConfigSchemaError {
    #[error("validation error: {0}")]
    ValidationError(String),
}

pub const NAME_MAX_BYTES: usize = 64;

fn validate_name(value: &str, context: &str) -> Result<(), ConfigSchemaError> {
    if value.is_empty() {
        return Err(ConfigSchemaError::ValidationError(format!(
            "{context} must not be empty"
        )));
    }
    if value.len() > NAME_MAX_BYTES {
        return Err(ConfigSchemaError::ValidationError(format!(
            "{context} '{value}' exceeds {NAME_MAX_BYTES} bytes",
        )));
    }

    Ok(())
}

// environment variable names cannot hold '=' or NUL on any platform
fn validate_env_name(value: &str, context: &str) -> Result<(), ConfigSchemaError> {
    validate_name(value, context)?;
    if value.contains(['=', '\0']) {
        return Err(ConfigSchemaError::ValidationError(format!(
            "{context} '{value}' is not a valid environment variable name"
        )));
    }

    Ok(())
}

///
/// Validate
///

pub trait Validate {
    fn validate(&self) -> Result<(), ConfigSchemaError>;
}

///
/// BootstrapConfig
///
/// Build-time customization points. Every key is optional; absent keys take
/// the compiled-in defaults silently.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    pub product_name: String,
    pub product_version: String,

    /// Leaf directory under the platform app-data root.
    pub vendor_dir: String,

    /// Environment variable that overrides the user-data directory.
    pub user_data_env: String,

    pub native_messaging: NativeMessagingConfig,
    pub upstream_api: UpstreamApiConfig,
}

impl BootstrapConfig {
    #[must_use]
    pub fn product_identity(&self) -> ProductIdentity {
        ProductIdentity::new(&self.product_name, &self.product_version)
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            product_name: "Boothost".to_string(),
            product_version: crate::VERSION.to_string(),
            vendor_dir: "boothost".to_string(),
            user_data_env: "BOOTHOST_USER_DATA_DIR".to_string(),
            native_messaging: NativeMessagingConfig::default(),
            upstream_api: UpstreamApiConfig::default(),
        }
    }
}

impl Validate for BootstrapConfig {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        validate_name(&self.product_name, "product_name")?;
        validate_name(&self.product_version, "product_version")?;
        validate_name(&self.vendor_dir, "vendor_dir")?;
        if self.vendor_dir.contains(['/', '\\']) {
            return Err(ConfigSchemaError::ValidationError(format!(
                "vendor_dir '{}' must be a single path component",
                self.vendor_dir
            )));
        }
        validate_env_name(&self.user_data_env, "user_data_env")?;

        self.native_messaging.validate()?;
        self.upstream_api.validate()?;

        Ok(())
    }
}

///
/// NativeMessagingConfig
///
/// Where host-side native messaging manifests of a related vendor
/// application are looked up on POSIX platforms.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NativeMessagingConfig {
    /// Relative path that replaces the last component of the default
    /// user-data directory.
    pub vendor_path: String,
    pub system_dir_linux: String,
    pub system_dir_macos: String,
}

impl Default for NativeMessagingConfig {
    fn default() -> Self {
        Self {
            vendor_path: "Google/Chrome".to_string(),
            system_dir_linux: "/etc/opt/chrome/native-messaging-hosts".to_string(),
            system_dir_macos: "/Library/Google/Chrome/NativeMessagingHosts".to_string(),
        }
    }
}

impl Validate for NativeMessagingConfig {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        validate_name(&self.vendor_path, "native_messaging.vendor_path")?;
        if self.vendor_path.starts_with('/') {
            return Err(ConfigSchemaError::ValidationError(
                "native_messaging.vendor_path must be relative".to_string(),
            ));
        }

        for (dir, context) in [
            (&self.system_dir_linux, "native_messaging.system_dir_linux"),
            (&self.system_dir_macos, "native_messaging.system_dir_macos"),
        ] {
            if !dir.starts_with('/') {
                return Err(ConfigSchemaError::ValidationError(format!(
                    "{context} '{dir}' must be absolute"
                )));
            }
        }

        Ok(())
    }
}

///
/// UpstreamApiConfig
///
/// Environment defaults for the upstream API. Applied only when the caller
/// has not already set the variable.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamApiConfig {
    pub endpoint_var: String,
    pub endpoint: String,
    pub key_var: String,
    pub key: String,
}

impl Default for UpstreamApiConfig {
    fn default() -> Self {
        Self {
            endpoint_var: "UPSTREAM_API_ENDPOINT".to_string(),
            endpoint: "https://www.googleapis.com/".to_string(),
            key_var: "UPSTREAM_API_KEY".to_string(),
            key: "dummytoken".to_string(),
        }
    }
}

impl Validate for UpstreamApiConfig {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        validate_env_name(&self.endpoint_var, "upstream_api.endpoint_var")?;
        validate_env_name(&self.key_var, "upstream_api.key_var")?;

        Ok(())
    }
}
