//! Configuration for the identity provider management component.

use crate::error::{IdpMgtError, IdpMgtResult};
use crate::provider::DEFAULT_SHARED_PREFIX;
use crate::registry::{DEFAULT_IDP_CONFIG, SUPER_TENANT_DOMAIN};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where file-based providers live and how they are classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentConfig {
    /// Directory holding one provider document per file.
    pub config_dir: PathBuf,

    /// Name prefix marking providers shared across tenants.
    pub shared_prefix: String,

    /// Tenant domain that owns shared providers.
    pub tenant_domain: String,

    /// Name of the placeholder record the delegate returns for unknown names.
    pub default_idp_name: String,
}

impl ComponentConfig {
    /// Relative location of provider documents under the server config directory.
    pub const IDP_CONFIG_SUBDIR: [&'static str; 2] = ["identity", "identity-providers"];

    /// Derive the provider directory from the server's configuration directory.
    pub fn from_carbon_config_dir<P: AsRef<Path>>(carbon_config_dir: P) -> Self {
        let config_dir = Self::IDP_CONFIG_SUBDIR
            .iter()
            .fold(carbon_config_dir.as_ref().to_path_buf(), |dir, part| {
                dir.join(part)
            });
        Self {
            config_dir,
            ..Self::default()
        }
    }

    pub fn builder() -> ComponentConfigBuilder {
        ComponentConfigBuilder::new()
    }

    /// Check the settings before they drive a sync pass.
    ///
    /// The shared prefix and tenant domain must not be blank. A blank prefix
    /// would make every provider shared.
    pub fn validate(&self) -> IdpMgtResult<()> {
        if self.shared_prefix.trim().is_empty() {
            return Err(IdpMgtError::invalid_config("shared prefix must not be empty"));
        }
        if self.tenant_domain.trim().is_empty() {
            return Err(IdpMgtError::invalid_config("tenant domain must not be empty"));
        }
        Ok(())
    }
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("conf").join("identity").join("identity-providers"),
            shared_prefix: DEFAULT_SHARED_PREFIX.to_string(),
            tenant_domain: SUPER_TENANT_DOMAIN.to_string(),
            default_idp_name: DEFAULT_IDP_CONFIG.to_string(),
        }
    }
}

/// Fluent builder for [`ComponentConfig`].
///
/// # Example
/// ```rust
/// use idp_registry::component::ComponentConfig;
///
/// let config = ComponentConfig::builder()
///     .carbon_config_dir("/opt/is/repository/conf")
///     .shared_prefix("SHARED_")
///     .build();
///
/// assert!(config.config_dir.ends_with("identity/identity-providers"));
/// assert_eq!(config.shared_prefix, "SHARED_");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComponentConfigBuilder {
    config: ComponentConfig,
}

impl ComponentConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the provider directory under a server configuration directory.
    pub fn carbon_config_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.config.config_dir = ComponentConfig::from_carbon_config_dir(dir).config_dir;
        self
    }

    /// Use an explicit provider directory.
    pub fn config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.config_dir = dir.into();
        self
    }

    pub fn shared_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.shared_prefix = prefix.into();
        self
    }

    pub fn tenant_domain(mut self, tenant_domain: impl Into<String>) -> Self {
        self.config.tenant_domain = tenant_domain.into();
        self
    }

    pub fn default_idp_name(mut self, name: impl Into<String>) -> Self {
        self.config.default_idp_name = name.into();
        self
    }

    pub fn build(self) -> ComponentConfig {
        self.config
    }
}
