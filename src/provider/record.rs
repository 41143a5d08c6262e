//! Identity provider record model.
//!
//! A record carries a handful of well-known attributes and keeps every other
//! attribute (authenticator configs, claim mappings, provisioning connectors)
//! as opaque JSON so it round-trips unchanged to the delegate registry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_enabled() -> bool {
    true
}

/// A named identity provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProvider {
    /// Unique name within a tenant.
    #[serde(rename = "identityProviderName", alias = "name")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_realm_id: Option<String>,

    /// PEM encoded signing certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,

    #[serde(rename = "enable", default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub primary: bool,

    #[serde(default)]
    pub federation_hub: bool,

    /// Everything else in the document, passed through untouched.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl IdentityProvider {
    /// Create a record with the given name and default attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            description: None,
            alias: None,
            home_realm_id: None,
            certificate: None,
            enabled: true,
            primary: false,
            federation_hub: false,
            attributes: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an opaque attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Name of the provider.
    pub fn name(&self) -> &str {
        &self.name
    }
}
