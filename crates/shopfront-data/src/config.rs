//! Storefront API configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Storefront API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2025-01";

/// Environment variable naming the TOML file read by [`StorefrontConfig::discover`].
pub const CONFIG_PATH_VAR: &str = "SHOPFRONT_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "shopfront.toml";

/// Connection settings for a shop's Storefront API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Shop domain, e.g. `snowdevil.myshopify.com`.
    pub store_domain: String,
    /// Storefront API version.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Public Storefront API access token.
    pub public_access_token: String,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

impl StorefrontConfig {
    pub fn new(store_domain: impl Into<String>, public_access_token: impl Into<String>) -> Self {
        Self {
            store_domain: store_domain.into(),
            api_version: default_api_version(),
            public_access_token: public_access_token.into(),
        }
    }

    /// Set the Storefront API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// GraphQL endpoint URL.
    pub fn endpoint(&self) -> String {
        let domain = self
            .store_domain
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        format!("https://{}/api/{}/graphql.json", domain, self.api_version)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()
    }

    /// Load from a TOML file.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Read the same settings from Spin application variables.
    #[cfg(feature = "spin")]
    pub fn from_spin_variables() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| spin_sdk::variables::get(&key.to_ascii_lowercase()).ok())
    }

    /// First configuration found among Spin variables (with the `spin`
    /// feature), environment variables, then the TOML file at
    /// `SHOPFRONT_CONFIG` or `shopfront.toml`.
    ///
    /// When no file is readable the environment error is returned, since
    /// that names the missing setting.
    pub fn discover() -> Result<Self, ConfigError> {
        #[cfg(feature = "spin")]
        {
            if let Ok(config) = Self::from_spin_variables() {
                return Ok(config);
            }
        }
        Self::discover_with(|key| std::env::var(key).ok())
    }

    fn discover_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env_error = match Self::from_lookup(&lookup) {
            Ok(config) => return Ok(config),
            Err(e) => e,
        };
        let path = lookup(CONFIG_PATH_VAR).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        match Self::load(&path) {
            Err(ConfigError::Io { .. }) => Err(env_error),
            other => other,
        }
    }

    /// Read `PUBLIC_STORE_DOMAIN`, `PUBLIC_STOREFRONT_API_TOKEN` and the optional
    /// `PUBLIC_STOREFRONT_API_VERSION`.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let domain = lookup("PUBLIC_STORE_DOMAIN").ok_or(ConfigError::Missing("store_domain"))?;
        let token = lookup("PUBLIC_STOREFRONT_API_TOKEN")
            .ok_or(ConfigError::Missing("public_access_token"))?;

        let mut config = Self::new(domain, token);
        if let Some(version) = lookup("PUBLIC_STOREFRONT_API_VERSION") {
            config = config.with_api_version(version);
        }
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.store_domain.trim().is_empty() {
            return Err(ConfigError::Missing("store_domain"));
        }
        if self.public_access_token.trim().is_empty() {
            return Err(ConfigError::Missing("public_access_token"));
        }
        Ok(self)
    }
}
