use crate::client::{DEFAULT_CATEGORY_LIST_URL, DEFAULT_RANKING_URL};
use crate::error::FinderError;
use crate::fallback::DEFAULT_SEARCH_BASE_URL;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix for all settings.
pub const ENV_PREFIX: &str = "RECIPE_FINDER";
/// Secret names accepted as plain environment variables.
pub const LEGACY_APP_ID_VAR: &str = "RAKUTEN_APP_ID";
pub const LEGACY_WEBHOOK_VAR: &str = "DISCORD_WEBHOOK_URL";
/// Upper bound for `cache_ttl_hours` (one year).
pub const MAX_CACHE_TTL_HOURS: u64 = 365 * 24;

/// Runtime settings for the finder
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Application id issued by the recipe provider
    #[serde(default)]
    pub application_id: String,
    /// Webhook that receives forwarded recipes
    #[serde(default)]
    pub webhook_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// How long a category index is reused, in hours
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// Provider endpoints, overridable for proxies or testing
#[derive(Debug, Deserialize, Clone)]
pub struct EndpointsConfig {
    #[serde(default = "default_category_list_url")]
    pub category_list_url: String,
    #[serde(default = "default_ranking_url")]
    pub ranking_url: String,
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            category_list_url: default_category_list_url(),
            ranking_url: default_ranking_url(),
            search_base_url: default_search_base_url(),
        }
    }
}

// Default value functions
fn default_timeout() -> u64 {
    30
}

fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_category_list_url() -> String {
    DEFAULT_CATEGORY_LIST_URL.to_string()
}

fn default_ranking_url() -> String {
    DEFAULT_RANKING_URL.to_string()
}

fn default_search_base_url() -> String {
    DEFAULT_SEARCH_BASE_URL.to_string()
}

impl Settings {
    /// Load and validate settings.
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. config.toml file in current directory
    /// 3. RAKUTEN_APP_ID / DISCORD_WEBHOOK_URL for the two secrets
    /// 4. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__ENDPOINTS__RANKING_URL
    pub fn load() -> Result<Self, FinderError> {
        let mut settings = Self::from_sources(None, ENV_PREFIX)?;

        if settings.application_id.trim().is_empty() {
            if let Ok(value) = std::env::var(LEGACY_APP_ID_VAR) {
                settings.application_id = value;
            }
        }
        if settings.webhook_url.trim().is_empty() {
            if let Ok(value) = std::env::var(LEGACY_WEBHOOK_VAR) {
                settings.webhook_url = value;
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from an optional file (`config.toml` in the working
    /// directory when `None`) and environment variables under `env_prefix`.
    ///
    /// No validation happens here.
    pub fn from_sources(file: Option<&Path>, env_prefix: &str) -> Result<Self, FinderError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            // Optional config file (can be missing)
            None => File::with_name("config").required(false),
        };

        let settings = Config::builder()
            .add_source(file_source)
            // Use double underscore for nested: RECIPE_FINDER__ENDPOINTS__RANKING_URL
            .add_source(Environment::with_prefix(env_prefix).separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Category cache lifetime.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours.saturating_mul(60 * 60))
    }

    /// Startup check: both secrets must be present and the cache lifetime
    /// must be between one hour and [`MAX_CACHE_TTL_HOURS`].
    pub fn validate(&self) -> Result<(), FinderError> {
        let mut missing = Vec::new();
        if self.application_id.trim().is_empty() {
            missing.push("application_id");
        }
        if self.webhook_url.trim().is_empty() {
            missing.push("webhook_url");
        }

        if !missing.is_empty() {
            return Err(FinderError::Configuration(format!(
                "missing required setting(s): {}",
                missing.join(", ")
            )));
        }

        if !(1..=MAX_CACHE_TTL_HOURS).contains(&self.cache_ttl_hours) {
            return Err(FinderError::Configuration(format!(
                "cache_ttl_hours must be between 1 and {}, got {}",
                MAX_CACHE_TTL_HOURS, self.cache_ttl_hours
            )));
        }

        Ok(())
    }
}
