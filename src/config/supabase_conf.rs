use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Connection settings for the hosted Supabase (PostgREST) table-store
#[derive(Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Anon or service key, sent as both `apikey` and bearer token
    pub api_key: String,
    /// Table holding quote submissions
    pub quote_table: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("api_key", &"[REDACTED]")
            .field("quote_table", &self.quote_table)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SupabaseConfig {
    /// Load Supabase configuration from environment variables
    ///
    /// Expected environment variables:
    /// - SUPABASE_URL: project URL (required)
    /// - SUPABASE_ANON_KEY: API key (required)
    /// - SUPABASE_QUOTE_TABLE: table name (defaults to `quotes`)
    /// - SUPABASE_TIMEOUT_SECS: request timeout (defaults to 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading Supabase configuration from environment variables");

        let url = env::var("SUPABASE_URL")
            .map_err(|_| {
                error!("SUPABASE_URL environment variable not found");
                ConfigError::EnvVarNotFound("SUPABASE_URL".to_string())
            })?;
        debug!("Supabase URL: {}", url);

        let api_key = env::var("SUPABASE_ANON_KEY")
            .map_err(|_| {
                error!("SUPABASE_ANON_KEY environment variable not found");
                ConfigError::EnvVarNotFound("SUPABASE_ANON_KEY".to_string())
            })?;
        debug!("Supabase key: [REDACTED]");

        let quote_table = env::var("SUPABASE_QUOTE_TABLE").unwrap_or_else(|_| {
            debug!("SUPABASE_QUOTE_TABLE not set, using default: quotes");
            "quotes".to_string()
        });

        let timeout_secs = env::var("SUPABASE_TIMEOUT_SECS")
            .unwrap_or_else(|_| {
                warn!("SUPABASE_TIMEOUT_SECS not set, using default: 10 seconds");
                "10".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid SUPABASE_TIMEOUT_SECS value");
                ConfigError::InvalidValue("Invalid SUPABASE_TIMEOUT_SECS value".to_string())
            })?;

        let config = SupabaseConfig {
            url: url.trim_end_matches('/').to_string(),
            api_key,
            quote_table,
            timeout_secs,
        };

        config.validate()?;
        info!("Supabase configuration loaded successfully");
        Ok(config)
    }

    /// Create SupabaseConfig for testing
    pub fn from_test_env() -> Self {
        SupabaseConfig {
            url: "http://localhost:54321".to_string(),
            api_key: "test-anon-key".to_string(),
            quote_table: "quotes".to_string(),
            timeout_secs: 2,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            error!("Supabase URL is empty");
            return Err(ConfigError::ValidationError("Supabase URL cannot be empty".to_string()));
        }

        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            error!("Supabase URL has no http(s) scheme");
            return Err(ConfigError::ValidationError("Supabase URL must start with http:// or https://".to_string()));
        }

        if self.api_key.is_empty() {
            error!("Supabase key is empty");
            return Err(ConfigError::ValidationError("Supabase key cannot be empty".to_string()));
        }

        if self.quote_table.is_empty() {
            error!("Supabase quote table is empty");
            return Err(ConfigError::ValidationError("Quote table cannot be empty".to_string()));
        }

        if self.timeout_secs == 0 {
            error!("Supabase timeout is 0");
            return Err(ConfigError::ValidationError("Supabase timeout must be greater than 0".to_string()));
        }

        Ok(())
    }

    /// REST endpoint of the quote table
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.quote_table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_config_is_valid() {
        let config = SupabaseConfig::from_test_env();
        assert!(config.validate().is_ok());
        assert_eq!(config.quote_table, "quotes");
    }

    #[test]
    fn test_validate_empty_key() {
        let mut config = SupabaseConfig::from_test_env();
        config.api_key = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_url_without_scheme() {
        let mut config = SupabaseConfig::from_test_env();
        config.url = "xyz.supabase.co".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = SupabaseConfig::from_test_env();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_table_url() {
        let config = SupabaseConfig::from_test_env();
        assert_eq!(config.table_url(), "http://localhost:54321/rest/v1/quotes");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = SupabaseConfig::from_test_env();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("test-anon-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
