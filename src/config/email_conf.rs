use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// SMTP settings for the admin notification mail
#[derive(Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// SMTP username, also used as the sender address
    pub smtp_username: String,
    /// SMTP password for authentication
    pub smtp_password: String,
    /// Whether to upgrade the connection with STARTTLS
    pub use_starttls: bool,
    /// Recipient of quote notifications
    pub admin_email: String,
    /// From name (display name)
    pub from_name: String,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("use_starttls", &self.use_starttls)
            .field("admin_email", &self.admin_email)
            .field("from_name", &self.from_name)
            .field("connection_timeout_secs", &self.connection_timeout_secs)
            .finish()
    }
}

impl EmailConfig {
    /// Load email configuration from environment variables.
    ///
    /// Returns `Ok(None)` when SMTP_USERNAME, SMTP_PASSWORD or ADMIN_EMAIL is
    /// missing or blank, or when ADMIN_EMAIL is not an address: notifications
    /// are then disabled. A malformed port or timeout is an error.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        info!("Loading email configuration from environment variables");

        let (smtp_username, smtp_password, admin_email) = match (
            non_blank_var("SMTP_USERNAME"),
            non_blank_var("SMTP_PASSWORD"),
            non_blank_var("ADMIN_EMAIL"),
        ) {
            (Some(user), Some(pass), Some(admin)) => (user, pass, admin),
            _ => {
                warn!("Email credentials not provided. Email notifications disabled.");
                return Ok(None);
            }
        };
        if !admin_email.contains('@') {
            warn!("ADMIN_EMAIL '{}' is not an email address. Email notifications disabled.", admin_email);
            return Ok(None);
        }
        debug!("SMTP username: {}", smtp_username);
        debug!("SMTP password: [REDACTED]");
        debug!("Admin email: {}", admin_email);

        let smtp_host = env::var("SMTP_SERVER").unwrap_or_else(|_| {
            warn!("SMTP_SERVER not set, defaulting to smtp.gmail.com");
            "smtp.gmail.com".to_string()
        });
        debug!("SMTP host: {}", smtp_host);

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| {
                warn!("SMTP_PORT not set, defaulting to 587");
                "587".to_string()
            })
            .parse::<u16>()
            .map_err(|_| {
                error!("Invalid SMTP_PORT value");
                ConfigError::InvalidValue("Invalid SMTP_PORT value".to_string())
            })?;
        debug!("SMTP port: {}", smtp_port);

        let use_starttls = env::var("SMTP_USE_STARTTLS")
            .ok()
            .and_then(|s| s.parse::<bool>().ok())
            .unwrap_or(true);
        debug!("SMTP use STARTTLS: {}", use_starttls);

        let from_name = env::var("SMTP_FROM_NAME")
            .unwrap_or_else(|_| "Granite Joinery Quotes".to_string());

        let connection_timeout_secs = env::var("SMTP_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid SMTP_CONNECTION_TIMEOUT value");
                ConfigError::InvalidValue("Invalid SMTP_CONNECTION_TIMEOUT value".to_string())
            })?;
        debug!("Connection timeout: {} seconds", connection_timeout_secs);

        let config = EmailConfig {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            use_starttls,
            admin_email,
            from_name,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("Email configuration loaded successfully");
        Ok(Some(config))
    }

    /// Create EmailConfig for testing
    pub fn from_test_env() -> Self {
        EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: "quotes@example.com".to_string(),
            smtp_password: "test".to_string(),
            use_starttls: false,
            admin_email: "admin@example.com".to_string(),
            from_name: "Test Quotes".to_string(),
            connection_timeout_secs: 10,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.smtp_host.is_empty() {
            error!("SMTP host is empty");
            return Err(ConfigError::ValidationError("SMTP host cannot be empty".to_string()));
        }

        if self.smtp_port == 0 {
            error!("SMTP port is 0");
            return Err(ConfigError::ValidationError("SMTP port cannot be 0".to_string()));
        }

        if self.smtp_username.is_empty() {
            error!("SMTP username is empty");
            return Err(ConfigError::ValidationError("SMTP username cannot be empty".to_string()));
        }

        if self.smtp_password.is_empty() {
            error!("SMTP password is empty");
            return Err(ConfigError::ValidationError("SMTP password cannot be empty".to_string()));
        }

        if !self.admin_email.contains('@') {
            error!("Invalid admin email format");
            return Err(ConfigError::ValidationError("Invalid admin email format".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            error!("Connection timeout is 0");
            return Err(ConfigError::ValidationError("Connection timeout cannot be 0".to_string()));
        }

        Ok(())
    }
}

// Unset and whitespace-only values read the same
fn non_blank_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_config() {
        let config = EmailConfig::from_test_env();
        assert_eq!(config.smtp_host, "localhost");
        assert_eq!(config.smtp_port, 1025);
        assert!(!config.use_starttls);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = EmailConfig::from_test_env();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = EmailConfig::from_test_env();
        config.smtp_host = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = EmailConfig::from_test_env();
        config.smtp_port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_admin_email() {
        let mut config = EmailConfig::from_test_env();
        config.admin_email = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let mut config = EmailConfig::from_test_env();
        config.smtp_password = "hunter2".to_string();
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
