use std::env;

pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,https://granitecarpentry.co.za";

pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);
        let origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string());
        AppConfig {
            host,
            port,
            cors_allowed_origins: parse_origins(&origins),
        }
    }
}

/// Splits a comma-separated origin list. Trailing slashes are dropped since
/// browsers never send them in the `Origin` header.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
