use axum::{Router, routing::get};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::config::{AppConfig, ConfigError, EmailConfig, SupabaseConfig};
use crate::repository::quote_repo::SupabaseQuoteRepository;
use crate::router::quote_router::quote_router;
use crate::service::notification_service::QuoteNotifier;
use crate::service::quote_service::QuoteServiceImpl;
use crate::util::email::SmtpEmailService;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage client error: {0}")]
    Storage(String),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Invalid listen address: {0}")]
    Address(String),
}

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub fn new() -> Result<Self, AppError> {
        let config = AppConfig::from_env();
        let supabase_config = SupabaseConfig::from_env()?;

        let quote_repo = SupabaseQuoteRepository::new(&supabase_config)
            .map_err(|e| AppError::Storage(e.to_string()))?;

        let notifier = match EmailConfig::from_env()? {
            Some(email_config) => {
                let admin_email = email_config.admin_email.clone();
                match SmtpEmailService::new(email_config) {
                    Ok(mailer) => QuoteNotifier::new(Arc::new(mailer), admin_email),
                    Err(e) => {
                        warn!("Email service unavailable, notifications disabled: {e}");
                        QuoteNotifier::disabled()
                    }
                }
            }
            None => QuoteNotifier::disabled(),
        };

        let quote_service = Arc::new(QuoteServiceImpl::new(Arc::new(quote_repo), notifier));
        let router = build_router(quote_service, &config.cors_allowed_origins);
        Ok(App { config, router })
    }

    pub async fn start(self) -> Result<(), AppError> {
        let host = self.config.host.parse()
            .map_err(|_| AppError::Address(self.config.host.clone()))?;
        let addr = SocketAddr::new(host, self.config.port);
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

/// Full HTTP surface: quote routes, health check and CORS.
pub fn build_router(service: Arc<QuoteServiceImpl>, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(quote_router(service))
        .route("/health", get(|| async { "OK" }))
        .layer(cors_layer(cors_allowed_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {o}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
