use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::model::quote::Quote;
use crate::util::email::Mailer;
use crate::util::quote_email::render_quote_notification;

/// Best-effort admin notification. Holds nothing when mail is not configured.
#[derive(Clone)]
pub struct QuoteNotifier {
    target: Option<(Arc<dyn Mailer>, String)>,
}

impl QuoteNotifier {
    pub fn new(mailer: Arc<dyn Mailer>, admin_email: String) -> Self {
        Self { target: Some((mailer, admin_email)) }
    }

    pub fn disabled() -> Self {
        Self { target: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }

    /// Never fails: any error on the mail path is logged and dropped.
    #[instrument(skip(self, quote), fields(id = ?quote.id))]
    pub async fn notify(&self, quote: &Quote) {
        let Some((mailer, admin_email)) = &self.target else {
            warn!("Email credentials not configured, skipping email notification");
            return;
        };

        let message = render_quote_notification(quote, admin_email);
        match mailer.send_email(message).await {
            Ok(()) => info!("Email notification sent successfully to {}", admin_email),
            Err(e) => error!("Failed to send email notification: {}", e),
        }
    }
}
