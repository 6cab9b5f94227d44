use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::quote::{Quote, STATUS_NEW};
use crate::util::error::ServiceError;

pub const PRIVACY_REQUIRED_MESSAGE: &str = "Privacy policy agreement is required";
pub const SUBMITTED_MESSAGE: &str =
    "Quote request submitted successfully! We'll respond within 24 hours.";

// --- Validated DTOs for request validation ---

/// Body of `POST /api/quote` as sent by the website form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuoteRequest {
    pub name: String,

    pub phone: String,

    #[validate(email)]
    pub email: String,

    pub location: String,

    pub service: String,

    #[serde(default)]
    pub budget: Option<String>,

    #[serde(default)]
    pub timeline: Option<String>,

    pub message: String,

    #[serde(default)]
    pub consultation: bool,

    #[serde(default)]
    pub updates: bool,

    pub privacy: bool,
}

impl CreateQuoteRequest {
    /// Field rules first, then the consent rule.
    pub fn check(&self) -> Result<(), ServiceError> {
        self.validate()
            .map_err(|e| ServiceError::InvalidInput(format!("Validation error: {}", e)))?;
        if !self.privacy {
            return Err(ServiceError::InvalidInput(PRIVACY_REQUIRED_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// Builds the row to insert; the store assigns the id.
    pub fn into_quote(self, created_at: DateTime<Utc>) -> Quote {
        Quote {
            id: None,
            name: self.name,
            phone: self.phone,
            email: self.email,
            location: self.location,
            service: self.service,
            budget: self.budget,
            timeline: self.timeline,
            message: self.message,
            consultation_requested: self.consultation,
            marketing_updates: self.updates,
            privacy_agreed: self.privacy,
            created_at,
            status: STATUS_NEW.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub id: String,
    pub message: String,
    pub status: String,
}

impl QuoteResponse {
    pub fn success(id: String) -> Self {
        Self {
            id,
            message: SUBMITTED_MESSAGE.to_string(),
            status: "success".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteListResponse {
    pub quotes: Vec<Quote>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteDetailResponse {
    pub quote: Quote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}
