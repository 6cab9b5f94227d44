use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, error, instrument};

use crate::dto::quote_dto::CreateQuoteRequest;
use crate::model::quote::Quote;
use crate::repository::quote_repo::QuoteRepository;
use crate::service::notification_service::QuoteNotifier;
use crate::util::error::ServiceError;

#[async_trait]
pub trait QuoteService: Send + Sync {
	async fn submit_quote(&self, request: CreateQuoteRequest) -> Result<Quote, ServiceError>;
	async fn list_quotes(&self) -> Result<Vec<Quote>, ServiceError>;
	async fn get_quote(&self, id: &str) -> Result<Quote, ServiceError>;
}

pub struct QuoteServiceImpl {
	pub quote_repo: Arc<dyn QuoteRepository>,
	pub notifier: QuoteNotifier,
}

impl QuoteServiceImpl {
	pub fn new(quote_repo: Arc<dyn QuoteRepository>, notifier: QuoteNotifier) -> Self {
		QuoteServiceImpl { quote_repo, notifier }
	}
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
	#[instrument(skip(self, request), fields(name = %request.name, service = %request.service))]
	async fn submit_quote(&self, request: CreateQuoteRequest) -> Result<Quote, ServiceError> {
		info!("Submitting new quote request");
		request.check()?;

		let quote = request.into_quote(Utc::now());
		let stored = match self.quote_repo.insert(quote).await {
			Ok(Some(stored)) => stored,
			Ok(None) => {
				error!("Store returned no inserted row");
				return Err(ServiceError::Persistence("store returned no inserted row".to_string()));
			}
			Err(e) => {
				error!("Failed to insert quote: {e}");
				return Err(ServiceError::Persistence(e.to_string()));
			}
		};
		if stored.id.as_deref().map_or(true, str::is_empty) {
			error!("Store returned a row without an id");
			return Err(ServiceError::Persistence("store returned a row without an id".to_string()));
		}

		self.notifier.notify(&stored).await;

		info!(id = ?stored.id, "Quote submitted successfully");
		Ok(stored)
	}

	#[instrument(skip(self))]
	async fn list_quotes(&self) -> Result<Vec<Quote>, ServiceError> {
		info!("Listing quotes");
		let res = self.quote_repo.select_all().await;
		match &res {
			Ok(quotes) => info!("Fetched {} quotes", quotes.len()),
			Err(e) => error!("Failed to list quotes: {e}"),
		}
		res.map_err(|e| ServiceError::Fetch(e.to_string()))
	}

	#[instrument(skip(self), fields(id = %id))]
	async fn get_quote(&self, id: &str) -> Result<Quote, ServiceError> {
		info!("Getting quote by id");
		match self.quote_repo.select_by_id(id).await {
			Ok(Some(quote)) => {
				info!("Quote fetched successfully");
				Ok(quote)
			}
			Ok(None) => {
				info!("Quote not found");
				Err(ServiceError::NotFound("Quote not found".to_string()))
			}
			Err(e) => {
				error!("Failed to fetch quote: {e}");
				Err(ServiceError::Fetch(e.to_string()))
			}
		}
	}
}
