use axum::{body::Bytes, extract::{State, Path}, response::IntoResponse, Json};
use crate::dto::quote_dto::{CreateQuoteRequest, QuoteDetailResponse, QuoteListResponse, QuoteResponse, StatusMessage};
use crate::service::quote_service::{QuoteServiceImpl, QuoteService};
use crate::util::error::{HandlerError, ServiceError};
use std::sync::Arc;
use tracing::{info, error, debug, warn};

pub const ROOT_MESSAGE: &str = "Granite Joinery Quote API is running";

pub async fn root_handler() -> Json<StatusMessage> {
    Json(StatusMessage { message: ROOT_MESSAGE.to_string() })
}

// Handler: Submit Quote (public)
pub async fn submit_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    body: Bytes,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[submit_quote_handler] Handler called");

    let request: CreateQuoteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("[submit_quote_handler] Invalid JSON: {}", e);
        HandlerError::bad_request("Invalid quote request", Some(e.to_string()))
    })?;
    debug!("[submit_quote_handler] Parsed JSON successfully");

    let stored = service.submit_quote(request).await.map_err(|e| {
        match &e {
            ServiceError::InvalidInput(msg) => warn!("[submit_quote_handler] Rejected: {}", msg),
            other => error!("[submit_quote_handler] Failed: {}", other),
        }
        HandlerError::from(e)
    })?;

    // submit_quote guarantees a non-empty id
    let id = stored.id.unwrap_or_default();
    Ok(Json(QuoteResponse::success(id)))
}

// Handler: List Quotes
pub async fn list_quotes_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotes = service.list_quotes().await.map_err(HandlerError::from)?;
    Ok(Json(QuoteListResponse { quotes }))
}

// Handler: Get Quote
pub async fn get_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let quote = service.get_quote(&id).await.map_err(HandlerError::from)?;
    Ok(Json(QuoteDetailResponse { quote }))
}
