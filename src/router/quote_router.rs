use axum::{Router, routing::{post, get}};
use crate::handler::quote_handler::{
    root_handler,
    submit_quote_handler,
    list_quotes_handler,
    get_quote_handler,
};
use std::sync::Arc;
use crate::service::quote_service::QuoteServiceImpl;


pub fn quote_router(service: Arc<QuoteServiceImpl>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/quote", post(submit_quote_handler))
        .route("/api/quotes", get(list_quotes_handler))
        .route("/api/quotes/{id}", get(get_quote_handler))
        .with_state(service)
}
