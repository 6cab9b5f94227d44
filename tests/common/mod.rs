#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use granite_quote_api::app::app::build_router;
use granite_quote_api::dto::quote_dto::CreateQuoteRequest;
use granite_quote_api::model::quote::Quote;
use granite_quote_api::repository::memory_repo::InMemoryQuoteRepository;
use granite_quote_api::repository::quote_repo::QuoteRepository;
use granite_quote_api::repository::repository_error::{RepositoryError, RepositoryResult};
use granite_quote_api::service::notification_service::QuoteNotifier;
use granite_quote_api::service::quote_service::QuoteServiceImpl;
use granite_quote_api::util::email::{EmailError, EmailMessage, Mailer};
use serde_json::{json, Value};

pub const ADMIN_EMAIL: &str = "admin@granite.example";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

pub fn jane_payload() -> Value {
    json!({
        "name": "Jane Doe",
        "phone": "0821234567",
        "email": "jane@example.com",
        "location": "Cape Town",
        "service": "Kitchen Counters",
        "message": "Need a quote",
        "privacy": true
    })
}

pub fn jane_request() -> CreateQuoteRequest {
    serde_json::from_value(jane_payload()).expect("valid payload")
}

/// Captures every message instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// Behaves like an unreachable relay.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send_email(&self, _message: EmailMessage) -> Result<(), EmailError> {
        Err(EmailError::SmtpError("Connection refused".to_string()))
    }
}

/// Store that accepts inserts but reports no row back.
pub struct NoRowRepository;

#[async_trait]
impl QuoteRepository for NoRowRepository {
    async fn insert(&self, _quote: Quote) -> RepositoryResult<Option<Quote>> {
        Ok(None)
    }

    async fn select_all(&self) -> RepositoryResult<Vec<Quote>> {
        Ok(Vec::new())
    }

    async fn select_by_id(&self, _id: &str) -> RepositoryResult<Option<Quote>> {
        Ok(None)
    }
}

/// Store whose every call fails.
pub struct BrokenRepository;

#[async_trait]
impl QuoteRepository for BrokenRepository {
    async fn insert(&self, _quote: Quote) -> RepositoryResult<Option<Quote>> {
        Err(RepositoryError::connection("store unreachable"))
    }

    async fn select_all(&self) -> RepositoryResult<Vec<Quote>> {
        Err(RepositoryError::connection("store unreachable"))
    }

    async fn select_by_id(&self, _id: &str) -> RepositoryResult<Option<Quote>> {
        Err(RepositoryError::connection("store unreachable"))
    }
}

pub struct Fixture {
    pub repo: Arc<InMemoryQuoteRepository>,
    pub mailer: Arc<RecordingMailer>,
    pub service: Arc<QuoteServiceImpl>,
}

pub fn fixture() -> Fixture {
    let repo = Arc::new(InMemoryQuoteRepository::new());
    let mailer = Arc::new(RecordingMailer::default());
    let notifier = QuoteNotifier::new(mailer.clone(), ADMIN_EMAIL.to_string());
    let service = Arc::new(QuoteServiceImpl::new(repo.clone(), notifier));
    Fixture { repo, mailer, service }
}

pub fn service_with(repo: Arc<dyn QuoteRepository>, notifier: QuoteNotifier) -> Arc<QuoteServiceImpl> {
    Arc::new(QuoteServiceImpl::new(repo, notifier))
}

pub fn router(service: Arc<QuoteServiceImpl>) -> Router {
    build_router(service, &["http://localhost:3000".to_string()])
}
