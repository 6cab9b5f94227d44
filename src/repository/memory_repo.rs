use crate::model::quote::Quote;
use crate::repository::quote_repo::QuoteRepository;
use crate::repository::repository_error::RepositoryResult;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local stand-in for the hosted store. Assigns UUID ids the way a
/// `uuid default gen_random_uuid()` key column would.
#[derive(Default)]
pub struct InMemoryQuoteRepository {
    rows: RwLock<Vec<Quote>>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn insert(&self, mut quote: Quote) -> RepositoryResult<Option<Quote>> {
        quote.id = Some(Uuid::new_v4().to_string());
        self.rows.write().await.push(quote.clone());
        Ok(Some(quote))
    }

    async fn select_all(&self) -> RepositoryResult<Vec<Quote>> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn select_by_id(&self, id: &str) -> RepositoryResult<Option<Quote>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|q| q.id.as_deref() == Some(id))
            .cloned())
    }
}
