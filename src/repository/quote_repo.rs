use crate::model::quote::Quote;
use crate::repository::repository_error::{
    RepositoryError, RepositoryResult,
};
use crate::config::supabase_conf::SupabaseConfig;
use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use tracing::{info, error, debug};

/// PostgreSQL `invalid_text_representation`: the id could not be cast to the
/// key column type, so no row can match it.
const PG_INVALID_TEXT_REPRESENTATION: &str = "22P02";

#[async_trait]
pub trait QuoteRepository : Send + Sync {
    /// Inserts one row and returns it as stored, or `None` if the store
    /// reported no inserted row.
    async fn insert(&self, quote: Quote) -> RepositoryResult<Option<Quote>>;
    /// All rows, most recent `created_at` first.
    async fn select_all(&self) -> RepositoryResult<Vec<Quote>>;
    async fn select_by_id(&self, id: &str) -> RepositoryResult<Option<Quote>>;
}

pub struct SupabaseQuoteRepository {
    client: Client,
    table_url: String,
}

impl SupabaseQuoteRepository {
    /// Create a new SupabaseQuoteRepository using SupabaseConfig
    pub fn new(config: &SupabaseConfig) -> RepositoryResult<Self> {
        let mut headers = header::HeaderMap::new();
        let key = header::HeaderValue::from_str(&config.api_key)
            .map_err(|e| RepositoryError::connection(format!("Invalid Supabase key: {}", e)))?;
        let bearer = header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| RepositoryError::connection(format!("Invalid Supabase key: {}", e)))?;
        headers.insert("apikey", key);
        headers.insert(header::AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RepositoryError::connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(SupabaseQuoteRepository { client, table_url: config.table_url() })
    }

    async fn read_rows(res: Response) -> RepositoryResult<Vec<Quote>> {
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!(%status, body = %body, "Store rejected request");
            return Err(RepositoryError::database(format!("Store returned {}: {}", status, body)));
        }
        let rows = res.json::<Vec<Quote>>().await?;
        Ok(rows)
    }
}

#[async_trait]
impl QuoteRepository for SupabaseQuoteRepository {

    #[tracing::instrument(skip(self, quote), fields(name = %quote.name, service = %quote.service))]
    async fn insert(&self, quote: Quote) -> RepositoryResult<Option<Quote>> {
        info!("Inserting quote");
        let res = self
            .client
            .post(&self.table_url)
            .header("Prefer", "return=representation")
            .json(&quote)
            .send()
            .await?;
        let mut rows = Self::read_rows(res).await?;
        debug!("Store returned {} row(s)", rows.len());
        if rows.is_empty() {
            return Ok(None);
        }
        let stored = rows.swap_remove(0);
        info!(id = ?stored.id, "Quote inserted");
        Ok(Some(stored))
    }

    #[tracing::instrument(skip(self))]
    async fn select_all(&self) -> RepositoryResult<Vec<Quote>> {
        let res = self
            .client
            .get(&self.table_url)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        let rows = Self::read_rows(res).await?;
        info!("Fetched {} quotes", rows.len());
        Ok(rows)
    }

    #[tracing::instrument(skip(self))]
    async fn select_by_id(&self, id: &str) -> RepositoryResult<Option<Quote>> {
        let filter = format!("eq.{}", id);
        let res = self
            .client
            .get(&self.table_url)
            .query(&[("select", "*"), ("id", filter.as_str())])
            .send()
            .await?;

        if res.status() == StatusCode::BAD_REQUEST {
            let body = res.text().await.unwrap_or_default();
            if is_invalid_key(&body) {
                debug!("Id is not castable to the key type, treating as no match");
                return Ok(None);
            }
            error!(body = %body, "Store rejected lookup");
            return Err(RepositoryError::database(format!("Store returned 400: {}", body)));
        }

        let mut rows = Self::read_rows(res).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows.swap_remove(0)))
    }
}

fn is_invalid_key(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("code").and_then(|c| c.as_str()).map(|c| c == PG_INVALID_TEXT_REPRESENTATION))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_detection() {
        let body = r#"{"code":"22P02","details":null,"hint":null,"message":"invalid input syntax for type uuid: \"abc\""}"#;
        assert!(is_invalid_key(body));
        assert!(!is_invalid_key(r#"{"code":"42P01","message":"relation does not exist"}"#));
        assert!(!is_invalid_key("not json"));
    }

    #[test]
    fn test_new_accepts_test_config() {
        let config = SupabaseConfig::from_test_env();
        assert!(SupabaseQuoteRepository::new(&config).is_ok());
    }

    #[test]
    fn test_new_rejects_key_with_newline() {
        let mut config = SupabaseConfig::from_test_env();
        config.api_key = "bad\nkey".to_string();
        assert!(SupabaseQuoteRepository::new(&config).is_err());
    }
}
