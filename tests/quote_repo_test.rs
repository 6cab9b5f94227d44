use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{Duration, Utc};
use granite_quote_api::config::SupabaseConfig;
use granite_quote_api::dto::quote_dto::CreateQuoteRequest;
use granite_quote_api::model::quote::Quote;
use granite_quote_api::repository::quote_repo::{QuoteRepository, SupabaseQuoteRepository};
use granite_quote_api::repository::repository_error::RepositoryError;
use serde_json::{json, Value};

const KEY: &str = "test-anon-key";

#[derive(Clone, Default)]
struct MockStore {
    rows: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<Mutex<i64>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("apikey").map(|v| v == KEY).unwrap_or(false)
        && headers
            .get("authorization")
            .map(|v| v == format!("Bearer {}", KEY).as_str())
            .unwrap_or(false)
}

// Mimics PostgREST: bigint identity ids, `order=created_at.desc`, `id=eq.N`
async fn insert(State(store): State<MockStore>, headers: HeaderMap, Json(mut row): Json<Value>) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid API key" })));
    }
    if headers.get("prefer").map(|v| v != "return=representation").unwrap_or(true) {
        return (StatusCode::CREATED, Json(json!([])));
    }
    let mut next = store.next_id.lock().unwrap();
    *next += 1;
    row["id"] = json!(*next);
    store.rows.lock().unwrap().push(row.clone());
    (StatusCode::CREATED, Json(json!([row])))
}

async fn select(
    State(store): State<MockStore>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid API key" })));
    }
    let mut rows = store.rows.lock().unwrap().clone();
    if let Some(filter) = params.get("id") {
        let wanted = filter.trim_start_matches("eq.");
        let Ok(wanted) = wanted.parse::<i64>() else {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "code": "22P02", "message": format!("invalid input syntax for type bigint: \"{}\"", wanted) })),
            );
        };
        rows.retain(|r| r["id"] == json!(wanted));
    }
    if params.get("order").map(String::as_str) == Some("created_at.desc") {
        rows.sort_by(|a, b| b["created_at"].as_str().cmp(&a["created_at"].as_str()));
    }
    (StatusCode::OK, Json(Value::Array(rows)))
}

async fn spawn_store() -> SupabaseConfig {
    let app = Router::new()
        .route("/rest/v1/quotes", get(select).post(insert))
        .with_state(MockStore::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut config = SupabaseConfig::from_test_env();
    config.url = format!("http://{}", addr);
    config
}

fn quote(name: &str, offset_secs: i64) -> Quote {
    let request: CreateQuoteRequest = serde_json::from_value(json!({
        "name": name,
        "phone": "0821234567",
        "email": "jane@example.com",
        "location": "Cape Town",
        "service": "Kitchen Counters",
        "timeline": "ASAP",
        "message": "Need a quote",
        "consultation": true,
        "privacy": true
    }))
    .unwrap();
    request.into_quote(Utc::now() + Duration::seconds(offset_secs))
}

#[tokio::test]
async fn test_supabase_repository_workflow() {
    let config = spawn_store().await;
    let repo = SupabaseQuoteRepository::new(&config).expect("repo");

    let inserted = repo.insert(quote("Older", 0)).await.unwrap().expect("row returned");
    assert_eq!(inserted.id.as_deref(), Some("1"));
    assert_eq!(inserted.timeline.as_deref(), Some("ASAP"));
    assert!(inserted.consultation_requested);

    repo.insert(quote("Newer", 60)).await.unwrap();

    let all = repo.select_all().await.unwrap();
    let names: Vec<&str> = all.iter().map(|q| q.name.as_str()).collect();
    assert_eq!(names, vec!["Newer", "Older"]);

    let fetched = repo.select_by_id("1").await.unwrap().expect("found");
    assert_eq!(fetched, inserted);

    assert!(repo.select_by_id("999").await.unwrap().is_none());
    // Non-numeric id against a bigint key is "no match", not a failure
    assert!(repo.select_by_id("not-a-number").await.unwrap().is_none());
}

#[tokio::test]
async fn test_supabase_repository_bad_key() {
    let mut config = spawn_store().await;
    config.api_key = "wrong".to_string();
    let repo = SupabaseQuoteRepository::new(&config).expect("repo");

    let err = repo.select_all().await.unwrap_err();
    assert!(matches!(err, RepositoryError::DatabaseError(_)));
}

#[tokio::test]
async fn test_supabase_repository_unreachable() {
    let mut config = SupabaseConfig::from_test_env();
    // Nothing listens on the discard port
    config.url = "http://127.0.0.1:9".to_string();
    let repo = SupabaseQuoteRepository::new(&config).expect("repo");

    let err = repo.insert(quote("Nobody", 0)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ConnectionError(_)));
}
