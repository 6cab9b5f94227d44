use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const STATUS_NEW: &str = "new";

/// A quote request as stored in the `quotes` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Assigned by the store on insert; never sent on insert.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub service: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub message: String,
    // Older rows may carry null or lack these columns entirely
    #[serde(default, deserialize_with = "null_as_default")]
    pub consultation_requested: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub marketing_updates: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub privacy_agreed: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_status", deserialize_with = "deserialize_status")]
    pub status: String,
}

fn default_status() -> String {
    STATUS_NEW.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_status))
}

// Tables keyed by `bigint identity` return numbers, `uuid` keys return strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!("unsupported id value: {}", other))),
    }
}

// `timestamp` columns come back without an offset; those are UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", raw)))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}
