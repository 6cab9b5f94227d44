use std::fmt;

#[derive(Debug)]
pub enum RepositoryError {
    DatabaseError(String),
    ConnectionError(String),
    SerializationError(String),
    /// Generic error that wraps any error implementing std::error::Error
    Generic(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            RepositoryError::ConnectionError(msg) => write!(f, "Connection Error: {}", msg),
            RepositoryError::SerializationError(msg) => write!(f, "Serialization Error: {}", msg),
            RepositoryError::Generic(err) => write!(f, "Repository Error: {}", err),
        }
    }
}

impl std::error::Error for RepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepositoryError::Generic(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl RepositoryError {
    pub fn database<T: Into<String>>(msg: T) -> Self {
        RepositoryError::DatabaseError(msg.into())
    }

    pub fn connection<T: Into<String>>(msg: T) -> Self {
        RepositoryError::ConnectionError(msg.into())
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            RepositoryError::ConnectionError(format!("Store unreachable: {}", err))
        } else if err.is_decode() {
            RepositoryError::SerializationError(format!("Malformed store response: {}", err))
        } else if let Some(status) = err.status() {
            RepositoryError::DatabaseError(format!("Store returned {}: {}", status, err))
        } else {
            RepositoryError::Generic(Box::new(err))
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SerializationError(format!("JSON error: {}", err))
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_errors_map_to_serialization() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = RepositoryError::from(err);
        assert!(matches!(err, RepositoryError::SerializationError(_)));
        assert!(err.to_string().starts_with("Serialization Error: JSON error"));
    }

    #[test]
    fn test_constructors_and_display() {
        assert_eq!(
            RepositoryError::database("relation missing").to_string(),
            "Database Error: relation missing"
        );
        assert_eq!(
            RepositoryError::connection("refused").to_string(),
            "Connection Error: refused"
        );
    }
}
