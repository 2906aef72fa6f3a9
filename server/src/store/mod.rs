//! Owner-scoped persistence.
//!
//! Every query here takes the caller's user id and filters on it before any
//! other predicate. Handlers never touch the tables directly.

pub mod catalog;
pub mod photos;
pub mod recipes;
pub mod users;

use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::auth::{CryptoError, SessionError};
use crate::error::{ApiError, FieldErrors};

/// Sort direction
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Descending (Z to A)
    #[default]
    Desc,
    /// Ascending (A to Z)
    Asc,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Database(#[from] diesel::result::Error),
}

impl StoreError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        StoreError::Validation(FieldErrors::single(field, message))
    }
}

impl From<SessionError> for StoreError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Crypto(e) => StoreError::Crypto(e),
            SessionError::Database(e) => StoreError::Database(e),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => ApiError::NotFound(what),
            StoreError::Validation(fields) => ApiError::Validation(fields),
            StoreError::InvalidCredentials => ApiError::InvalidCredentials,
            StoreError::Crypto(e) => {
                tracing::error!("Crypto failure: {}", e);
                ApiError::Internal("Failed to process credentials")
            }
            StoreError::Database(e) => ApiError::from(e),
        }
    }
}

/// Run two independent validations and report the errors of both.
pub(crate) fn merge_validation<A, B>(
    a: Result<A, StoreError>,
    b: Result<B, StoreError>,
) -> Result<(A, B), StoreError> {
    match (a, b) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(StoreError::Validation(mut left)), Err(StoreError::Validation(right))) => {
            left.extend(right);
            Err(StoreError::Validation(left))
        }
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_validation_combines_fields() {
        let merged = merge_validation::<(), ()>(
            Err(StoreError::field("tags", "Invalid pk \"3\" - object does not exist.")),
            Err(StoreError::field("ingredients", "Invalid pk \"4\" - object does not exist.")),
        );
        match merged {
            Err(StoreError::Validation(fields)) => {
                assert!(fields.get("tags").is_some());
                assert!(fields.get("ingredients").is_some());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_merge_validation_passes_through() {
        assert_eq!(merge_validation(Ok(1), Ok("a")).unwrap(), (1, "a"));
        assert!(matches!(
            merge_validation::<(), ()>(Ok(()), Err(StoreError::NotFound("Recipe"))),
            Err(StoreError::NotFound("Recipe"))
        ));
    }

    #[test]
    fn test_store_errors_map_to_api_errors() {
        assert!(matches!(
            ApiError::from(StoreError::NotFound("Recipe")),
            ApiError::NotFound("Recipe")
        ));
        assert!(matches!(
            ApiError::from(StoreError::InvalidCredentials),
            ApiError::InvalidCredentials
        ));
        assert!(matches!(
            ApiError::from(StoreError::Database(diesel::result::Error::NotFound)),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_direction_defaults_to_descending() {
        assert_eq!(Direction::default(), Direction::Desc);
        let parsed: Direction = serde_json::from_str("\"asc\"").unwrap();
        assert_eq!(parsed, Direction::Asc);
    }
}
