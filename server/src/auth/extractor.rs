use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::User;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use std::sync::Arc;

use super::db::find_user_by_token;
use crate::get_conn;

/// Extractor that validates the Authorization header and provides the authenticated user.
///
/// Use this in any handler that requires authentication:
/// ```ignore
/// async fn my_handler(AuthUser(user): AuthUser) -> impl IntoResponse {
///     // every query below is scoped to user.id
/// }
/// ```
pub struct AuthUser(pub User);

/// Accepted `Authorization` schemes, each followed by a single space and the token.
const TOKEN_SCHEMES: [&str; 2] = ["Bearer ", "Token "];

/// Pull the raw token out of an `Authorization` header value.
pub fn parse_authorization(value: &str) -> Option<&str> {
    TOKEN_SCHEMES
        .iter()
        .find_map(|scheme| value.strip_prefix(scheme))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<DbPool>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = Arc::<DbPool>::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(ApiError::AuthenticationRequired(
                "Authentication credentials were not provided",
            ))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::AuthenticationRequired("Invalid Authorization header"))?;

        let token = parse_authorization(auth_str).ok_or(ApiError::AuthenticationRequired(
            "Invalid Authorization header format",
        ))?;

        // Pool or query failures are server errors, not a bad token
        let mut conn = get_conn!(pool);
        let user = find_user_by_token(&mut conn, token)?
            .ok_or(ApiError::AuthenticationRequired("Invalid or expired token"))?;

        Ok(AuthUser(user))
    }
}
