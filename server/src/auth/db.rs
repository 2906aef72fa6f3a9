use crate::models::{NewSession, User};
use crate::schema::{sessions, users};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::crypto::{generate_token, hash_token, CryptoError};

/// How long an issued token stays valid.
pub const TOKEN_TTL_DAYS: i64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Database(#[from] diesel::result::Error),
}

/// Issue a fresh opaque token for `user_id`. Only its hash is persisted.
///
/// The user's expired sessions are removed at the same time.
pub fn create_session(conn: &mut PgConnection, user_id: Uuid) -> Result<String, SessionError> {
    let now = Utc::now();
    let purged = diesel::delete(
        sessions::table
            .filter(sessions::user_id.eq(user_id))
            .filter(sessions::expires_at.le(now)),
    )
    .execute(conn)?;
    if purged > 0 {
        tracing::debug!(user_id = %user_id, purged, "removed expired sessions");
    }

    let token = generate_token()?;
    let token_hash = hash_token(&token);
    let expires_at = now + Duration::days(TOKEN_TTL_DAYS);

    let new_session = NewSession {
        user_id,
        token_hash: &token_hash,
        expires_at,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

pub fn find_user_by_token(
    conn: &mut PgConnection,
    token: &str,
) -> Result<Option<User>, diesel::result::Error> {
    let token_hash = hash_token(token);

    sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .filter(users::is_active.eq(true))
        .select(User::as_select())
        .first(conn)
        .optional()
}
