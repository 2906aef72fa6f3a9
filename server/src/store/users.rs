use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use super::StoreError;
use crate::auth::{create_session, hash_password, verify_password};
use crate::models::{NewUser, User, UserChanges};
use crate::schema::users;
use crate::validation::{normalize_email, optional_text, validate_password};

const DUPLICATE_EMAIL: &str = "user with this email already exists.";

/// Optional account attributes accepted at signup.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtraFields<'a> {
    pub name: &'a str,
}

/// Self-service profile edits. Absent fields are left untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileUpdate<'a> {
    pub email: Option<&'a str>,
    pub name: Option<&'a str>,
    pub password: Option<&'a str>,
}

fn checked_email(raw: &str) -> Result<String, StoreError> {
    normalize_email(Some(raw)).map_err(|e| StoreError::field("email", e.to_string()))
}

fn checked_password(raw: &str) -> Result<&str, StoreError> {
    validate_password(raw).map_err(|m| StoreError::field("password", m))?;
    Ok(raw)
}

fn map_unique_email(err: DieselError) -> StoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StoreError::field("email", DUPLICATE_EMAIL)
        }
        other => StoreError::Database(other),
    }
}

/// Create a regular account. The email is validated and lowercased and the
/// password is length-checked and hashed before anything is written.
pub fn create_user(
    conn: &mut PgConnection,
    email: &str,
    password: &str,
    extra: ExtraFields<'_>,
) -> Result<User, StoreError> {
    let email = checked_email(email)?;
    let name = optional_text(extra.name.trim()).map_err(|m| StoreError::field("name", m))?;
    let password_hash = hash_password(checked_password(password)?)?;

    let user = diesel::insert_into(users::table)
        .values(NewUser {
            email: &email,
            name,
            password_hash: &password_hash,
        })
        .returning(User::as_returning())
        .get_result(conn)
        .map_err(map_unique_email)?;

    tracing::info!(user_id = %user.id, "created user");
    Ok(user)
}

/// Create an account with staff and superuser rights.
pub fn create_superuser(
    conn: &mut PgConnection,
    email: &str,
    password: &str,
) -> Result<User, StoreError> {
    conn.transaction(|conn| {
        let user = create_user(conn, email, password, ExtraFields::default())?;

        let user = diesel::update(users::table.find(user.id))
            .set((users::is_staff.eq(true), users::is_superuser.eq(true)))
            .returning(User::as_returning())
            .get_result(conn)?;

        tracing::info!(user_id = %user.id, "promoted user to superuser");
        Ok(user)
    })
}

/// Check credentials and issue a new token.
///
/// Unknown emails, wrong passwords and inactive accounts all produce the same
/// `InvalidCredentials` error.
pub fn authenticate(
    conn: &mut PgConnection,
    email: &str,
    password: &str,
) -> Result<String, StoreError> {
    let Ok(email) = normalize_email(Some(email)) else {
        return Err(StoreError::InvalidCredentials);
    };

    let user: Option<User> = users::table
        .filter(users::email.eq(&email))
        .select(User::as_select())
        .first(conn)
        .optional()?;

    let Some(user) = user else {
        return Err(StoreError::InvalidCredentials);
    };

    if !user.is_active || !verify_password(password, &user.password_hash) {
        return Err(StoreError::InvalidCredentials);
    }

    let token = create_session(conn, user.id)?;
    Ok(token)
}

pub fn get(conn: &mut PgConnection, user_id: Uuid) -> Result<User, StoreError> {
    users::table
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .optional()?
        .ok_or(StoreError::NotFound("User"))
}

/// Apply a partial profile update. A supplied password is re-hashed.
pub fn update_profile(
    conn: &mut PgConnection,
    user_id: Uuid,
    update: ProfileUpdate<'_>,
) -> Result<User, StoreError> {
    let changes = UserChanges {
        email: update.email.map(checked_email).transpose()?,
        name: update
            .name
            .map(|name| optional_text(name.trim()).map(str::to_string))
            .transpose()
            .map_err(|m| StoreError::field("name", m))?,
        password_hash: update
            .password
            .map(checked_password)
            .transpose()?
            .map(hash_password)
            .transpose()?,
    };

    if changes.email.is_none() && changes.name.is_none() && changes.password_hash.is_none() {
        return get(conn, user_id);
    }

    diesel::update(users::table.find(user_id))
        .set(&changes)
        .returning(User::as_returning())
        .get_result(conn)
        .map_err(map_unique_email)
}
