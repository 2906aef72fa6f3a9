//! Store and session tests that bypass the router.
//!
//! Set `TEST_DATABASE_URL` and run with `cargo test -- --ignored`.

use chrono::{Duration, Utc};
use diesel::prelude::*;
use recipe_server::auth::{create_session, find_user_by_token};
use recipe_server::db;
use recipe_server::models::NewSession;
use recipe_server::schema::sessions;
use recipe_server::store::users::{self, ProfileUpdate};
use recipe_server::store::StoreError;
use std::sync::OnceLock;
use uuid::Uuid;

fn pool() -> db::DbPool {
    static POOL: OnceLock<db::DbPool> = OnceLock::new();
    POOL.get_or_init(|| {
        let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
        db::create_pool(&url).expect("Failed to create test pool")
    })
    .clone()
}

fn unique_email() -> String {
    format!("admin-{}@example.com", Uuid::new_v4().simple())
}

fn assert_password_rejected(result: Result<impl std::fmt::Debug, StoreError>) {
    match result {
        Err(StoreError::Validation(errors)) => {
            assert!(errors.get("password").is_some(), "{errors}");
        }
        other => panic!("expected a password validation error, got {other:?}"),
    }
}

#[test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
fn test_create_superuser_sets_flags_and_can_log_in() {
    let mut conn = pool().get().unwrap();
    let email = unique_email();

    let user = users::create_superuser(&mut conn, &email.to_uppercase(), "adminpass").unwrap();
    assert_eq!(user.email, email);
    assert!(user.is_staff);
    assert!(user.is_superuser);
    assert!(user.is_active);

    let token = users::authenticate(&mut conn, &email, "adminpass").unwrap();
    let resolved = find_user_by_token(&mut conn, &token).unwrap().unwrap();
    assert_eq!(resolved.id, user.id);
}

#[test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
fn test_short_passwords_are_rejected_on_every_path() {
    let mut conn = pool().get().unwrap();

    assert_password_rejected(users::create_superuser(&mut conn, &unique_email(), "abc"));
    assert_password_rejected(users::create_user(
        &mut conn,
        &unique_email(),
        "abcd",
        Default::default(),
    ));

    let user = users::create_user(&mut conn, &unique_email(), "goodpass", Default::default())
        .unwrap();
    assert_password_rejected(users::update_profile(
        &mut conn,
        user.id,
        ProfileUpdate {
            password: Some("1234"),
            ..Default::default()
        },
    ));
}

#[test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
fn test_new_session_removes_expired_ones() {
    let mut conn = pool().get().unwrap();
    let user = users::create_user(&mut conn, &unique_email(), "goodpass", Default::default())
        .unwrap();

    let stale_hash = format!("stale-{}", Uuid::new_v4().simple());
    diesel::insert_into(sessions::table)
        .values(NewSession {
            user_id: user.id,
            token_hash: &stale_hash,
            expires_at: Utc::now() - Duration::days(1),
        })
        .execute(&mut conn)
        .unwrap();

    let token = create_session(&mut conn, user.id).unwrap();

    let expired: i64 = sessions::table
        .filter(sessions::user_id.eq(user.id))
        .filter(sessions::expires_at.le(Utc::now()))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(expired, 0);

    let live: i64 = sessions::table
        .filter(sessions::user_id.eq(user.id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(live, 1);
    assert!(find_user_by_token(&mut conn, &token).unwrap().is_some());
}
