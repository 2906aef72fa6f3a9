//! End-to-end tests driving the full router against PostgreSQL.
//!
//! Set `TEST_DATABASE_URL` and run with `cargo test -- --ignored`. Every test
//! signs up fresh users, so runs never collide with each other.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use diesel::r2d2::{self, ConnectionManager};
use diesel::PgConnection;
use http_body_util::BodyExt;
use recipe_server::{app, db};
use serde_json::{json, Value};
use std::io::Cursor;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

fn pool() -> db::DbPool {
    static POOL: OnceLock<db::DbPool> = OnceLock::new();
    POOL.get_or_init(|| {
        let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
        db::create_pool(&url).expect("Failed to create test pool")
    })
    .clone()
}

fn router() -> Router {
    app(Arc::new(pool()))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn unique_email() -> String {
    format!("user-{}@example.com", Uuid::new_v4().simple())
}

/// Sign up and log in a new user, returning (email, token).
async fn new_user() -> (String, String) {
    let email = unique_email();
    let (status, _) = send(json_request(
        Method::POST,
        "/api/user/create",
        None,
        json!({"email": email, "password": "testpass123", "name": "Test Name"}),
    ))
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(json_request(
        Method::POST,
        "/api/user/token",
        None,
        json!({"email": email, "password": "testpass123"}),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    (email, token)
}

async fn create_named(token: &str, resource: &str, name: &str) -> i64 {
    let (status, body) = send(json_request(
        Method::POST,
        &format!("/api/recipe/{resource}"),
        Some(token),
        json!({"name": name}),
    ))
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn create_recipe(token: &str, extra: Value) -> Value {
    let mut payload = json!({"title": "Sample recipe", "time_minutes": 10, "price": "5.00"});
    if let (Some(payload), Some(extra)) = (payload.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            payload.insert(key.clone(), value.clone());
        }
    }
    let (status, body) = send(json_request(
        Method::POST,
        "/api/recipe/recipes",
        Some(token),
        payload,
    ))
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(10, 10, image::Rgb([200, 100, 50]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn multipart_request(uri: &str, token: &str, field: &str, data: &[u8]) -> Request<Body> {
    let boundary = "recipe-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"upload\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// A router whose pool points at a closed port. Checkouts fail after a short wait.
fn offline_router() -> Router {
    let manager = ConnectionManager::<PgConnection>::new("postgres://localhost:1/unused");
    let pool = r2d2::Pool::builder()
        .connection_timeout(Duration::from_millis(200))
        .build_unchecked(manager);
    app(Arc::new(pool))
}

/// Status, content type and JSON body of a request against `offline_router`.
async fn send_offline(request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = offline_router().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, content_type, body)
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_unauthed_ping_needs_no_database() {
    // The pool is never checked out, so it may point nowhere
    let manager = ConnectionManager::<PgConnection>::new("postgres://localhost:1/unused");
    let pool = r2d2::Pool::builder().build_unchecked(manager);

    let response = app(Arc::new(pool))
        .oneshot(get_request("/api/test/unauthed-ping", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"message": "unauthed-ping"}));
}

#[tokio::test]
async fn test_missing_token_is_rejected_before_database_access() {
    let manager = ConnectionManager::<PgConnection>::new("postgres://localhost:1/unused");
    let pool = r2d2::Pool::builder().build_unchecked(manager);

    let response = app(Arc::new(pool))
        .oneshot(get_request("/api/recipe/recipes", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unsupported_methods_return_json_405() {
    for (method, uri) in [
        (Method::DELETE, "/api/recipe/recipes/1"),
        (Method::DELETE, "/api/recipe/recipes"),
        (Method::DELETE, "/api/recipe/tags"),
        (Method::PUT, "/api/recipe/ingredients"),
        (Method::GET, "/api/recipe/recipes/1/upload-image"),
        (Method::DELETE, "/api/photos/00000000-0000-0000-0000-000000000000"),
        (Method::PUT, "/api/user/token"),
        (Method::GET, "/api/user/create"),
        (Method::POST, "/api/test/unauthed-ping"),
    ] {
        let (status, content_type, body) = send_offline(empty_request(method.clone(), uri)).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        assert_eq!(content_type.as_deref(), Some("application/json"), "{method} {uri}");
        assert_eq!(body["error"], "Method not allowed", "{method} {uri}");
    }
}

#[tokio::test]
async fn test_unknown_routes_return_json_404() {
    for uri in ["/api/nope", "/api/recipe/recipes/1/comments", "/"] {
        let (status, content_type, body) = send_offline(get_request(uri, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(content_type.as_deref(), Some("application/json"), "{uri}");
        assert_eq!(body["error"], "Resource not found", "{uri}");
    }
}

#[tokio::test]
async fn test_unreachable_database_is_a_server_error_not_a_bad_token() {
    let (status, content_type, body) =
        send_offline(get_request("/api/recipe/recipes", Some("sometoken"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert!(body["error"].is_string(), "{body}");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_malformed_paths_and_bodies_return_json_400() {
    let (_, token) = new_user().await;

    for uri in ["/api/recipe/recipes/abc", "/api/photos/not-a-uuid"] {
        let (status, body) = send(get_request(uri, Some(&token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["fields"]["path"].is_array(), "{uri}: {body}");
    }

    let recipe = create_recipe(&token, json!({})).await;
    let (status, body) = send(json_request(
        Method::POST,
        &format!("/api/recipe/recipes/{}/upload-image", recipe["id"]),
        Some(&token),
        json!({"image": "not multipart"}),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["body"].is_array(), "{body}");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_create_response_orders_links_like_later_reads() {
    let (_, token) = new_user().await;
    let apple = create_named(&token, "tags", "apple").await;
    let banana = create_named(&token, "tags", "Banana").await;
    let flour = create_named(&token, "ingredients", "flour").await;
    let butter = create_named(&token, "ingredients", "Butter").await;

    let created = create_recipe(
        &token,
        json!({"tags": [banana, apple], "ingredients": [flour, butter]}),
    )
    .await;

    let (status, fetched) = send(get_request(
        &format!("/api/recipe/recipes/{}", created["id"]),
        Some(&token),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["tags"], fetched["tags"]);
    assert_eq!(created["ingredients"], fetched["ingredients"]);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_signup_normalizes_email_and_hides_password() {
    let raw = format!("Mixed-{}@Example.COM", Uuid::new_v4().simple());
    let (status, body) = send(json_request(
        Method::POST,
        "/api/user/create",
        None,
        json!({"email": raw, "password": "testpass123", "name": "Cook"}),
    ))
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], raw.to_lowercase());
    assert!(body.get("password").is_none());

    // Same address in another case is a duplicate
    let (status, body) = send(json_request(
        Method::POST,
        "/api/user/create",
        None,
        json!({"email": raw.to_uppercase(), "password": "testpass123"}),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["email"].is_array());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_signup_validation() {
    let cases = [
        (json!({"password": "testpass123"}), "email"),
        (json!({"email": "not-an-email", "password": "testpass123"}), "email"),
        (json!({"email": unique_email(), "password": "pw"}), "password"),
    ];
    for (payload, field) in cases {
        let (status, body) =
            send(json_request(Method::POST, "/api/user/create", None, payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["fields"][field].is_array(), "{body}");
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_token_rejects_bad_credentials() {
    let (email, _) = new_user().await;

    for payload in [
        json!({"email": email, "password": "wrong-password"}),
        json!({"email": unique_email(), "password": "testpass123"}),
        json!({"email": email, "password": ""}),
    ] {
        let (status, body) =
            send(json_request(Method::POST, "/api/user/token", None, payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("token").is_none());
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_authentication_required() {
    for uri in [
        "/api/user/me",
        "/api/recipe/tags",
        "/api/recipe/ingredients",
        "/api/recipe/recipes",
    ] {
        let (status, _) = send(get_request(uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }

    let (status, _) = send(get_request("/api/user/me", Some("not-a-real-token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_profile_get_patch_and_post_not_allowed() {
    let (email, token) = new_user().await;

    let (status, body) = send(get_request("/api/user/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"email": email, "name": "Test Name"}));

    let (status, body) = send(json_request(
        Method::PATCH,
        "/api/user/me",
        Some(&token),
        json!({"name": "Updated", "password": "newpassword123"}),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Updated");
    assert!(body.get("password").is_none());

    let (status, _) = send(json_request(
        Method::POST,
        "/api/user/token",
        None,
        json!({"email": email, "password": "newpassword123"}),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(json_request(Method::POST, "/api/user/me", Some(&token), json!({})))
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_catalogs_are_owner_scoped_and_sorted() {
    let (_, token) = new_user().await;
    let (_, other_token) = new_user().await;

    let kale = create_named(&token, "ingredients", "Kale").await;
    let salt = create_named(&token, "ingredients", "Salt").await;
    create_named(&other_token, "ingredients", "Vinegar").await;

    let (status, body) = send(get_request("/api/recipe/ingredients", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![salt, kale]);

    let (_, body) = send(get_request(
        "/api/recipe/ingredients?sort_dir=asc",
        Some(&token),
    ))
    .await;
    assert_eq!(ids(&body), vec![kale, salt]);

    let (status, body) = send(json_request(
        Method::POST,
        "/api/recipe/tags",
        Some(&token),
        json!({"name": "  "}),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["name"].is_array());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_assigned_only_returns_each_tag_once() {
    let (_, token) = new_user().await;
    let breakfast = create_named(&token, "tags", "Breakfast").await;
    create_named(&token, "tags", "Lunch").await;

    create_recipe(&token, json!({"title": "Pancakes", "tags": [breakfast]})).await;
    create_recipe(&token, json!({"title": "Porridge", "tags": [breakfast]})).await;

    let (status, body) = send(get_request(
        "/api/recipe/tags?assigned_only=1",
        Some(&token),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![breakfast]);

    let (status, _) = send(get_request(
        "/api/recipe/tags?assigned_only=maybe",
        Some(&token),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_recipe_filters() {
    let (_, token) = new_user().await;
    let vegan = create_named(&token, "tags", "Vegan").await;
    let vegetarian = create_named(&token, "tags", "Vegetarian").await;
    let feta = create_named(&token, "ingredients", "Feta").await;

    let curry = create_recipe(&token, json!({"title": "Curry", "tags": [vegan]})).await;
    let tahini = create_recipe(
        &token,
        json!({"title": "Tahini", "tags": [vegetarian], "ingredients": [feta]}),
    )
    .await;
    let plain = create_recipe(&token, json!({"title": "Fish and chips"})).await;

    let (status, body) = send(get_request(
        &format!("/api/recipe/recipes?tags={vegan},{vegetarian}"),
        Some(&token),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    let found = ids(&body);
    assert!(found.contains(&curry["id"].as_i64().unwrap()));
    assert!(found.contains(&tahini["id"].as_i64().unwrap()));
    assert!(!found.contains(&plain["id"].as_i64().unwrap()));

    // Across dimensions both must match
    let (_, body) = send(get_request(
        &format!("/api/recipe/recipes?tags={vegan},{vegetarian}&ingredients={feta}"),
        Some(&token),
    ))
    .await;
    assert_eq!(ids(&body), vec![tahini["id"].as_i64().unwrap()]);

    let (status, _) = send(get_request("/api/recipe/recipes?tags=1,x", Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_recipes_are_invisible_to_other_users() {
    let (_, token) = new_user().await;
    let (_, other_token) = new_user().await;
    let tag = create_named(&token, "tags", "Private").await;
    let recipe = create_recipe(&token, json!({"tags": [tag]})).await;
    let id = recipe["id"].as_i64().unwrap();

    for uri in [
        "/api/recipe/recipes".to_string(),
        format!("/api/recipe/recipes?tags={tag}"),
    ] {
        let (_, body) = send(get_request(&uri, Some(&other_token))).await;
        assert!(!ids(&body).contains(&id), "{uri}");
    }

    let (status, _) = send(get_request(
        &format!("/api/recipe/recipes/{id}"),
        Some(&other_token),
    ))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(json_request(
        Method::PATCH,
        &format!("/api/recipe/recipes/{id}"),
        Some(&other_token),
        json!({"title": "Stolen"}),
    ))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Someone else's tag id is rejected like an unknown one
    let (status, body) = send(json_request(
        Method::POST,
        "/api/recipe/recipes",
        Some(&other_token),
        json!({"title": "Mine", "time_minutes": 1, "price": 1, "tags": [tag]}),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["tags"].is_array());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_detail_nests_tags_and_ingredients() {
    let (_, token) = new_user().await;
    let tag = create_named(&token, "tags", "Dinner").await;
    let ingredient = create_named(&token, "ingredients", "Garlic").await;
    let recipe = create_recipe(
        &token,
        json!({"tags": [tag], "ingredients": [ingredient], "link": "https://example.com"}),
    )
    .await;
    let id = recipe["id"].as_i64().unwrap();

    let (status, body) = send(get_request(
        &format!("/api/recipe/recipes/{id}"),
        Some(&token),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tags"], json!([{"id": tag, "name": "Dinner"}]));
    assert_eq!(body["ingredients"], json!([{"id": ingredient, "name": "Garlic"}]));
    assert_eq!(body["price"], "5.00");
    assert_eq!(body["link"], "https://example.com");

    let (_, body) = send(get_request("/api/recipe/recipes", Some(&token))).await;
    assert_eq!(body[0]["tags"], json!([tag]));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_patch_replaces_tags_and_put_clears_them() {
    let (_, token) = new_user().await;
    let thai = create_named(&token, "tags", "Thai").await;
    let curry = create_named(&token, "tags", "Curry").await;
    let recipe = create_recipe(
        &token,
        json!({"title": "Chicken tikka", "tags": [thai], "link": "https://example.com"}),
    )
    .await;
    let uri = format!("/api/recipe/recipes/{}", recipe["id"]);

    let (status, body) = send(json_request(
        Method::PATCH,
        &uri,
        Some(&token),
        json!({"title": "Chicken curry", "tags": [curry]}),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Chicken curry");
    assert_eq!(ids(&body["tags"]), vec![curry]);
    assert_eq!(body["price"], "5.00");
    assert_eq!(body["link"], "https://example.com");

    let (status, body) = send(json_request(
        Method::PUT,
        &uri,
        Some(&token),
        json!({"title": "Spaghetti carbonara", "time_minutes": 25, "price": "5.00"}),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Spaghetti carbonara");
    assert_eq!(body["time_minutes"], 25);
    assert_eq!(body["tags"], json!([]));
    assert_eq!(body["link"], "");

    let (status, body) = send(json_request(
        Method::PUT,
        &uri,
        Some(&token),
        json!({"title": "No price"}),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["price"].is_array());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_image_upload_and_rejection() {
    let (_, token) = new_user().await;
    let recipe = create_recipe(&token, json!({})).await;
    let uri = format!("/api/recipe/recipes/{}/upload-image", recipe["id"]);

    let (status, body) = send(multipart_request(&uri, &token, "image", &png_bytes())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], recipe["id"]);
    let image = body["image"].as_str().unwrap().to_string();

    let response = router()
        .oneshot(get_request(&image, Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

    let response = router()
        .oneshot(get_request(&format!("{image}/thumbnail"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");

    let (status, body) = send(multipart_request(&uri, &token, "image", b"notimage")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["image"].is_array());

    let (_, body) = send(get_request(
        &format!("/api/recipe/recipes/{}", recipe["id"]),
        Some(&token),
    ))
    .await;
    assert_eq!(body["image"], image.as_str());

    // Photos are owner-scoped too
    let (_, other_token) = new_user().await;
    let (status, _) = send(get_request(&image, Some(&other_token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via TEST_DATABASE_URL"]
async fn test_replacing_image_removes_previous_photo() {
    let (_, token) = new_user().await;
    let recipe = create_recipe(&token, json!({})).await;
    let uri = format!("/api/recipe/recipes/{}/upload-image", recipe["id"]);

    let (_, first) = send(multipart_request(&uri, &token, "image", &png_bytes())).await;
    let (_, second) = send(multipart_request(&uri, &token, "image", &png_bytes())).await;
    assert_ne!(first["image"], second["image"]);

    let (status, _) = send(get_request(first["image"].as_str().unwrap(), Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
