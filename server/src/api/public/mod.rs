pub mod auth;
pub mod testing;

use crate::error::method_not_allowed;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for public endpoints (no auth required)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/test/unauthed-ping",
            get(testing::unauthed_ping::unauthed_ping).fallback(method_not_allowed),
        )
        .route(
            "/api/user/create",
            post(auth::signup::signup).fallback(method_not_allowed),
        )
        .route(
            "/api/user/token",
            post(auth::login::login).fallback(method_not_allowed),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login::login,
        auth::signup::signup,
        testing::unauthed_ping::unauthed_ping,
    ),
    components(schemas(
        auth::login::LoginRequest,
        auth::login::LoginResponse,
        auth::signup::SignupRequest,
        testing::unauthed_ping::UnauthedPingResponse,
    ))
)]
pub struct ApiDoc;
