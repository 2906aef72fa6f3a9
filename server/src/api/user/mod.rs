pub mod me;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the caller's own account
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/user/me",
        get(me::get_me)
            .patch(me::update_me)
            .fallback(me::method_not_allowed),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(me::get_me, me::update_me),
    components(schemas(me::UpdateMeRequest, crate::types::UserResponse))
)]
pub struct ApiDoc;
