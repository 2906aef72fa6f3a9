pub mod create;
pub mod list;

use crate::error::method_not_allowed;
use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for tag endpoints (mounted at /api/recipe/tags)
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(list::list_tags)
            .post(create::create_tag)
            .fallback(method_not_allowed),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_tags, create::create_tag),
    components(schemas(create::CreateTagRequest, crate::types::TagResponse))
)]
pub struct ApiDoc;
