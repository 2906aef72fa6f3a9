pub mod get;
pub mod get_thumbnail;

use crate::error::method_not_allowed;
use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Cached forever: a photo id is never reused for different bytes.
pub(crate) const CACHE_CONTROL: &str = "private, max-age=31536000, immutable";

/// Returns the router for /api/photos endpoints (mounted at /api/photos)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get::get_photo).fallback(method_not_allowed))
        .route(
            "/{id}/thumbnail",
            get(get_thumbnail::get_photo_thumbnail).fallback(method_not_allowed),
        )
}

#[derive(OpenApi)]
#[openapi(paths(get::get_photo, get_thumbnail::get_photo_thumbnail))]
pub struct ApiDoc;
