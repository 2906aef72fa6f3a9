pub mod create;
pub mod get;
pub mod list;
pub mod payload;
pub mod update;
pub mod upload_image;

use crate::photos::processing::MAX_FILE_SIZE;
use crate::error::method_not_allowed;
use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Multipart framing on top of the largest accepted image.
const UPLOAD_BODY_LIMIT: usize = MAX_FILE_SIZE + 64 * 1024;

/// Returns the router for recipe endpoints (mounted at /api/recipe/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list::list_recipes)
                .post(create::create_recipe)
                .fallback(method_not_allowed),
        )
        .route(
            "/{id}",
            get(get::get_recipe)
                .patch(update::patch_recipe)
                .put(update::put_recipe)
                .fallback(method_not_allowed),
        )
        .route(
            "/{id}/upload-image",
            post(upload_image::upload_image)
                .fallback(method_not_allowed)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        update::patch_recipe,
        update::put_recipe,
        upload_image::upload_image,
    ),
    components(schemas(
        payload::RecipeRequest,
        upload_image::UploadImageRequest,
        crate::types::RecipeResponse,
        crate::types::RecipeDetailResponse,
        crate::types::RecipeImageResponse,
    ))
)]
pub struct ApiDoc;
