pub mod create;
pub mod list;

use crate::error::method_not_allowed;
use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for ingredient endpoints (mounted at /api/recipe/ingredients)
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(list::list_ingredients)
            .post(create::create_ingredient)
            .fallback(method_not_allowed),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_ingredients, create::create_ingredient),
    components(schemas(
        create::CreateIngredientRequest,
        crate::types::IngredientResponse
    ))
)]
pub struct ApiDoc;
