use crate::api::params::{parse_id_list, RecipeListParams};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::store::recipes::{self, RecipeFilter};
use crate::types::RecipeResponse;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/recipe/recipes",
    tag = "recipes",
    params(RecipeListParams),
    responses(
        (status = 200, description = "The caller's recipes, newest first", body = Vec<RecipeResponse>),
        (status = 400, description = "Malformed id list", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    params: Result<Query<RecipeListParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let filter = RecipeFilter {
        tag_ids: parse_id_list("tags", params.tags.as_deref())?,
        ingredient_ids: parse_id_list("ingredients", params.ingredients.as_deref())?,
    };

    let mut conn = get_conn!(pool);
    let records = recipes::list_for_owner(&mut conn, user.id, &filter)?;

    let response: Vec<RecipeResponse> =
        records.into_iter().map(RecipeResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}
