use super::payload::RecipeRequest;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::store::recipes::{self, RecipeUpdate};
use crate::types::RecipeDetailResponse;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

fn apply(
    pool: &DbPool,
    owner: Uuid,
    id: i32,
    update: RecipeUpdate,
) -> Result<RecipeDetailResponse, ApiError> {
    let mut conn = get_conn!(pool);
    let record = recipes::update(&mut conn, owner, id, &update)?;
    Ok(RecipeDetailResponse::from(record))
}

#[utoipa::path(
    patch,
    path = "/api/recipe/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Supplied fields updated; supplied tag/ingredient lists replace the old ones", body = RecipeDetailResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn patch_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let update = request.into_partial()?;

    let response = apply(&pool, user.id, id, update)?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/recipe/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe replaced; omitted link, tags and ingredients are cleared", body = RecipeDetailResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn put_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let update = request.into_replacement()?;

    let response = apply(&pool, user.id, id, update)?;
    Ok((StatusCode::OK, Json(response)))
}
