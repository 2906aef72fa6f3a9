use super::payload::RecipeRequest;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::store::recipes;
use crate::types::RecipeDetailResponse;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/recipe/recipes",
    tag = "recipes",
    request_body(content = RecipeRequest, example = json!({
        "title": "Sample recipe",
        "time_minutes": 22,
        "price": "5.25",
        "link": "http://example.com/recipe.pdf",
        "tags": [1],
        "ingredients": [2, 3]
    })),
    responses(
        (status = 201, description = "Recipe created successfully", body = RecipeDetailResponse),
        (status = 400, description = "Invalid field or unknown tag/ingredient id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let data = request.into_new()?;

    let mut conn = get_conn!(pool);
    let record = recipes::create(&mut conn, user.id, &data)?;

    Ok((StatusCode::CREATED, Json(RecipeDetailResponse::from(record))))
}
