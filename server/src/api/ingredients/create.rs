use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::store::catalog::ingredients;
use crate::types::IngredientResponse;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateIngredientRequest {
    #[serde(default)]
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/api/recipe/ingredients",
    tag = "ingredients",
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Ingredient created successfully", body = IngredientResponse),
        (status = 400, description = "Invalid request (blank name)", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_ingredient(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<CreateIngredientRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;

    let mut conn = get_conn!(pool);
    let ingredient = ingredients::create(&mut conn, user.id, &request.name)?;

    Ok((StatusCode::CREATED, Json(IngredientResponse::from(ingredient))))
}
