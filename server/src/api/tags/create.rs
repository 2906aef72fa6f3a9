use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::store::catalog::tags;
use crate::types::TagResponse;
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
pub struct CreateTagRequest {
    #[serde(default)]
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/api/recipe/tags",
    tag = "tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created successfully", body = TagResponse),
        (status = 400, description = "Invalid request (blank name)", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_tag(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<CreateTagRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;

    let mut conn = get_conn!(pool);
    let tag = tags::create(&mut conn, user.id, &request.name)?;

    Ok((StatusCode::CREATED, Json(TagResponse::from(tag))))
}
