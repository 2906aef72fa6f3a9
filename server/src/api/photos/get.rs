use super::CACHE_CONTROL;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::store::photos;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/photos/{id}",
    tag = "photos",
    params(
        ("id" = Uuid, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Photo data", content_type = "application/octet-stream"),
        (status = 404, description = "Photo not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_photo(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let mut conn = get_conn!(pool);
    let photo = photos::get_for_owner(&mut conn, user.id, id)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, photo.content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
        ],
        photo.data,
    ))
}
