use crate::api::params::{parse_flag, CatalogParams};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::store::catalog::{tags, CatalogFilter};
use crate::types::TagResponse;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/recipe/tags",
    tag = "tags",
    params(CatalogParams),
    responses(
        (status = 200, description = "The caller's tags ordered by name", body = Vec<TagResponse>),
        (status = 400, description = "Malformed query parameter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_tags(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    params: Result<Query<CatalogParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let filter = CatalogFilter {
        assigned_only: parse_flag("assigned_only", params.assigned_only.as_deref())?,
        order: params.sort_dir.unwrap_or_default(),
    };

    let mut conn = get_conn!(pool);
    let found = tags::list_for_owner(&mut conn, user.id, filter)?;

    let response: Vec<TagResponse> = found.into_iter().map(TagResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}
