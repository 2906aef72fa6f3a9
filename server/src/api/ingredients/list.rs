use crate::api::params::{parse_flag, CatalogParams};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::store::catalog::{ingredients, CatalogFilter};
use crate::types::IngredientResponse;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/recipe/ingredients",
    tag = "ingredients",
    params(CatalogParams),
    responses(
        (status = 200, description = "The caller's ingredients ordered by name", body = Vec<IngredientResponse>),
        (status = 400, description = "Malformed query parameter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_ingredients(
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
    let found = ingredients::list_for_owner(&mut conn, user.id, filter)?;

    let response: Vec<IngredientResponse> =
        found.into_iter().map(IngredientResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}
