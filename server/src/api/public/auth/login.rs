use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{ApiError, FieldErrors};
use crate::get_conn;
use crate::store::users;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/user/token",
    tag = "user",
    request_body(content = LoginRequest, example = json!({"email": "cook@example.com", "password": "testpass"})),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing fields or invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let mut errors = FieldErrors::new();
    let email = req.email.as_deref().unwrap_or_default();
    let password = req.password.as_deref().unwrap_or_default();
    if email.trim().is_empty() {
        errors.add("email", "This field is required.");
    }
    if password.is_empty() {
        errors.add("password", "This field is required.");
    }
    errors.into_result()?;

    let mut conn = get_conn!(pool);
    let token = users::authenticate(&mut conn, email, password)?;

    Ok((StatusCode::OK, Json(LoginResponse { token })))
}
