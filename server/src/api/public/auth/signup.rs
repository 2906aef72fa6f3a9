use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{ApiError, FieldErrors};
use crate::get_conn;
use crate::store::users::{self, ExtraFields};
use crate::types::UserResponse;
use crate::validation::validate_password;
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
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/api/user/create",
    tag = "user",
    request_body(content = SignupRequest, example = json!({"email": "cook@example.com", "password": "testpass", "name": "Cook"})),
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Invalid email, short password or email already taken", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let mut errors = FieldErrors::new();
    let email = req.email.as_deref().unwrap_or_default();
    if email.trim().is_empty() {
        errors.add("email", "This field is required.");
    }
    match req.password.as_deref() {
        None | Some("") => errors.add("password", "This field is required."),
        Some(password) => {
            if let Err(message) = validate_password(password) {
                errors.add("password", message);
            }
        }
    }
    errors.into_result()?;

    let mut conn = get_conn!(pool);
    let user = users::create_user(
        &mut conn,
        email,
        req.password.as_deref().unwrap_or_default(),
        ExtraFields { name: &req.name },
    )?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
