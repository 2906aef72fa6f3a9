use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::store::users::{self, ProfileUpdate};
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

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateMeRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    /// Re-hashed before storage; never echoed back
    pub password: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/user/me",
    tag = "user",
    responses(
        (status = 200, description = "The authenticated user's profile", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(AuthUser(user): AuthUser) -> impl IntoResponse {
    (StatusCode::OK, Json(UserResponse::from(user)))
}

#[utoipa::path(
    patch,
    path = "/api/user/me",
    tag = "user",
    request_body = UpdateMeRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_me(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<UpdateMeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;

    if let Some(password) = request.password.as_deref() {
        validate_password(password).map_err(|m| ApiError::field("password", m))?;
    }

    let mut conn = get_conn!(pool);
    let updated = users::update_profile(
        &mut conn,
        user.id,
        ProfileUpdate {
            email: request.email.as_deref(),
            name: request.name.as_deref(),
            password: request.password.as_deref(),
        },
    )?;

    Ok((StatusCode::OK, Json(UserResponse::from(updated))))
}

/// Any other method on the profile. Authentication is checked first so an
/// anonymous caller still gets 401.
pub async fn method_not_allowed(_user: AuthUser) -> ApiError {
    ApiError::MethodNotAllowed
}
