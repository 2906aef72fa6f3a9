use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::photos::processing::process_image;
use crate::store::recipes::{self, NewImage};
use crate::types::RecipeImageResponse;
use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::PathRejection,
        Multipart, Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadImageRequest {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

fn multipart_error(e: MultipartError) -> ApiError {
    tracing::warn!("Multipart read error: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::field("image", "File too large.")
    } else {
        ApiError::field("image", format!("Failed to read upload: {}", e.body_text()))
    }
}

/// Pull the bytes of the `image` field, skipping any other parts.
async fn read_image_field(multipart: &mut Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("image") {
            return field.bytes().await.map_err(multipart_error);
        }
    }
    Err(ApiError::field("image", "No file was submitted."))
}

#[utoipa::path(
    post,
    path = "/api/recipe/recipes/{id}/upload-image",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body(content_type = "multipart/form-data", content = UploadImageRequest),
    responses(
        (status = 200, description = "Image stored and attached to the recipe", body = RecipeImageResponse),
        (status = 400, description = "Missing or undecodable image", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_image(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    path: Result<Path<i32>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let mut multipart = multipart?;
    let data = read_image_field(&mut multipart).await?;

    // Nothing is written until the upload decodes
    let processed = process_image(&data).map_err(|e| ApiError::field("image", e))?;

    let mut conn = get_conn!(pool);
    let recipe = recipes::set_image(
        &mut conn,
        user.id,
        id,
        NewImage {
            content_type: &processed.content_type,
            data: &data,
            thumbnail: &processed.thumbnail,
        },
    )?;

    Ok((StatusCode::OK, Json(RecipeImageResponse::from(recipe))))
}
