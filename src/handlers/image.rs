use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::seed::ADMIN_ROLE;
use crate::state::AppState;
use crate::utils::filename::validate_upload_filename;
use crate::utils::object_url::public_url;

pub fn image_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(10 * 1024 * 1024) // 10 MB
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "Image Upload",
    operation_id = "uploadImage",
    summary = "Upload an image",
    description = "Uploads an image file to object storage under a collision-free key \
        (`<uuid>_<original filename>`) and returns the public URL as plain text. \
        Requires the admin role.",
    request_body(content_type = "multipart/form-data", description = "Image file in the `file` field"),
    responses(
        (status = 200, description = "Public URL of the stored image", body = String),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart))]
pub async fn upload_image(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_role(ADMIN_ROLE)?;

    let mut uploaded: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| {
                        AppError::Validation("File field must have a filename".into())
                    })?;
                let content_type = field.content_type().map(|s| s.to_string());
                let data = read_field(field, state.config.storage.max_upload_size).await?;
                uploaded = Some((file_name, content_type, data));
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let (file_name, content_type, data) =
        uploaded.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    if data.is_empty() {
        return Err(AppError::Validation("Empty file cannot be uploaded".into()));
    }

    let file_name = validate_upload_filename(&file_name)
        .map_err(|e| AppError::Validation(e.message().into()))?
        .to_string();

    let content_type = content_type
        .or_else(|| {
            mime_guess::from_path(&file_name)
                .first()
                .map(|m| m.to_string())
        })
        .unwrap_or_else(|| "application/octet-stream".to_string());

    // Fresh UUID prefix avoids key collisions while keeping a readable suffix.
    let key = format!("{}_{}", Uuid::new_v4(), file_name);

    state
        .store
        .put(&key, data, &content_type)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let url = public_url(&state.config.storage.public_base_url, &key);

    Ok((StatusCode::OK, url))
}

/// Read a multipart field into memory, enforcing the configured size limit.
async fn read_field(
    mut field: axum::extract::multipart::Field<'_>,
    max_size: u64,
) -> Result<Vec<u8>, AppError> {
    let mut data = Vec::new();

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
    {
        if (data.len() + chunk.len()) as u64 > max_size {
            return Err(AppError::Validation(format!(
                "File exceeds maximum size of {max_size} bytes"
            )));
        }
        data.extend_from_slice(&chunk);
    }

    Ok(data)
}
