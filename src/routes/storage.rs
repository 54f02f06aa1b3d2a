//! Storage upload route.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Json;
use serde::Serialize;

use crate::supabase::BackendError;
use crate::state::AppState;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub key: String,
}

pub(crate) fn storage_error_to_status(err: &BackendError) -> StatusCode {
    match err {
        BackendError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// Reject empty names and dot segments.
fn valid_object_path(bucket: &str, path: &str) -> bool {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    !bucket.is_empty()
        && bucket != "."
        && bucket != ".."
        && !segments.is_empty()
        && segments.iter().all(|s| *s != "." && *s != "..")
}

/// `PUT /api/storage/{bucket}/{*path}`: store the raw request body.
pub async fn upload(
    State(state): State<AppState>,
    Path((bucket, path)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>, StatusCode> {
    if !valid_object_path(&bucket, &path) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE);

    let key = state
        .backend
        .upload(&bucket, &path, body.to_vec(), content_type)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, %bucket, %path, "storage upload failed");
            storage_error_to_status(&e)
        })?;

    Ok(Json(UploadResponse { key }))
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
