//! Image loader: one joined query, reshaped into flat view records.
//!
//! DESIGN
//! ======
//! Rows come back from PostgREST with the lookup relations embedded as
//! nested objects. The loader keeps only their names, defaulting to an empty
//! string, so the view record never exposes the join containers.
//!
//! ERROR HANDLING
//! ==============
//! Failures never escape: they are logged and folded into the `error` field.
//! The result always carries both fields, including for an empty table.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::state::AppState;
use crate::supabase::BackendError;
use crate::supabase::query::{SelectQuery, is_identifier};

pub const IMAGE_TYPES_RELATION: &str = "tbl_image_types";
pub const STATUS_TYPES_RELATION: &str = "tbl_status_types";
pub const LOAD_IMAGES_FALLBACK_ERROR: &str = "Failed to load images";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadImagesParams {
    pub table_name: String,
    /// `None` when the request value had no leading digits. Such a filter
    /// matches no row.
    pub image_type_id: Option<i64>,
}

/// Display-ready projection of one image row. Table columns pass through
/// untouched, so their JSON type is whatever the table stores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageView {
    pub file_name: Value,
    pub text_data: Value,
    pub created_at: Value,
    pub updated_at: Value,
    pub image_url: Value,
    pub text_raw: Value,
    pub user_id: Value,
    pub image_id: Value,
    pub image_type_name: String,
    pub status_type_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LoadImagesResult {
    pub images: Vec<ImageView>,
    pub error: Option<String>,
}

impl LoadImagesResult {
    fn failed(message: String) -> Self {
        Self { images: Vec::new(), error: Some(message) }
    }
}

// =============================================================================
// ROW DECODING
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImageRow {
    file_name: Value,
    text_data: Value,
    created_at: Value,
    updated_at: Value,
    image_url: Value,
    text_raw: Value,
    user_id: Value,
    image_id: Value,
    tbl_image_types: Value,
    tbl_status_types: Value,
}

/// Name held by an embedded relation, or `""` when the relation is absent or
/// the name is null, empty or not a string.
///
/// PostgREST embeds a many-to-one relation as an object and a one-to-many
/// relation as an array; only the first element of an array counts.
fn embedded_name(embed: &Value, key: &str) -> String {
    let first = match embed {
        Value::Array(items) => items.first(),
        other => Some(other),
    };
    first
        .and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

impl From<ImageRow> for ImageView {
    fn from(row: ImageRow) -> Self {
        Self {
            image_type_name: embedded_name(&row.tbl_image_types, "image_type_name"),
            status_type_name: embedded_name(&row.tbl_status_types, "status_type_name"),
            file_name: row.file_name,
            text_data: row.text_data,
            created_at: row.created_at,
            updated_at: row.updated_at,
            image_url: row.image_url,
            text_raw: row.text_raw,
            user_id: row.user_id,
            image_id: row.image_id,
        }
    }
}

// =============================================================================
// LOADER
// =============================================================================

/// Query for images of one type. Image types join `!inner` so the type
/// filter applies; statuses join left so unclassified rows keep an empty
/// status name.
#[must_use]
pub fn image_query(table_name: &str, image_type_id: i64) -> SelectQuery {
    SelectQuery::table(table_name)
        .inner_join(IMAGE_TYPES_RELATION, &["image_type_name"])
        .left_join(STATUS_TYPES_RELATION, &["status_type_name"])
        .eq(&format!("{IMAGE_TYPES_RELATION}.image_type_id"), image_type_id)
}

/// Load and reshape the images of one type. `loading` reads busy for the
/// duration of the call.
pub async fn load_images(state: &AppState, params: &LoadImagesParams) -> LoadImagesResult {
    let _loading = state.ui.loading.begin();

    match fetch_images(state, params).await {
        Ok(images) => LoadImagesResult { images, error: None },
        Err(e) => {
            error!(error = %e, table = %params.table_name, "server error loading images");
            LoadImagesResult::failed(error_message(&e))
        }
    }
}

async fn fetch_images(state: &AppState, params: &LoadImagesParams) -> Result<Vec<ImageView>, BackendError> {
    if !is_identifier(&params.table_name) {
        return Err(BackendError::InvalidTable(params.table_name.clone()));
    }
    if !state.permits_table(&params.table_name) {
        return Err(BackendError::TableNotPermitted(params.table_name.clone()));
    }
    let Some(image_type_id) = params.image_type_id else {
        return Ok(Vec::new());
    };

    let rows = state
        .backend
        .select(&image_query(&params.table_name, image_type_id))
        .await?;

    rows.into_iter()
        .map(|row| {
            serde_json::from_value::<ImageRow>(row)
                .map(ImageView::from)
                .map_err(|e| BackendError::Decode(e.to_string()))
        })
        .collect()
}

/// Message surfaced to the caller: the service's own text when it sent one.
#[must_use]
pub fn error_message(err: &BackendError) -> String {
    match err {
        BackendError::Api { message: Some(message), .. } => message.clone(),
        BackendError::Api { message: None, .. } => LOAD_IMAGES_FALLBACK_ERROR.to_owned(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "images_test.rs"]
mod tests;
