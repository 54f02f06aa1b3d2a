//! Image listing route.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::services::images::{self as images_svc, ImageView, LoadImagesParams};
use crate::state::AppState;

pub const MISSING_PARAMETERS: &str = "Missing required parameters";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesQuery {
    pub table_name: Option<String>,
    pub image_type_id: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ImagesResponse {
    pub images: Vec<ImageView>,
    pub error: Option<String>,
}

impl ImagesResponse {
    fn failed(error: String) -> Self {
        Self { images: Vec::new(), error: Some(error) }
    }
}

/// Lenient integer parse: optional leading whitespace and sign, then the
/// leading digits. A `0x`/`0X` prefix switches to hexadecimal. `"3abc"` is 3,
/// `"0x10"` is 16, `"abc"` has no value.
#[must_use]
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => ("-", &trimmed[1..]),
        Some(b'+') => ("", &trimmed[1..]),
        _ => ("", trimmed),
    };
    let (radix, body) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let digits_len = body.chars().take_while(|c| c.is_digit(radix)).count();
    if digits_len == 0 {
        return None;
    }
    i64::from_str_radix(&format!("{sign}{}", &body[..digits_len]), radix).ok()
}

/// `GET /api/images?tableName=<table>&imageTypeId=<id>`: list one image type.
pub async fn get_images(
    State(state): State<AppState>,
    Query(query): Query<ImagesQuery>,
) -> (StatusCode, Json<ImagesResponse>) {
    let table_name = query.table_name.filter(|v| !v.is_empty());
    let image_type_id = query.image_type_id.filter(|v| !v.is_empty());
    let (Some(table_name), Some(image_type_id)) = (table_name, image_type_id) else {
        return (StatusCode::BAD_REQUEST, Json(ImagesResponse::failed(MISSING_PARAMETERS.to_owned())));
    };

    let params = LoadImagesParams { table_name, image_type_id: parse_leading_int(&image_type_id) };
    let result = images_svc::load_images(&state, &params).await;

    match result.error {
        Some(error) => (StatusCode::INTERNAL_SERVER_ERROR, Json(ImagesResponse::failed(error))),
        None => (StatusCode::OK, Json(ImagesResponse { images: result.images, error: None })),
    }
}

#[cfg(test)]
#[path = "images_test.rs"]
mod tests;
