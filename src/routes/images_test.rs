use std::sync::Arc;

use super::*;
use crate::state::test_helpers::{self, MockSupabase, image_row};

fn query(table: Option<&str>, id: Option<&str>) -> Query<ImagesQuery> {
    Query(ImagesQuery { table_name: table.map(str::to_owned), image_type_id: id.map(str::to_owned) })
}

fn foo_state() -> (AppState, Arc<MockSupabase>) {
    let api = Arc::new(MockSupabase::with_rows(vec![
        image_row(10, 3, Some("approved")),
        image_row(11, 3, None),
        image_row(12, 5, Some("rejected")),
    ]));
    (test_helpers::test_app_state_with_api(Arc::clone(&api)), api)
}

// =============================================================================
// parse_leading_int
// =============================================================================

#[test]
fn parse_leading_int_cases() {
    assert_eq!(parse_leading_int("3"), Some(3));
    assert_eq!(parse_leading_int("  42"), Some(42));
    assert_eq!(parse_leading_int("3abc"), Some(3));
    assert_eq!(parse_leading_int("-7"), Some(-7));
    assert_eq!(parse_leading_int("+8"), Some(8));
    assert_eq!(parse_leading_int("abc"), None);
    assert_eq!(parse_leading_int("-"), None);
    assert_eq!(parse_leading_int("   "), None);
    assert_eq!(parse_leading_int("1.9"), Some(1));
}

#[test]
fn parse_leading_int_reads_hex_prefix() {
    assert_eq!(parse_leading_int("0x10"), Some(16));
    assert_eq!(parse_leading_int("0XfF"), Some(255));
    assert_eq!(parse_leading_int("-0x10"), Some(-16));
    assert_eq!(parse_leading_int("0x1g"), Some(1));
    assert_eq!(parse_leading_int("0x"), None);
    assert_eq!(parse_leading_int("0xz"), None);
}

#[test]
fn parse_leading_int_overflow_has_no_value() {
    assert_eq!(parse_leading_int("99999999999999999999999"), None);
}

#[test]
fn query_string_uses_camel_case_keys() {
    let uri: axum::http::Uri = "/api/images?tableName=tbl_foo&imageTypeId=3".parse().unwrap();
    let Query(parsed) = Query::<ImagesQuery>::try_from_uri(&uri).unwrap();
    assert_eq!(parsed.table_name.as_deref(), Some("tbl_foo"));
    assert_eq!(parsed.image_type_id.as_deref(), Some("3"));
}

// =============================================================================
// get_images
// =============================================================================

#[tokio::test]
async fn two_matching_rows_one_without_status() {
    let (state, _) = foo_state();
    let (status, Json(body)) = get_images(State(state), query(Some("tbl_foo"), Some("3"))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.error.is_none());
    assert_eq!(body.images.len(), 2);
    assert_eq!(body.images[0].status_type_name, "approved");
    assert_eq!(body.images[1].status_type_name, "");
    assert_eq!(body.images[1].image_type_name, "receipt");
}

#[tokio::test]
async fn missing_image_type_id_is_bad_request() {
    let (state, api) = foo_state();
    let (status, Json(body)) = get_images(State(state), query(Some("tbl_foo"), None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, ImagesResponse { images: Vec::new(), error: Some(MISSING_PARAMETERS.into()) });
    assert_eq!(api.query_count(), 0);
}

#[tokio::test]
async fn missing_or_empty_table_name_is_bad_request() {
    for table in [None, Some("")] {
        let (state, _) = foo_state();
        let (status, Json(body)) = get_images(State(state), query(table, Some("3"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.as_deref(), Some(MISSING_PARAMETERS));
    }
}

#[tokio::test]
async fn empty_image_type_id_is_bad_request() {
    let (state, _) = foo_state();
    let (status, _) = get_images(State(state), query(Some("tbl_foo"), Some(""))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_id_is_empty_success() {
    let (state, _) = foo_state();
    let (status, Json(body)) = get_images(State(state), query(Some("tbl_foo"), Some("abc"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ImagesResponse { images: Vec::new(), error: None });
}

#[tokio::test]
async fn service_error_is_internal_error_with_message() {
    let api = Arc::new(MockSupabase::failing(403, Some("permission denied for table tbl_foo")));
    let state = test_helpers::test_app_state_with_api(api);

    let (status, Json(body)) = get_images(State(state), query(Some("tbl_foo"), Some("3"))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.images.is_empty());
    assert_eq!(body.error.as_deref(), Some("permission denied for table tbl_foo"));
}

#[tokio::test]
async fn service_error_without_message_uses_fallback() {
    let api = Arc::new(MockSupabase::failing(500, None));
    let state = test_helpers::test_app_state_with_api(api);

    let (status, Json(body)) = get_images(State(state), query(Some("tbl_foo"), Some("3"))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.error.as_deref(), Some(images_svc::LOAD_IMAGES_FALLBACK_ERROR));
}

#[tokio::test]
async fn response_serializes_null_error_on_success() {
    let (state, _) = foo_state();
    let (_, Json(body)) = get_images(State(state), query(Some("tbl_foo"), Some("5"))).await;
    let json = serde_json::to_value(&body).unwrap();
    assert!(json["error"].is_null());
    assert_eq!(json["images"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["images"][0]["status_type_name"], "rejected");
}
