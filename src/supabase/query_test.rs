use super::*;

#[test]
fn select_clause_marks_inner_joins_only() {
    let q = SelectQuery::table("tbl_foo")
        .inner_join("tbl_image_types", &["image_type_name"])
        .left_join("tbl_status_types", &["status_type_name"]);
    assert_eq!(q.select_clause(), "*,tbl_image_types!inner(image_type_name),tbl_status_types(status_type_name)");
}

#[test]
fn query_pairs_put_select_first_then_filters() {
    let q = SelectQuery::table("tbl_foo")
        .select(&["file_name", "image_url"])
        .eq("tbl_image_types.image_type_id", 3);
    assert_eq!(
        q.query_pairs(),
        vec![
            ("select".to_owned(), "file_name,image_url".to_owned()),
            ("tbl_image_types.image_type_id".to_owned(), "eq.3".to_owned()),
        ]
    );
}

#[test]
fn accessors_expose_builder_parts() {
    let q = SelectQuery::table("tbl_foo")
        .inner_join("tbl_image_types", &["image_type_name"])
        .eq("image_type_id", 9);
    assert_eq!(q.table_name(), "tbl_foo");
    assert_eq!(q.joins().len(), 1);
    assert_eq!(q.joins()[0].kind, JoinKind::Inner);
    assert_eq!(q.filters()[0], Filter { column: "image_type_id".into(), value: "9".into() });
}

#[test]
fn validate_accepts_plain_identifiers() {
    let q = SelectQuery::table("tbl_Foo_2").left_join("tbl_status_types", &["status_type_name"]);
    assert!(q.validate().is_ok());
}

#[test]
fn validate_rejects_path_like_table() {
    let err = SelectQuery::table("../auth").validate().unwrap_err();
    assert!(matches!(err, BackendError::InvalidTable(name) if name == "../auth"));
}

#[test]
fn validate_rejects_bad_relation() {
    let q = SelectQuery::table("tbl_foo").inner_join("tbl image", &["x"]);
    assert!(matches!(q.validate(), Err(BackendError::InvalidTable(_))));
}

#[test]
fn is_identifier_edge_cases() {
    assert!(!is_identifier(""));
    assert!(!is_identifier("tbl-foo"));
    assert!(!is_identifier("tbl_föo"));
    assert!(is_identifier("_"));
}
