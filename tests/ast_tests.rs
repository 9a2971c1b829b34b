// tests/ast_tests.rs

use docsql::ast::{
    BinaryOp, ConversionTarget, InvalidArgument, Literal, ObjectProperty, Query, ScalarExpr,
};

fn root() -> ScalarExpr {
    ScalarExpr::property_ref(None, "c").unwrap()
}

fn prop(name: &str) -> ScalarExpr {
    ScalarExpr::property_ref(Some(root()), name).unwrap()
}

// ============================================================================
// Object construction
// ============================================================================

#[test]
fn test_object_create_empty_is_valid() {
    let expr = ScalarExpr::object_create(vec![]);
    assert!(matches!(expr, ScalarExpr::ObjectCreate(ref e) if e.properties.is_empty()));
    assert_eq!(docsql::to_sql(&expr), "{}");
}

#[test]
fn test_object_create_duplicate_names_are_accepted() {
    let expr = ScalarExpr::object_create(vec![
        ObjectProperty::new("a", ScalarExpr::integer(1)),
        ObjectProperty::new("a", ScalarExpr::integer(2)),
    ]);

    match expr {
        ScalarExpr::ObjectCreate(e) => {
            assert_eq!(e.properties.len(), 2);
            assert_eq!(e.properties[0].name, "a");
            assert_eq!(e.properties[1].name, "a");
        }
        _ => panic!("Expected object construction"),
    }
}

#[test]
fn test_object_create_preserves_property_order() {
    let expr = ScalarExpr::object_create(vec![
        ObjectProperty::new("z", ScalarExpr::integer(1)),
        ObjectProperty::new("a", ScalarExpr::integer(2)),
    ]);
    assert_eq!(docsql::to_sql(&expr), "{\"z\": 1, \"a\": 2}");
}

// ============================================================================
// Factory validation
// ============================================================================

#[test]
fn test_in_list_rejects_empty_haystack() {
    let err = ScalarExpr::in_list(prop("status"), false, vec![]).unwrap_err();
    assert_eq!(err.argument, "haystack");
}

#[test]
fn test_in_list_accepts_single_candidate() {
    let expr = ScalarExpr::in_list(prop("status"), false, vec![ScalarExpr::string("open")]);
    assert!(matches!(expr, Ok(ScalarExpr::In(_))));
}

#[test]
fn test_function_call_rejects_empty_name() {
    let err = ScalarExpr::function_call("", vec![]).unwrap_err();
    assert_eq!(err.argument, "name");
}

#[test]
fn test_function_call_rejects_malformed_name() {
    assert!(ScalarExpr::function_call("not a name", vec![]).is_err());
    assert!(ScalarExpr::function_call("1LOWER", vec![]).is_err());
    assert!(ScalarExpr::function_call("LOWER()", vec![]).is_err());
}

#[test]
fn test_function_call_accepts_identifier_names() {
    assert!(ScalarExpr::function_call("LOWER", vec![prop("name")]).is_ok());
    assert!(ScalarExpr::function_call("ST_DISTANCE", vec![]).is_ok());
    assert!(ScalarExpr::function_call("_private", vec![]).is_ok());
    assert!(ScalarExpr::udf_call("tax", vec![prop("price")]).is_ok());
}

#[test]
fn test_geo_near_rejects_bad_distances() {
    let err = ScalarExpr::geo_near(prop("loc"), ScalarExpr::null(), -1.0, 5.0).unwrap_err();
    assert_eq!(err.argument, "min_distance");

    let err = ScalarExpr::geo_near(prop("loc"), ScalarExpr::null(), 0.0, f64::NAN).unwrap_err();
    assert_eq!(err.argument, "max_distance");

    let err = ScalarExpr::geo_near(prop("loc"), ScalarExpr::null(), 0.0, f64::INFINITY).unwrap_err();
    assert_eq!(err.argument, "max_distance");

    let err = ScalarExpr::geo_near(prop("loc"), ScalarExpr::null(), 10.0, 5.0).unwrap_err();
    assert_eq!(err.argument, "min_distance");
}

#[test]
fn test_geo_near_accepts_valid_range() {
    assert!(ScalarExpr::geo_near(prop("loc"), ScalarExpr::null(), 0.0, 5.0).is_ok());
    assert!(ScalarExpr::geo_near(prop("loc"), ScalarExpr::null(), 2.0, 2.0).is_ok());
}

#[test]
fn test_property_ref_rejects_empty_name() {
    let err = ScalarExpr::property_ref(None, "").unwrap_err();
    assert_eq!(err.argument, "name");
}

#[test]
fn test_invalid_argument_names_expected_and_actual_shape() {
    let err = ScalarExpr::in_list(prop("x"), false, vec![]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("haystack"));
    assert!(message.contains("expected"));
    assert!(message.contains("empty"));
}

#[test]
fn test_invalid_argument_is_an_error_type() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    let err = InvalidArgument::new("x", "something", "something else");
    assert_error(&err);
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_literal_from_json_scalars() {
    assert_eq!(Literal::from_json(&serde_json::json!(null)), Some(Literal::Null));
    assert_eq!(Literal::from_json(&serde_json::json!(true)), Some(Literal::Boolean(true)));
    assert_eq!(Literal::from_json(&serde_json::json!(42)), Some(Literal::Integer(42)));
    assert_eq!(Literal::from_json(&serde_json::json!(-7)), Some(Literal::Integer(-7)));
    assert_eq!(Literal::from_json(&serde_json::json!(1.5)), Some(Literal::Float(1.5)));
    assert_eq!(
        Literal::from_json(&serde_json::json!("hi")),
        Some(Literal::String("hi".to_string()))
    );
}

#[test]
fn test_literal_from_json_rejects_containers() {
    assert_eq!(Literal::from_json(&serde_json::json!([1, 2])), None);
    assert_eq!(Literal::from_json(&serde_json::json!({"a": 1})), None);
}

#[test]
fn test_literal_from_json_wide_unsigned_becomes_float() {
    let value = serde_json::json!(u64::MAX);
    assert!(matches!(Literal::from_json(&value), Some(Literal::Float(_))));
}

// ============================================================================
// Tree structure
// ============================================================================

#[test]
fn test_children_are_owned_by_the_parent() {
    let left = prop("a");
    let right = prop("b");
    let expr = ScalarExpr::binary(BinaryOp::Add, left, right);

    match expr {
        ScalarExpr::Binary(e) => {
            assert!(matches!(*e.left, ScalarExpr::PropertyRef(_)));
            assert!(matches!(*e.right, ScalarExpr::PropertyRef(_)));
        }
        _ => panic!("Expected binary expression"),
    }
}

#[test]
fn test_trees_compare_structurally() {
    let build = || {
        ScalarExpr::conditional(
            ScalarExpr::binary(BinaryOp::GreaterThan, prop("age"), ScalarExpr::integer(18)),
            ScalarExpr::string("adult"),
            ScalarExpr::string("minor"),
        )
    };
    assert_eq!(build(), build());
    assert_ne!(build(), ScalarExpr::null());
}

#[test]
fn test_clone_is_deep_and_equal() {
    let expr = ScalarExpr::object_create(vec![ObjectProperty::new(
        "items",
        ScalarExpr::array_create(vec![ScalarExpr::integer(1), ScalarExpr::integer(2)]),
    )]);
    let copy = expr.clone();
    assert_eq!(expr, copy);
}

#[test]
fn test_subquery_payload_carries_projection_and_predicate() {
    let query = Query::select(prop("name"))
        .filtered(ScalarExpr::binary(BinaryOp::GreaterThan, prop("age"), ScalarExpr::integer(18)));
    let expr = ScalarExpr::subquery(query);

    match expr {
        ScalarExpr::Subquery(e) => {
            assert!(matches!(*e.query.projection, ScalarExpr::PropertyRef(_)));
            assert!(e.query.predicate.is_some());
        }
        _ => panic!("Expected subquery"),
    }
}

#[test]
fn test_kind_names_each_variant() {
    assert_eq!(ScalarExpr::null().kind(), "Literal");
    assert_eq!(ScalarExpr::array_create(vec![]).kind(), "ArrayCreate");
    assert_eq!(
        ScalarExpr::conversion(ScalarExpr::null(), ConversionTarget::Number).kind(),
        "Conversion"
    );
    assert_eq!(root().kind(), "PropertyRef");
}

#[test]
fn test_trees_are_shareable_across_threads() {
    let expr = std::sync::Arc::new(ScalarExpr::binary(
        BinaryOp::Multiply,
        prop("price"),
        ScalarExpr::float(1.1),
    ));

    let rendered: Vec<String> = std::thread::scope(|scope| {
        (0..4)
            .map(|_| {
                let expr = std::sync::Arc::clone(&expr);
                scope.spawn(move || docsql::to_sql(&expr))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert!(rendered.iter().all(|text| text == &rendered[0]));
}
