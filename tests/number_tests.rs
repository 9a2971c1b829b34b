// tests/number_tests.rs

use std::sync::Arc;

use docsql::number::{LazyNumber, MAX_SAFE_INTEGER};

fn number(token: &str) -> LazyNumber {
    LazyNumber::new(Arc::from(token), 0..token.len()).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_constructor_rejects_out_of_bounds_span() {
    let err = LazyNumber::new(Arc::from("42"), 0..3).unwrap_err();
    assert_eq!(err.argument, "span");
}

#[test]
fn test_constructor_rejects_span_cutting_a_character() {
    // "π" is two bytes; 0..1 is not a char boundary.
    let err = LazyNumber::new(Arc::from("π1"), 0..1).unwrap_err();
    assert_eq!(err.argument, "span");
}

#[test]
fn test_constructor_rejects_non_number_tokens() {
    assert!(LazyNumber::new(Arc::from("true"), 0..4).is_err());
    assert!(LazyNumber::new(Arc::from("\"42\""), 0..4).is_err());
    assert!(LazyNumber::new(Arc::from("01"), 0..2).is_err());
    assert!(LazyNumber::new(Arc::from("1."), 0..2).is_err());
    assert!(LazyNumber::new(Arc::from("+1"), 0..2).is_err());
    assert!(LazyNumber::new(Arc::from(""), 0..0).is_err());
}

#[test]
fn test_constructor_accepts_json_number_grammar() {
    assert!(LazyNumber::new(Arc::from("0"), 0..1).is_ok());
    assert!(LazyNumber::new(Arc::from("-0"), 0..2).is_ok());
    assert!(LazyNumber::new(Arc::from("1.25"), 0..4).is_ok());
    assert!(LazyNumber::new(Arc::from("1e3"), 0..3).is_ok());
    assert!(LazyNumber::new(Arc::from("-2.5E-2"), 0..7).is_ok());
}

#[test]
fn test_token_inside_a_larger_document() {
    let doc: Arc<str> = Arc::from(r#"{"count": 42, "ratio": 0.5}"#);
    let count = LazyNumber::new(doc.clone(), 10..12).unwrap();
    assert_eq!(count.token(), "42");
    assert_eq!(count.as_integer(), Some(42));

    let ratio = LazyNumber::new(doc, 23..26).unwrap();
    assert_eq!(ratio.token(), "0.5");
    assert_eq!(ratio.as_floating_point(), 0.5);
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_safe_integer_boundary() {
    // 2^53 - 1 is the last exactly-representable integer magnitude.
    let below = number("9007199254740991");
    assert!(below.is_integer());
    assert!(!below.is_floating_point());
    assert_eq!(below.as_integer(), Some(9007199254740991));

    // 2^53 decodes cleanly but is past the safe boundary.
    let at = number("9007199254740992");
    assert!(at.is_floating_point());
    assert_eq!(at.as_integer(), None);
}

#[test]
fn test_negative_magnitudes_use_the_same_boundary() {
    assert!(number("-9007199254740991").is_integer());
    assert!(number("-9007199254740992").is_floating_point());
}

#[test]
fn test_fractional_values_are_floating_point() {
    assert!(number("1.5").is_floating_point());
    assert!(number("0.1").is_floating_point());
    assert_eq!(number("1.5").as_integer(), None);
}

#[test]
fn test_classification_follows_the_decoded_value() {
    // The token spells a fraction but decodes to a whole number.
    assert!(number("2.0").is_integer());
    assert_eq!(number("2.0").as_integer(), Some(2));

    // Exponents participate in decoding.
    assert!(number("1e3").is_integer());
    assert_eq!(number("1e3").as_integer(), Some(1000));
}

#[test]
fn test_max_safe_integer_constant() {
    assert_eq!(MAX_SAFE_INTEGER, (1u64 << 53) as f64 - 1.0);
}

// ============================================================================
// Memoized decode
// ============================================================================

#[test]
fn test_repeated_reads_are_bit_identical() {
    let n = number("0.30000000000000004");
    let first = n.as_floating_point().to_bits();
    for _ in 0..100 {
        assert_eq!(n.as_floating_point().to_bits(), first);
    }
}

#[test]
fn test_concurrent_first_reads_observe_one_value() {
    let n = number("123456.789");

    let bits: Vec<u64> = std::thread::scope(|scope| {
        (0..8)
            .map(|_| scope.spawn(|| n.as_floating_point().to_bits()))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert!(bits.iter().all(|b| *b == bits[0]));
    assert_eq!(f64::from_bits(bits[0]), 123456.789);
}

// ============================================================================
// Re-encoding
// ============================================================================

#[test]
fn test_reencode_chooses_integer_writer_for_integers() {
    let n = number("42").to_json_number().unwrap();
    assert!(n.is_i64());
    assert_eq!(n.as_i64(), Some(42));

    // A whole-valued token re-encodes as an integer even though it was
    // spelled with a fraction.
    let n = number("7.0").to_json_number().unwrap();
    assert!(n.is_i64());
    assert_eq!(n.as_i64(), Some(7));
}

#[test]
fn test_reencode_chooses_float_writer_for_floats() {
    let n = number("1.5").to_json_number().unwrap();
    assert!(!n.is_i64());
    assert_eq!(n.as_f64(), Some(1.5));

    let n = number("9007199254740992").to_json_number().unwrap();
    assert_eq!(n.as_f64(), Some(9007199254740992.0));
}

#[test]
fn test_reencode_fails_only_on_overflow() {
    // 1e999 saturates to infinity, which no JSON number can carry.
    let n = number("1e999");
    assert!(n.is_floating_point());
    assert_eq!(n.to_json_number(), None);
}
