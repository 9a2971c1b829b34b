//! Lazily-decoded JSON numbers.
//!
//! A [`LazyNumber`] points at a number token inside a shared raw-JSON buffer
//! and defers decoding until the value is first observed. The decoded `f64`
//! is then cached for the lifetime of the instance, so repeated reads are
//! bit-identical and concurrent first reads converge on a single value.
//!
//! Validation is fail-fast: the constructor rejects a span that falls
//! outside the buffer or a token that is not a JSON number. Decoding itself
//! can therefore never fail.
//!
//! # Classification
//!
//! A decoded value is an *integer* when it has no fractional part and its
//! magnitude does not exceed [`MAX_SAFE_INTEGER`] (2^53 − 1), the largest
//! magnitude an IEEE-754 double represents without losing integer
//! precision. Everything else is *floating-point*. Re-encoding through
//! [`LazyNumber::to_json_number`] picks the integer or float writer by this
//! rule, so the classification is visible in round-tripped documents.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use docsql::number::LazyNumber;
//!
//! let doc: Arc<str> = Arc::from(r#"{"count": 42, "ratio": 0.5}"#);
//!
//! let count = LazyNumber::new(doc.clone(), 10..12).unwrap();
//! assert!(count.is_integer());
//! assert_eq!(count.as_integer(), Some(42));
//!
//! let ratio = LazyNumber::new(doc, 23..26).unwrap();
//! assert!(ratio.is_floating_point());
//! assert_eq!(ratio.as_floating_point(), 0.5);
//! ```

use std::ops::Range;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::ast::expressions::InvalidArgument;

/// Largest integer magnitude an `f64` represents exactly: 2^53 − 1.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Pattern for a JSON number token (RFC 8259 grammar).
fn number_pattern() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| {
        Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?$")
            .expect("valid pattern")
    })
}

/// A number token inside a raw JSON document, decoded on first read.
#[derive(Debug, Clone)]
pub struct LazyNumber {
    document: Arc<str>,
    span: Range<usize>,
    decoded: OnceLock<f64>,
}

impl LazyNumber {
    /// Binds a number token at `span` inside `document`.
    ///
    /// No decoding happens here; only the token's shape is checked.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`] if the span falls outside the document (or cuts a
    /// UTF-8 character), or if the spanned text is not a JSON number token.
    pub fn new(document: Arc<str>, span: Range<usize>) -> Result<Self, InvalidArgument> {
        let Some(token) = document.get(span.clone()) else {
            return Err(InvalidArgument::new(
                "span",
                "a range inside the document buffer",
                format!("{}..{} in a {}-byte document", span.start, span.end, document.len()),
            ));
        };
        if !number_pattern().is_match(token) {
            return Err(InvalidArgument::new(
                "span",
                "a JSON number token",
                format!("{:?}", token),
            ));
        }
        Ok(LazyNumber {
            document,
            span,
            decoded: OnceLock::new(),
        })
    }

    /// The raw token text, undecoded.
    pub fn token(&self) -> &str {
        &self.document[self.span.clone()]
    }

    fn value(&self) -> f64 {
        // Token shape was validated at construction; parsing cannot fail
        // (out-of-range magnitudes saturate to infinity).
        *self
            .decoded
            .get_or_init(|| self.token().parse().unwrap_or(f64::NAN))
    }

    /// True when the decoded value has no fractional part and its magnitude
    /// is at most [`MAX_SAFE_INTEGER`].
    pub fn is_integer(&self) -> bool {
        let value = self.value();
        value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER
    }

    /// True when the value is not an integer.
    pub fn is_floating_point(&self) -> bool {
        !self.is_integer()
    }

    /// The value under its floating-point interpretation.
    pub fn as_floating_point(&self) -> f64 {
        self.value()
    }

    /// The value under its integer interpretation, or `None` when it
    /// classifies as floating-point.
    pub fn as_integer(&self) -> Option<i64> {
        if self.is_integer() {
            Some(self.value() as i64)
        } else {
            None
        }
    }

    /// Re-encodes the value, choosing the integer writer when the value
    /// classifies as an integer and the float writer otherwise.
    ///
    /// Returns `None` only when the decoded value cannot be carried by a
    /// JSON number at all (the token's magnitude overflowed `f64`).
    pub fn to_json_number(&self) -> Option<serde_json::Number> {
        match self.as_integer() {
            Some(i) => Some(serde_json::Number::from(i)),
            None => serde_json::Number::from_f64(self.value()),
        }
    }
}
