use std::sync::OnceLock;

use regex::Regex;

use crate::ast::operators::{BinaryOp, ConversionTarget, UnaryOp};
use crate::ast::query::Query;

/// The single error raised by this crate.
///
/// Every dynamic precondition in the crate is checked at construction time,
/// and every violation is reported through this one type: the name of the
/// offending argument, the shape that was expected, and the shape that was
/// actually supplied.
///
/// # Examples
///
/// ```
/// use docsql::ast::ScalarExpr;
///
/// let err = ScalarExpr::function_call("", vec![]).unwrap_err();
/// assert_eq!(err.argument, "name");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidArgument {
    /// Name of the offending argument.
    pub argument: &'static str,

    /// The shape the argument was expected to have.
    pub expected: &'static str,

    /// The shape the argument actually had.
    pub actual: String,
}

impl InvalidArgument {
    pub fn new(argument: &'static str, expected: &'static str, actual: impl Into<String>) -> Self {
        InvalidArgument {
            argument,
            expected,
            actual: actual.into(),
        }
    }
}

impl std::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid argument `{}`: expected {}, got {}",
            self.argument, self.expected, self.actual
        )
    }
}

impl std::error::Error for InvalidArgument {}

/// Pattern for names of built-in and user-defined functions.
pub(crate) fn identifier_pattern() -> &'static Regex {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid pattern"))
}

/// A literal scalar value.
///
/// Integers and floats are kept apart end to end, the same distinction the
/// document layer preserves when it decodes JSON numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),
}

impl Literal {
    /// Builds a literal from a JSON scalar.
    ///
    /// Returns `None` for arrays and objects: those are expressions
    /// ([`ScalarExpr::array_create`], [`ScalarExpr::object_create`]), not
    /// literals. Numbers that fit an `i64` stay integers; everything else
    /// becomes a float.
    ///
    /// # Examples
    ///
    /// ```
    /// use docsql::ast::Literal;
    ///
    /// let value = serde_json::json!(42);
    /// assert_eq!(Literal::from_json(&value), Some(Literal::Integer(42)));
    ///
    /// let value = serde_json::json!([1, 2]);
    /// assert_eq!(Literal::from_json(&value), None);
    /// ```
    pub fn from_json(value: &serde_json::Value) -> Option<Literal> {
        match value {
            serde_json::Value::Null => Some(Literal::Null),
            serde_json::Value::Bool(b) => Some(Literal::Boolean(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Literal::Integer(i))
                } else {
                    n.as_f64().map(Literal::Float)
                }
            }
            serde_json::Value::String(s) => Some(Literal::String(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

/// Array construction: `[a, b, c]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayCreateExpr {
    pub items: Vec<ScalarExpr>,
}

/// Subquery coerced to an array: `ARRAY(SELECT ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayScalarExpr {
    pub query: Query,
}

/// Range test: `x BETWEEN a AND b` / `x NOT BETWEEN a AND b`
#[derive(Debug, Clone, PartialEq)]
pub struct BetweenExpr {
    pub needle: Box<ScalarExpr>,
    pub negated: bool,
    pub start: Box<ScalarExpr>,
    pub end: Box<ScalarExpr>,
}

/// Binary operation (arithmetic, comparison, logical, bitwise, concat).
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<ScalarExpr>,
    pub right: Box<ScalarExpr>,
}

/// Null-coalescing pair: `left ?? right`
#[derive(Debug, Clone, PartialEq)]
pub struct CoalesceExpr {
    pub left: Box<ScalarExpr>,
    pub right: Box<ScalarExpr>,
}

/// Ternary conditional: `condition ? consequent : alternative`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpr {
    pub condition: Box<ScalarExpr>,
    pub consequent: Box<ScalarExpr>,
    pub alternative: Box<ScalarExpr>,
}

/// Type conversion of a scalar to a target shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionExpr {
    pub expr: Box<ScalarExpr>,
    pub target: ConversionTarget,
}

/// Subquery existence test: `EXISTS(SELECT ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct ExistsExpr {
    pub query: Query,
}

/// Built-in or user-defined function call.
///
/// # Examples
/// ```text
/// LOWER(c.name)
/// udf.discount(c.price)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallExpr {
    pub name: String,
    pub is_udf: bool,
    pub args: Vec<ScalarExpr>,
}

/// Proximity test over a spatial index.
///
/// Lowers to a distance-range check between a document property and a
/// geometry value.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoNearExpr {
    pub property: Box<ScalarExpr>,
    pub geometry: Box<ScalarExpr>,
    pub min_distance: f64,
    pub max_distance: f64,
}

/// Membership test: `x IN (a, b, c)` / `x NOT IN (a, b, c)`
#[derive(Debug, Clone, PartialEq)]
pub struct InExpr {
    pub needle: Box<ScalarExpr>,
    pub negated: bool,
    pub haystack: Vec<ScalarExpr>,
}

/// Indexer access: `member[index]`
///
/// The index is itself a scalar expression: a string for object member
/// lookup, a number for array element lookup, or anything computed.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberIndexerExpr {
    pub member: Box<ScalarExpr>,
    pub index: Box<ScalarExpr>,
}

/// A single `name: value` pair inside an object construction.
///
/// Carries no identity beyond its position in the owning
/// [`ObjectCreateExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub name: String,
    pub value: ScalarExpr,
}

impl ObjectProperty {
    pub fn new(name: impl Into<String>, value: ScalarExpr) -> Self {
        ObjectProperty {
            name: name.into(),
            value,
        }
    }
}

/// Object construction: `{"name": expr, ...}`
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectCreateExpr {
    pub properties: Vec<ObjectProperty>,
}

/// Dotted property reference: `c.address.city`
///
/// A reference with no member is a root identifier (`c`); chains are built
/// by nesting.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRefExpr {
    pub member: Option<Box<ScalarExpr>>,
    pub name: String,
}

/// Scalar subquery: `(SELECT ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct SubqueryExpr {
    pub query: Query,
}

/// Unary operation: `NOT x`, `-x`, `+x`, `~x`
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<ScalarExpr>,
}

/// A scalar expression node.
///
/// The taxonomy is closed: these seventeen variants are the entire dialect,
/// and every visitor must handle all of them. Nodes are built through the
/// factory operations below and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarExpr {
    ArrayCreate(ArrayCreateExpr),
    ArrayScalar(ArrayScalarExpr),
    Between(BetweenExpr),
    Binary(BinaryExpr),
    Coalesce(CoalesceExpr),
    Conditional(ConditionalExpr),
    Conversion(ConversionExpr),
    Exists(ExistsExpr),
    FunctionCall(FunctionCallExpr),
    GeoNearCall(GeoNearExpr),
    In(InExpr),
    Literal(Literal),
    MemberIndexer(MemberIndexerExpr),
    ObjectCreate(ObjectCreateExpr),
    PropertyRef(PropertyRefExpr),
    Subquery(SubqueryExpr),
    Unary(UnaryExpr),
}

impl ScalarExpr {
    /// Array construction from already-built element expressions.
    ///
    /// An empty item list is valid and renders as `[]`.
    pub fn array_create(items: Vec<ScalarExpr>) -> ScalarExpr {
        ScalarExpr::ArrayCreate(ArrayCreateExpr { items })
    }

    /// Coerces a subquery's result set to an array value.
    pub fn array_scalar(query: Query) -> ScalarExpr {
        ScalarExpr::ArrayScalar(ArrayScalarExpr { query })
    }

    /// Range test. `negated` selects `NOT BETWEEN`.
    pub fn between(needle: ScalarExpr, negated: bool, start: ScalarExpr, end: ScalarExpr) -> ScalarExpr {
        ScalarExpr::Between(BetweenExpr {
            needle: Box::new(needle),
            negated,
            start: Box::new(start),
            end: Box::new(end),
        })
    }

    /// Binary operation over two child expressions.
    ///
    /// The operator tag is drawn from the closed [`BinaryOp`] set, so an
    /// illegal tag is unrepresentable.
    pub fn binary(op: BinaryOp, left: ScalarExpr, right: ScalarExpr) -> ScalarExpr {
        ScalarExpr::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Null-coalescing pair: the right side is the fallback.
    pub fn coalesce(left: ScalarExpr, right: ScalarExpr) -> ScalarExpr {
        ScalarExpr::Coalesce(CoalesceExpr {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Ternary conditional.
    pub fn conditional(
        condition: ScalarExpr,
        consequent: ScalarExpr,
        alternative: ScalarExpr,
    ) -> ScalarExpr {
        ScalarExpr::Conditional(ConditionalExpr {
            condition: Box::new(condition),
            consequent: Box::new(consequent),
            alternative: Box::new(alternative),
        })
    }

    /// Conversion of a scalar to a target shape from the closed
    /// [`ConversionTarget`] set.
    pub fn conversion(expr: ScalarExpr, target: ConversionTarget) -> ScalarExpr {
        ScalarExpr::Conversion(ConversionExpr {
            expr: Box::new(expr),
            target,
        })
    }

    /// Subquery existence test.
    pub fn exists(query: Query) -> ScalarExpr {
        ScalarExpr::Exists(ExistsExpr { query })
    }

    /// Built-in function call.
    ///
    /// The name must be identifier-shaped (`[A-Za-z_][A-Za-z0-9_]*`).
    /// An empty argument list is valid.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`] if the name is empty or not identifier-shaped.
    pub fn function_call(
        name: impl Into<String>,
        args: Vec<ScalarExpr>,
    ) -> Result<ScalarExpr, InvalidArgument> {
        Self::call(name.into(), false, args)
    }

    /// User-defined function call; renders with the `udf.` prefix.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`] if the name is empty or not identifier-shaped.
    pub fn udf_call(
        name: impl Into<String>,
        args: Vec<ScalarExpr>,
    ) -> Result<ScalarExpr, InvalidArgument> {
        Self::call(name.into(), true, args)
    }

    fn call(name: String, is_udf: bool, args: Vec<ScalarExpr>) -> Result<ScalarExpr, InvalidArgument> {
        if !identifier_pattern().is_match(&name) {
            return Err(InvalidArgument::new(
                "name",
                "an identifier-shaped function name",
                format!("{:?}", name),
            ));
        }
        Ok(ScalarExpr::FunctionCall(FunctionCallExpr { name, is_udf, args }))
    }

    /// Spatial proximity test between a document property and a geometry.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`] if either distance is non-finite or negative, or
    /// if `min_distance` exceeds `max_distance`.
    pub fn geo_near(
        property: ScalarExpr,
        geometry: ScalarExpr,
        min_distance: f64,
        max_distance: f64,
    ) -> Result<ScalarExpr, InvalidArgument> {
        if !min_distance.is_finite() || min_distance < 0.0 {
            return Err(InvalidArgument::new(
                "min_distance",
                "a finite non-negative distance",
                min_distance.to_string(),
            ));
        }
        if !max_distance.is_finite() || max_distance < 0.0 {
            return Err(InvalidArgument::new(
                "max_distance",
                "a finite non-negative distance",
                max_distance.to_string(),
            ));
        }
        if min_distance > max_distance {
            return Err(InvalidArgument::new(
                "min_distance",
                "a distance no greater than max_distance",
                format!("{} > {}", min_distance, max_distance),
            ));
        }
        Ok(ScalarExpr::GeoNearCall(GeoNearExpr {
            property: Box::new(property),
            geometry: Box::new(geometry),
            min_distance,
            max_distance,
        }))
    }

    /// Membership test. `negated` selects `NOT IN`.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`] if the haystack is empty: the dialect has no
    /// rendering for a zero-item IN list.
    pub fn in_list(
        needle: ScalarExpr,
        negated: bool,
        haystack: Vec<ScalarExpr>,
    ) -> Result<ScalarExpr, InvalidArgument> {
        if haystack.is_empty() {
            return Err(InvalidArgument::new(
                "haystack",
                "at least one candidate expression",
                "an empty list",
            ));
        }
        Ok(ScalarExpr::In(InExpr {
            needle: Box::new(needle),
            negated,
            haystack,
        }))
    }

    /// Wraps a literal value as an expression node.
    pub fn literal(literal: Literal) -> ScalarExpr {
        ScalarExpr::Literal(literal)
    }

    /// Null literal.
    pub fn null() -> ScalarExpr {
        ScalarExpr::Literal(Literal::Null)
    }

    /// Boolean literal.
    pub fn boolean(value: bool) -> ScalarExpr {
        ScalarExpr::Literal(Literal::Boolean(value))
    }

    /// Integer literal.
    pub fn integer(value: i64) -> ScalarExpr {
        ScalarExpr::Literal(Literal::Integer(value))
    }

    /// Float literal.
    pub fn float(value: f64) -> ScalarExpr {
        ScalarExpr::Literal(Literal::Float(value))
    }

    /// String literal.
    pub fn string(value: impl Into<String>) -> ScalarExpr {
        ScalarExpr::Literal(Literal::String(value.into()))
    }

    /// Indexer access `member[index]`.
    pub fn member_indexer(member: ScalarExpr, index: ScalarExpr) -> ScalarExpr {
        ScalarExpr::MemberIndexer(MemberIndexerExpr {
            member: Box::new(member),
            index: Box::new(index),
        })
    }

    /// Object construction from an ordered property list.
    ///
    /// An empty list is valid and renders as `{}`. Duplicate property names
    /// are accepted and kept in order: whether a downstream consumer treats
    /// them as last-write-wins is that consumer's policy, not a construction
    /// invariant.
    pub fn object_create(properties: Vec<ObjectProperty>) -> ScalarExpr {
        ScalarExpr::ObjectCreate(ObjectCreateExpr { properties })
    }

    /// Property reference, optionally chained onto a member expression.
    ///
    /// `property_ref(None, "c")` is the root identifier `c`;
    /// `property_ref(Some(c), "price")` is `c.price`.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`] if the name is empty.
    pub fn property_ref(
        member: Option<ScalarExpr>,
        name: impl Into<String>,
    ) -> Result<ScalarExpr, InvalidArgument> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidArgument::new(
                "name",
                "a non-empty property name",
                "an empty string",
            ));
        }
        Ok(ScalarExpr::PropertyRef(PropertyRefExpr {
            member: member.map(Box::new),
            name,
        }))
    }

    /// Scalar subquery.
    pub fn subquery(query: Query) -> ScalarExpr {
        ScalarExpr::Subquery(SubqueryExpr { query })
    }

    /// Unary operation.
    pub fn unary(op: UnaryOp, operand: ScalarExpr) -> ScalarExpr {
        ScalarExpr::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
        })
    }

    /// Human-readable node kind name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ScalarExpr::ArrayCreate(_) => "ArrayCreate",
            ScalarExpr::ArrayScalar(_) => "ArrayScalar",
            ScalarExpr::Between(_) => "Between",
            ScalarExpr::Binary(_) => "Binary",
            ScalarExpr::Coalesce(_) => "Coalesce",
            ScalarExpr::Conditional(_) => "Conditional",
            ScalarExpr::Conversion(_) => "Conversion",
            ScalarExpr::Exists(_) => "Exists",
            ScalarExpr::FunctionCall(_) => "FunctionCall",
            ScalarExpr::GeoNearCall(_) => "GeoNearCall",
            ScalarExpr::In(_) => "In",
            ScalarExpr::Literal(_) => "Literal",
            ScalarExpr::MemberIndexer(_) => "MemberIndexer",
            ScalarExpr::ObjectCreate(_) => "ObjectCreate",
            ScalarExpr::PropertyRef(_) => "PropertyRef",
            ScalarExpr::Subquery(_) => "Subquery",
            ScalarExpr::Unary(_) => "Unary",
        }
    }
}
