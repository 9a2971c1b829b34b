//! Query-text rendering for scalar expression trees.
//!
//! This module provides the crate's reference visitor implementations, one
//! per traversal shape:
//!
//! - **[`SqlPrinter`]** (producing) - renders each subtree to a string
//!   fragment; [`to_sql()`] is the convenience entry point
//! - **[`SqlWriter`]** (effecting) - streams the same compact text into an
//!   owned buffer, byte for byte identical to [`SqlPrinter`] output
//! - **[`PrettyPrinter`]** (context-threading) - threads indentation depth
//!   downward and breaks subquery bodies across lines; [`to_sql_pretty()`]
//!   is the convenience entry point
//!
//! # Formatting rules
//!
//! - Binary, unary, conditional, coalesce, between, and in forms are fully
//!   parenthesized, so rendered text needs no precedence table to re-parse.
//! - String literals and quoted property names are escaped as JSON.
//! - Float literals go through exact decimal normalization, so `1.1` renders
//!   as `1.1`, never as `1.1000000000000001` or `1.1e0`.
//! - Duplicate object-construction keys render verbatim in construction
//!   order; collapsing them is the evaluating store's policy.
//!
//! # Examples
//!
//! ```
//! use docsql::ast::{BinaryOp, ScalarExpr};
//! use docsql::to_sql;
//!
//! let expr = ScalarExpr::binary(
//!     BinaryOp::And,
//!     ScalarExpr::boolean(true),
//!     ScalarExpr::boolean(false),
//! );
//! assert_eq!(to_sql(&expr), "(true AND false)");
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::ast::expressions::{
    ArrayCreateExpr, ArrayScalarExpr, BetweenExpr, BinaryExpr, CoalesceExpr, ConditionalExpr,
    ConversionExpr, ExistsExpr, FunctionCallExpr, GeoNearExpr, InExpr, Literal, MemberIndexerExpr,
    ObjectCreateExpr, PropertyRefExpr, ScalarExpr, SubqueryExpr, UnaryExpr, identifier_pattern,
};
use crate::ast::operators::UnaryOp;
use crate::ast::query::Query;
use crate::visitor::{ExprFolder, ExprReducer, ExprVisitor};

/// Renders an expression tree to compact query text.
pub fn to_sql(expr: &ScalarExpr) -> String {
    SqlPrinter.reduce_expr(expr)
}

/// Renders an expression tree with subquery bodies indented.
pub fn to_sql_pretty(expr: &ScalarExpr) -> String {
    PrettyPrinter.fold_expr(expr, 0)
}

/// Escape a string for inclusion in double quotes (JSON rules).
pub(crate) fn escape_string(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '"' => vec!['\\', '"'],
            '\\' => vec!['\\', '\\'],
            '\n' => vec!['\\', 'n'],
            '\r' => vec!['\\', 'r'],
            '\t' => vec!['\\', 't'],
            c if c.is_control() => format!("\\u{:04x}", c as u32).chars().collect(),
            c => vec![c],
        })
        .collect()
}

/// Format a float through exact decimal normalization.
///
/// Falls back to the plain `Display` form for values a decimal cannot hold
/// (non-finite, or beyond decimal range).
pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() {
        if let Some(decimal) = Decimal::from_f64(value) {
            return decimal.normalize().to_string();
        }
    }
    value.to_string()
}

fn format_literal(literal: &Literal) -> String {
    match literal {
        Literal::Null => "null".to_string(),
        Literal::Boolean(b) => b.to_string(),
        Literal::Integer(n) => n.to_string(),
        Literal::Float(n) => format_number(*n),
        Literal::String(s) => format!("\"{}\"", escape_string(s)),
    }
}

/// Producing renderer: every node reduces to its text fragment.
pub struct SqlPrinter;

impl SqlPrinter {
    fn query(&mut self, query: &Query) -> String {
        let mut out = format!("SELECT VALUE {}", self.reduce_expr(&query.projection));
        if let Some(predicate) = &query.predicate {
            out.push_str(" WHERE ");
            out.push_str(&self.reduce_expr(predicate));
        }
        out
    }

    fn list(&mut self, items: &[ScalarExpr]) -> String {
        items
            .iter()
            .map(|item| self.reduce_expr(item))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl ExprReducer for SqlPrinter {
    type Output = String;

    fn reduce_array_create(&mut self, expr: &ArrayCreateExpr) -> String {
        format!("[{}]", self.list(&expr.items))
    }

    fn reduce_array_scalar(&mut self, expr: &ArrayScalarExpr) -> String {
        format!("ARRAY({})", self.query(&expr.query))
    }

    fn reduce_between(&mut self, expr: &BetweenExpr) -> String {
        format!(
            "({} {}BETWEEN {} AND {})",
            self.reduce_expr(&expr.needle),
            if expr.negated { "NOT " } else { "" },
            self.reduce_expr(&expr.start),
            self.reduce_expr(&expr.end),
        )
    }

    fn reduce_binary(&mut self, expr: &BinaryExpr) -> String {
        format!(
            "({} {} {})",
            self.reduce_expr(&expr.left),
            expr.op.symbol(),
            self.reduce_expr(&expr.right),
        )
    }

    fn reduce_coalesce(&mut self, expr: &CoalesceExpr) -> String {
        format!(
            "({} ?? {})",
            self.reduce_expr(&expr.left),
            self.reduce_expr(&expr.right),
        )
    }

    fn reduce_conditional(&mut self, expr: &ConditionalExpr) -> String {
        format!(
            "({} ? {} : {})",
            self.reduce_expr(&expr.condition),
            self.reduce_expr(&expr.consequent),
            self.reduce_expr(&expr.alternative),
        )
    }

    fn reduce_conversion(&mut self, expr: &ConversionExpr) -> String {
        format!(
            "CONVERT({}, {})",
            self.reduce_expr(&expr.expr),
            expr.target.keyword(),
        )
    }

    fn reduce_exists(&mut self, expr: &ExistsExpr) -> String {
        format!("EXISTS({})", self.query(&expr.query))
    }

    fn reduce_function_call(&mut self, expr: &FunctionCallExpr) -> String {
        let prefix = if expr.is_udf { "udf." } else { "" };
        format!("{}{}({})", prefix, expr.name, self.list(&expr.args))
    }

    fn reduce_geo_near(&mut self, expr: &GeoNearExpr) -> String {
        format!(
            "(ST_DISTANCE({}, {}) BETWEEN {} AND {})",
            self.reduce_expr(&expr.property),
            self.reduce_expr(&expr.geometry),
            format_number(expr.min_distance),
            format_number(expr.max_distance),
        )
    }

    fn reduce_in(&mut self, expr: &InExpr) -> String {
        format!(
            "({} {}IN ({}))",
            self.reduce_expr(&expr.needle),
            if expr.negated { "NOT " } else { "" },
            self.list(&expr.haystack),
        )
    }

    fn reduce_literal(&mut self, literal: &Literal) -> String {
        format_literal(literal)
    }

    fn reduce_member_indexer(&mut self, expr: &MemberIndexerExpr) -> String {
        format!(
            "{}[{}]",
            self.reduce_expr(&expr.member),
            self.reduce_expr(&expr.index),
        )
    }

    fn reduce_object_create(&mut self, expr: &ObjectCreateExpr) -> String {
        let properties = expr
            .properties
            .iter()
            .map(|property| {
                format!(
                    "\"{}\": {}",
                    escape_string(&property.name),
                    self.reduce_expr(&property.value)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{}}}", properties)
    }

    fn reduce_property_ref(&mut self, expr: &PropertyRefExpr) -> String {
        match &expr.member {
            None => expr.name.clone(),
            Some(member) => {
                let member = self.reduce_expr(member);
                if identifier_pattern().is_match(&expr.name) {
                    format!("{}.{}", member, expr.name)
                } else {
                    format!("{}[\"{}\"]", member, escape_string(&expr.name))
                }
            }
        }
    }

    fn reduce_subquery(&mut self, expr: &SubqueryExpr) -> String {
        format!("({})", self.query(&expr.query))
    }

    fn reduce_unary(&mut self, expr: &UnaryExpr) -> String {
        let space = if expr.op == UnaryOp::Not { " " } else { "" };
        format!(
            "({}{}{})",
            expr.op.symbol(),
            space,
            self.reduce_expr(&expr.operand),
        )
    }
}

/// Effecting renderer: streams compact query text into an owned buffer.
///
/// Output is byte for byte identical to [`SqlPrinter`]; the two exist to
/// exercise both traversal shapes against one rendering contract.
#[derive(Default)]
pub struct SqlWriter {
    out: String,
}

impl SqlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the writer and returns the accumulated text.
    pub fn into_string(self) -> String {
        self.out
    }

    fn write_query(&mut self, query: &Query) {
        self.out.push_str("SELECT VALUE ");
        self.visit_expr(&query.projection);
        if let Some(predicate) = &query.predicate {
            self.out.push_str(" WHERE ");
            self.visit_expr(predicate);
        }
    }

    fn write_list(&mut self, items: &[ScalarExpr]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.visit_expr(item);
        }
    }
}

impl ExprVisitor for SqlWriter {
    fn visit_array_create(&mut self, expr: &ArrayCreateExpr) {
        self.out.push('[');
        self.write_list(&expr.items);
        self.out.push(']');
    }

    fn visit_array_scalar(&mut self, expr: &ArrayScalarExpr) {
        self.out.push_str("ARRAY(");
        self.write_query(&expr.query);
        self.out.push(')');
    }

    fn visit_between(&mut self, expr: &BetweenExpr) {
        self.out.push('(');
        self.visit_expr(&expr.needle);
        self.out.push_str(if expr.negated { " NOT BETWEEN " } else { " BETWEEN " });
        self.visit_expr(&expr.start);
        self.out.push_str(" AND ");
        self.visit_expr(&expr.end);
        self.out.push(')');
    }

    fn visit_binary(&mut self, expr: &BinaryExpr) {
        self.out.push('(');
        self.visit_expr(&expr.left);
        self.out.push(' ');
        self.out.push_str(expr.op.symbol());
        self.out.push(' ');
        self.visit_expr(&expr.right);
        self.out.push(')');
    }

    fn visit_coalesce(&mut self, expr: &CoalesceExpr) {
        self.out.push('(');
        self.visit_expr(&expr.left);
        self.out.push_str(" ?? ");
        self.visit_expr(&expr.right);
        self.out.push(')');
    }

    fn visit_conditional(&mut self, expr: &ConditionalExpr) {
        self.out.push('(');
        self.visit_expr(&expr.condition);
        self.out.push_str(" ? ");
        self.visit_expr(&expr.consequent);
        self.out.push_str(" : ");
        self.visit_expr(&expr.alternative);
        self.out.push(')');
    }

    fn visit_conversion(&mut self, expr: &ConversionExpr) {
        self.out.push_str("CONVERT(");
        self.visit_expr(&expr.expr);
        self.out.push_str(", ");
        self.out.push_str(expr.target.keyword());
        self.out.push(')');
    }

    fn visit_exists(&mut self, expr: &ExistsExpr) {
        self.out.push_str("EXISTS(");
        self.write_query(&expr.query);
        self.out.push(')');
    }

    fn visit_function_call(&mut self, expr: &FunctionCallExpr) {
        if expr.is_udf {
            self.out.push_str("udf.");
        }
        self.out.push_str(&expr.name);
        self.out.push('(');
        self.write_list(&expr.args);
        self.out.push(')');
    }

    fn visit_geo_near(&mut self, expr: &GeoNearExpr) {
        self.out.push_str("(ST_DISTANCE(");
        self.visit_expr(&expr.property);
        self.out.push_str(", ");
        self.visit_expr(&expr.geometry);
        self.out.push_str(") BETWEEN ");
        self.out.push_str(&format_number(expr.min_distance));
        self.out.push_str(" AND ");
        self.out.push_str(&format_number(expr.max_distance));
        self.out.push(')');
    }

    fn visit_in(&mut self, expr: &InExpr) {
        self.out.push('(');
        self.visit_expr(&expr.needle);
        self.out.push_str(if expr.negated { " NOT IN (" } else { " IN (" });
        self.write_list(&expr.haystack);
        self.out.push_str("))");
    }

    fn visit_literal(&mut self, literal: &Literal) {
        self.out.push_str(&format_literal(literal));
    }

    fn visit_member_indexer(&mut self, expr: &MemberIndexerExpr) {
        self.visit_expr(&expr.member);
        self.out.push('[');
        self.visit_expr(&expr.index);
        self.out.push(']');
    }

    fn visit_object_create(&mut self, expr: &ObjectCreateExpr) {
        self.out.push('{');
        for (i, property) in expr.properties.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.out.push('"');
            self.out.push_str(&escape_string(&property.name));
            self.out.push_str("\": ");
            self.visit_expr(&property.value);
        }
        self.out.push('}');
    }

    fn visit_property_ref(&mut self, expr: &PropertyRefExpr) {
        match &expr.member {
            None => self.out.push_str(&expr.name),
            Some(member) => {
                self.visit_expr(member);
                if identifier_pattern().is_match(&expr.name) {
                    self.out.push('.');
                    self.out.push_str(&expr.name);
                } else {
                    self.out.push_str("[\"");
                    self.out.push_str(&escape_string(&expr.name));
                    self.out.push_str("\"]");
                }
            }
        }
    }

    fn visit_subquery(&mut self, expr: &SubqueryExpr) {
        self.out.push('(');
        self.write_query(&expr.query);
        self.out.push(')');
    }

    fn visit_unary(&mut self, expr: &UnaryExpr) {
        self.out.push('(');
        self.out.push_str(expr.op.symbol());
        if expr.op == UnaryOp::Not {
            self.out.push(' ');
        }
        self.visit_expr(&expr.operand);
        self.out.push(')');
    }
}

/// Context-threading renderer: indentation depth flows down the tree and
/// subquery bodies break across lines, one level deeper per nesting.
pub struct PrettyPrinter;

impl PrettyPrinter {
    fn indent(level: usize) -> String {
        "  ".repeat(level)
    }

    fn query_block(&mut self, prefix: &str, query: &Query, indent: usize) -> String {
        let pad = Self::indent(indent + 1);
        let mut out = format!(
            "{}(\n{}SELECT VALUE {}",
            prefix,
            pad,
            self.fold_expr(&query.projection, indent + 1)
        );
        if let Some(predicate) = &query.predicate {
            out.push('\n');
            out.push_str(&pad);
            out.push_str("WHERE ");
            out.push_str(&self.fold_expr(predicate, indent + 1));
        }
        out.push('\n');
        out.push_str(&Self::indent(indent));
        out.push(')');
        out
    }

    fn list(&mut self, items: &[ScalarExpr], indent: usize) -> String {
        items
            .iter()
            .map(|item| self.fold_expr(item, indent))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl ExprFolder for PrettyPrinter {
    type Context = usize;
    type Output = String;

    fn fold_array_create(&mut self, expr: &ArrayCreateExpr, indent: usize) -> String {
        format!("[{}]", self.list(&expr.items, indent))
    }

    fn fold_array_scalar(&mut self, expr: &ArrayScalarExpr, indent: usize) -> String {
        self.query_block("ARRAY", &expr.query, indent)
    }

    fn fold_between(&mut self, expr: &BetweenExpr, indent: usize) -> String {
        format!(
            "({} {}BETWEEN {} AND {})",
            self.fold_expr(&expr.needle, indent),
            if expr.negated { "NOT " } else { "" },
            self.fold_expr(&expr.start, indent),
            self.fold_expr(&expr.end, indent),
        )
    }

    fn fold_binary(&mut self, expr: &BinaryExpr, indent: usize) -> String {
        format!(
            "({} {} {})",
            self.fold_expr(&expr.left, indent),
            expr.op.symbol(),
            self.fold_expr(&expr.right, indent),
        )
    }

    fn fold_coalesce(&mut self, expr: &CoalesceExpr, indent: usize) -> String {
        format!(
            "({} ?? {})",
            self.fold_expr(&expr.left, indent),
            self.fold_expr(&expr.right, indent),
        )
    }

    fn fold_conditional(&mut self, expr: &ConditionalExpr, indent: usize) -> String {
        format!(
            "({} ? {} : {})",
            self.fold_expr(&expr.condition, indent),
            self.fold_expr(&expr.consequent, indent),
            self.fold_expr(&expr.alternative, indent),
        )
    }

    fn fold_conversion(&mut self, expr: &ConversionExpr, indent: usize) -> String {
        format!(
            "CONVERT({}, {})",
            self.fold_expr(&expr.expr, indent),
            expr.target.keyword(),
        )
    }

    fn fold_exists(&mut self, expr: &ExistsExpr, indent: usize) -> String {
        self.query_block("EXISTS", &expr.query, indent)
    }

    fn fold_function_call(&mut self, expr: &FunctionCallExpr, indent: usize) -> String {
        let prefix = if expr.is_udf { "udf." } else { "" };
        format!("{}{}({})", prefix, expr.name, self.list(&expr.args, indent))
    }

    fn fold_geo_near(&mut self, expr: &GeoNearExpr, indent: usize) -> String {
        format!(
            "(ST_DISTANCE({}, {}) BETWEEN {} AND {})",
            self.fold_expr(&expr.property, indent),
            self.fold_expr(&expr.geometry, indent),
            format_number(expr.min_distance),
            format_number(expr.max_distance),
        )
    }

    fn fold_in(&mut self, expr: &InExpr, indent: usize) -> String {
        format!(
            "({} {}IN ({}))",
            self.fold_expr(&expr.needle, indent),
            if expr.negated { "NOT " } else { "" },
            self.list(&expr.haystack, indent),
        )
    }

    fn fold_literal(&mut self, literal: &Literal, _indent: usize) -> String {
        format_literal(literal)
    }

    fn fold_member_indexer(&mut self, expr: &MemberIndexerExpr, indent: usize) -> String {
        format!(
            "{}[{}]",
            self.fold_expr(&expr.member, indent),
            self.fold_expr(&expr.index, indent),
        )
    }

    fn fold_object_create(&mut self, expr: &ObjectCreateExpr, indent: usize) -> String {
        let properties = expr
            .properties
            .iter()
            .map(|property| {
                format!(
                    "\"{}\": {}",
                    escape_string(&property.name),
                    self.fold_expr(&property.value, indent)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{}}}", properties)
    }

    fn fold_property_ref(&mut self, expr: &PropertyRefExpr, indent: usize) -> String {
        match &expr.member {
            None => expr.name.clone(),
            Some(member) => {
                let member = self.fold_expr(member, indent);
                if identifier_pattern().is_match(&expr.name) {
                    format!("{}.{}", member, expr.name)
                } else {
                    format!("{}[\"{}\"]", member, escape_string(&expr.name))
                }
            }
        }
    }

    fn fold_subquery(&mut self, expr: &SubqueryExpr, indent: usize) -> String {
        self.query_block("", &expr.query, indent)
    }

    fn fold_unary(&mut self, expr: &UnaryExpr, indent: usize) -> String {
        let space = if expr.op == UnaryOp::Not { " " } else { "" };
        format!(
            "({}{}{})",
            expr.op.symbol(),
            space,
            self.fold_expr(&expr.operand, indent),
        )
    }
}
