//! # Visitor Dispatch Engine
//!
//! Three traversal shapes over the scalar expression tree, each dispatching
//! on the node variant through a single exhaustive `match`:
//!
//! - **[`ExprVisitor`]** - side-effecting traversal, `()` per node (e.g.
//!   streaming query text into a buffer)
//! - **[`ExprReducer`]** - producing traversal, one uniform `Output` value
//!   per node (e.g. rendering each subtree to a string fragment)
//! - **[`ExprFolder`]** - context-threading traversal, passing a `Context`
//!   downward while producing an `Output` per node (e.g. indentation depth,
//!   aliasing scope)
//!
//! The provided dispatch method routes to exactly one per-variant case; it
//! never recurses on its own and never fails. Implementations choose their
//! own traversal order (pre-order, post-order, partial) by deciding when to
//! re-enter the dispatch method on a node's children.
//!
//! Because the dispatch `match` has no wildcard arm and the per-variant
//! methods have no default bodies, adding an eighteenth node variant breaks
//! compilation of this module and of every implementation of all three
//! traits. "Forgot to handle a node kind" is a compile error here, not a
//! runtime defect.
//!
//! ## Examples
//!
//! Counting nodes with a producing traversal:
//!
//! ```
//! use docsql::ast::*;
//! use docsql::visitor::ExprReducer;
//!
//! struct NodeCount;
//!
//! impl ExprReducer for NodeCount {
//!     type Output = usize;
//!
//!     fn reduce_array_create(&mut self, e: &ArrayCreateExpr) -> usize {
//!         1 + e.items.iter().map(|i| self.reduce_expr(i)).sum::<usize>()
//!     }
//!     fn reduce_array_scalar(&mut self, e: &ArrayScalarExpr) -> usize {
//!         1 + self.reduce_query(&e.query)
//!     }
//!     fn reduce_between(&mut self, e: &BetweenExpr) -> usize {
//!         1 + self.reduce_expr(&e.needle) + self.reduce_expr(&e.start) + self.reduce_expr(&e.end)
//!     }
//!     fn reduce_binary(&mut self, e: &BinaryExpr) -> usize {
//!         1 + self.reduce_expr(&e.left) + self.reduce_expr(&e.right)
//!     }
//!     fn reduce_coalesce(&mut self, e: &CoalesceExpr) -> usize {
//!         1 + self.reduce_expr(&e.left) + self.reduce_expr(&e.right)
//!     }
//!     fn reduce_conditional(&mut self, e: &ConditionalExpr) -> usize {
//!         1 + self.reduce_expr(&e.condition)
//!             + self.reduce_expr(&e.consequent)
//!             + self.reduce_expr(&e.alternative)
//!     }
//!     fn reduce_conversion(&mut self, e: &ConversionExpr) -> usize {
//!         1 + self.reduce_expr(&e.expr)
//!     }
//!     fn reduce_exists(&mut self, e: &ExistsExpr) -> usize {
//!         1 + self.reduce_query(&e.query)
//!     }
//!     fn reduce_function_call(&mut self, e: &FunctionCallExpr) -> usize {
//!         1 + e.args.iter().map(|a| self.reduce_expr(a)).sum::<usize>()
//!     }
//!     fn reduce_geo_near(&mut self, e: &GeoNearExpr) -> usize {
//!         1 + self.reduce_expr(&e.property) + self.reduce_expr(&e.geometry)
//!     }
//!     fn reduce_in(&mut self, e: &InExpr) -> usize {
//!         1 + self.reduce_expr(&e.needle)
//!             + e.haystack.iter().map(|h| self.reduce_expr(h)).sum::<usize>()
//!     }
//!     fn reduce_literal(&mut self, _: &Literal) -> usize {
//!         1
//!     }
//!     fn reduce_member_indexer(&mut self, e: &MemberIndexerExpr) -> usize {
//!         1 + self.reduce_expr(&e.member) + self.reduce_expr(&e.index)
//!     }
//!     fn reduce_object_create(&mut self, e: &ObjectCreateExpr) -> usize {
//!         1 + e.properties.iter().map(|p| self.reduce_expr(&p.value)).sum::<usize>()
//!     }
//!     fn reduce_property_ref(&mut self, e: &PropertyRefExpr) -> usize {
//!         1 + e.member.as_deref().map_or(0, |m| self.reduce_expr(m))
//!     }
//!     fn reduce_subquery(&mut self, e: &SubqueryExpr) -> usize {
//!         1 + self.reduce_query(&e.query)
//!     }
//!     fn reduce_unary(&mut self, e: &UnaryExpr) -> usize {
//!         1 + self.reduce_expr(&e.operand)
//!     }
//! }
//!
//! impl NodeCount {
//!     fn reduce_query(&mut self, q: &Query) -> usize {
//!         self.reduce_expr(&q.projection)
//!             + q.predicate.as_deref().map_or(0, |p| self.reduce_expr(p))
//!     }
//! }
//!
//! let expr = ScalarExpr::binary(
//!     BinaryOp::Add,
//!     ScalarExpr::integer(1),
//!     ScalarExpr::integer(2),
//! );
//! assert_eq!(NodeCount.reduce_expr(&expr), 3);
//! ```

use crate::ast::expressions::{
    ArrayCreateExpr, ArrayScalarExpr, BetweenExpr, BinaryExpr, CoalesceExpr, ConditionalExpr,
    ConversionExpr, ExistsExpr, FunctionCallExpr, GeoNearExpr, InExpr, Literal, MemberIndexerExpr,
    ObjectCreateExpr, PropertyRefExpr, ScalarExpr, SubqueryExpr, UnaryExpr,
};

/// Side-effecting traversal: one case per node variant, no return value.
pub trait ExprVisitor {
    /// Dispatches on the node variant - main entry point.
    fn visit_expr(&mut self, expr: &ScalarExpr) {
        match expr {
            ScalarExpr::ArrayCreate(e) => self.visit_array_create(e),
            ScalarExpr::ArrayScalar(e) => self.visit_array_scalar(e),
            ScalarExpr::Between(e) => self.visit_between(e),
            ScalarExpr::Binary(e) => self.visit_binary(e),
            ScalarExpr::Coalesce(e) => self.visit_coalesce(e),
            ScalarExpr::Conditional(e) => self.visit_conditional(e),
            ScalarExpr::Conversion(e) => self.visit_conversion(e),
            ScalarExpr::Exists(e) => self.visit_exists(e),
            ScalarExpr::FunctionCall(e) => self.visit_function_call(e),
            ScalarExpr::GeoNearCall(e) => self.visit_geo_near(e),
            ScalarExpr::In(e) => self.visit_in(e),
            ScalarExpr::Literal(e) => self.visit_literal(e),
            ScalarExpr::MemberIndexer(e) => self.visit_member_indexer(e),
            ScalarExpr::ObjectCreate(e) => self.visit_object_create(e),
            ScalarExpr::PropertyRef(e) => self.visit_property_ref(e),
            ScalarExpr::Subquery(e) => self.visit_subquery(e),
            ScalarExpr::Unary(e) => self.visit_unary(e),
        }
    }

    fn visit_array_create(&mut self, expr: &ArrayCreateExpr);
    fn visit_array_scalar(&mut self, expr: &ArrayScalarExpr);
    fn visit_between(&mut self, expr: &BetweenExpr);
    fn visit_binary(&mut self, expr: &BinaryExpr);
    fn visit_coalesce(&mut self, expr: &CoalesceExpr);
    fn visit_conditional(&mut self, expr: &ConditionalExpr);
    fn visit_conversion(&mut self, expr: &ConversionExpr);
    fn visit_exists(&mut self, expr: &ExistsExpr);
    fn visit_function_call(&mut self, expr: &FunctionCallExpr);
    fn visit_geo_near(&mut self, expr: &GeoNearExpr);
    fn visit_in(&mut self, expr: &InExpr);
    fn visit_literal(&mut self, literal: &Literal);
    fn visit_member_indexer(&mut self, expr: &MemberIndexerExpr);
    fn visit_object_create(&mut self, expr: &ObjectCreateExpr);
    fn visit_property_ref(&mut self, expr: &PropertyRefExpr);
    fn visit_subquery(&mut self, expr: &SubqueryExpr);
    fn visit_unary(&mut self, expr: &UnaryExpr);
}

/// Producing traversal: every case yields a value of one uniform type.
pub trait ExprReducer {
    type Output;

    /// Dispatches on the node variant - main entry point.
    fn reduce_expr(&mut self, expr: &ScalarExpr) -> Self::Output {
        match expr {
            ScalarExpr::ArrayCreate(e) => self.reduce_array_create(e),
            ScalarExpr::ArrayScalar(e) => self.reduce_array_scalar(e),
            ScalarExpr::Between(e) => self.reduce_between(e),
            ScalarExpr::Binary(e) => self.reduce_binary(e),
            ScalarExpr::Coalesce(e) => self.reduce_coalesce(e),
            ScalarExpr::Conditional(e) => self.reduce_conditional(e),
            ScalarExpr::Conversion(e) => self.reduce_conversion(e),
            ScalarExpr::Exists(e) => self.reduce_exists(e),
            ScalarExpr::FunctionCall(e) => self.reduce_function_call(e),
            ScalarExpr::GeoNearCall(e) => self.reduce_geo_near(e),
            ScalarExpr::In(e) => self.reduce_in(e),
            ScalarExpr::Literal(e) => self.reduce_literal(e),
            ScalarExpr::MemberIndexer(e) => self.reduce_member_indexer(e),
            ScalarExpr::ObjectCreate(e) => self.reduce_object_create(e),
            ScalarExpr::PropertyRef(e) => self.reduce_property_ref(e),
            ScalarExpr::Subquery(e) => self.reduce_subquery(e),
            ScalarExpr::Unary(e) => self.reduce_unary(e),
        }
    }

    fn reduce_array_create(&mut self, expr: &ArrayCreateExpr) -> Self::Output;
    fn reduce_array_scalar(&mut self, expr: &ArrayScalarExpr) -> Self::Output;
    fn reduce_between(&mut self, expr: &BetweenExpr) -> Self::Output;
    fn reduce_binary(&mut self, expr: &BinaryExpr) -> Self::Output;
    fn reduce_coalesce(&mut self, expr: &CoalesceExpr) -> Self::Output;
    fn reduce_conditional(&mut self, expr: &ConditionalExpr) -> Self::Output;
    fn reduce_conversion(&mut self, expr: &ConversionExpr) -> Self::Output;
    fn reduce_exists(&mut self, expr: &ExistsExpr) -> Self::Output;
    fn reduce_function_call(&mut self, expr: &FunctionCallExpr) -> Self::Output;
    fn reduce_geo_near(&mut self, expr: &GeoNearExpr) -> Self::Output;
    fn reduce_in(&mut self, expr: &InExpr) -> Self::Output;
    fn reduce_literal(&mut self, literal: &Literal) -> Self::Output;
    fn reduce_member_indexer(&mut self, expr: &MemberIndexerExpr) -> Self::Output;
    fn reduce_object_create(&mut self, expr: &ObjectCreateExpr) -> Self::Output;
    fn reduce_property_ref(&mut self, expr: &PropertyRefExpr) -> Self::Output;
    fn reduce_subquery(&mut self, expr: &SubqueryExpr) -> Self::Output;
    fn reduce_unary(&mut self, expr: &UnaryExpr) -> Self::Output;
}

/// Context-threading traversal: a context value flows downward, an output
/// value comes back per node.
///
/// The context is passed by value; implementations that thread it into
/// several children pick a cheaply copyable type (a depth counter, a small
/// scope handle) or clone explicitly.
pub trait ExprFolder {
    type Context;
    type Output;

    /// Dispatches on the node variant - main entry point.
    fn fold_expr(&mut self, expr: &ScalarExpr, ctx: Self::Context) -> Self::Output {
        match expr {
            ScalarExpr::ArrayCreate(e) => self.fold_array_create(e, ctx),
            ScalarExpr::ArrayScalar(e) => self.fold_array_scalar(e, ctx),
            ScalarExpr::Between(e) => self.fold_between(e, ctx),
            ScalarExpr::Binary(e) => self.fold_binary(e, ctx),
            ScalarExpr::Coalesce(e) => self.fold_coalesce(e, ctx),
            ScalarExpr::Conditional(e) => self.fold_conditional(e, ctx),
            ScalarExpr::Conversion(e) => self.fold_conversion(e, ctx),
            ScalarExpr::Exists(e) => self.fold_exists(e, ctx),
            ScalarExpr::FunctionCall(e) => self.fold_function_call(e, ctx),
            ScalarExpr::GeoNearCall(e) => self.fold_geo_near(e, ctx),
            ScalarExpr::In(e) => self.fold_in(e, ctx),
            ScalarExpr::Literal(e) => self.fold_literal(e, ctx),
            ScalarExpr::MemberIndexer(e) => self.fold_member_indexer(e, ctx),
            ScalarExpr::ObjectCreate(e) => self.fold_object_create(e, ctx),
            ScalarExpr::PropertyRef(e) => self.fold_property_ref(e, ctx),
            ScalarExpr::Subquery(e) => self.fold_subquery(e, ctx),
            ScalarExpr::Unary(e) => self.fold_unary(e, ctx),
        }
    }

    fn fold_array_create(&mut self, expr: &ArrayCreateExpr, ctx: Self::Context) -> Self::Output;
    fn fold_array_scalar(&mut self, expr: &ArrayScalarExpr, ctx: Self::Context) -> Self::Output;
    fn fold_between(&mut self, expr: &BetweenExpr, ctx: Self::Context) -> Self::Output;
    fn fold_binary(&mut self, expr: &BinaryExpr, ctx: Self::Context) -> Self::Output;
    fn fold_coalesce(&mut self, expr: &CoalesceExpr, ctx: Self::Context) -> Self::Output;
    fn fold_conditional(&mut self, expr: &ConditionalExpr, ctx: Self::Context) -> Self::Output;
    fn fold_conversion(&mut self, expr: &ConversionExpr, ctx: Self::Context) -> Self::Output;
    fn fold_exists(&mut self, expr: &ExistsExpr, ctx: Self::Context) -> Self::Output;
    fn fold_function_call(&mut self, expr: &FunctionCallExpr, ctx: Self::Context) -> Self::Output;
    fn fold_geo_near(&mut self, expr: &GeoNearExpr, ctx: Self::Context) -> Self::Output;
    fn fold_in(&mut self, expr: &InExpr, ctx: Self::Context) -> Self::Output;
    fn fold_literal(&mut self, literal: &Literal, ctx: Self::Context) -> Self::Output;
    fn fold_member_indexer(&mut self, expr: &MemberIndexerExpr, ctx: Self::Context) -> Self::Output;
    fn fold_object_create(&mut self, expr: &ObjectCreateExpr, ctx: Self::Context) -> Self::Output;
    fn fold_property_ref(&mut self, expr: &PropertyRefExpr, ctx: Self::Context) -> Self::Output;
    fn fold_subquery(&mut self, expr: &SubqueryExpr, ctx: Self::Context) -> Self::Output;
    fn fold_unary(&mut self, expr: &UnaryExpr, ctx: Self::Context) -> Self::Output;
}
