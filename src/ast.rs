//! # Scalar Expression Tree
//!
//! This module defines the abstract syntax tree (AST) for scalar expressions
//! in a SQL-like query dialect over JSON documents. Trees are built bottom-up
//! through per-variant factory operations, are immutable once built, and are
//! traversed through the visitor traits in [`crate::visitor`].
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[expressions]** - The [`ScalarExpr`] taxonomy, per-variant payload
//!   structs, literals, and factory validation
//! - **[operators]** - Closed operator tag sets (binary, unary, conversion)
//! - **[query]** - The minimal subquery payload carried by the
//!   subquery-bearing variants
//!
//! ## Core Concepts
//!
//! ### Closed taxonomy
//!
//! [`ScalarExpr`] is a plain enum: the set of node kinds is closed, and every
//! `match` over it is checked for exhaustiveness by the compiler. Adding a
//! node kind is a deliberate, breaking act that forces every visitor
//! implementation to handle it.
//!
//! ### Immutability by construction
//!
//! A factory takes already-built children by value and moves them into the
//! new node. There is no mutation API, no parent pointer, and no sharing
//! between siblings, so a tree can never contain a cycle and can be read from
//! any number of threads without synchronization.
//!
//! ### Fail-fast validation
//!
//! Every dynamic precondition is checked in the factory, never during
//! traversal. A factory either returns a fully valid node or an
//! [`InvalidArgument`] naming the offending argument and the expected versus
//! actual shape.
//!
//! ## Examples
//!
//! ```
//! use docsql::ast::{BinaryOp, ScalarExpr};
//!
//! // c.price * 1.1 > 100
//! let root = ScalarExpr::property_ref(None, "c").unwrap();
//! let price = ScalarExpr::property_ref(Some(root), "price").unwrap();
//! let scaled = ScalarExpr::binary(BinaryOp::Multiply, price, ScalarExpr::float(1.1));
//! let expr = ScalarExpr::binary(BinaryOp::GreaterThan, scaled, ScalarExpr::integer(100));
//!
//! assert_eq!(docsql::to_sql(&expr), "((c.price * 1.1) > 100)");
//! ```

pub mod expressions;
pub mod operators;
pub mod query;

pub use expressions::{
    ArrayCreateExpr, ArrayScalarExpr, BetweenExpr, BinaryExpr, CoalesceExpr, ConditionalExpr,
    ConversionExpr, ExistsExpr, FunctionCallExpr, GeoNearExpr, InExpr, InvalidArgument, Literal,
    MemberIndexerExpr, ObjectCreateExpr, ObjectProperty, PropertyRefExpr, ScalarExpr,
    SubqueryExpr, UnaryExpr,
};
pub use operators::{BinaryOp, ConversionTarget, UnaryOp};
pub use query::Query;
