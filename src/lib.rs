pub mod ast;
pub mod number;
pub mod render;
pub mod visitor;

pub use ast::{InvalidArgument, Literal, ObjectProperty, Query, ScalarExpr};
pub use number::{LazyNumber, MAX_SAFE_INTEGER};
pub use render::{PrettyPrinter, SqlPrinter, SqlWriter, to_sql, to_sql_pretty};
pub use visitor::{ExprFolder, ExprReducer, ExprVisitor};
