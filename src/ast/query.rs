use crate::ast::expressions::ScalarExpr;

/// The body of a subquery-bearing expression.
///
/// Carries only what the scalar dialect needs: a projected expression and an
/// optional predicate. The full query grammar (sources, ordering, joins)
/// belongs to the client layer, which hands finished subquery bodies to the
/// expression factories.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// The projected expression (`SELECT VALUE <projection>`).
    pub projection: Box<ScalarExpr>,

    /// Optional filter predicate (`WHERE <predicate>`).
    pub predicate: Option<Box<ScalarExpr>>,
}

impl Query {
    /// A subquery projecting a single expression.
    pub fn select(projection: ScalarExpr) -> Query {
        Query {
            projection: Box::new(projection),
            predicate: None,
        }
    }

    /// Adds a filter predicate to the subquery.
    pub fn filtered(mut self, predicate: ScalarExpr) -> Query {
        self.predicate = Some(Box::new(predicate));
        self
    }
}
