//! Table view trait for query definitions.

use crate::{OrderTerm, Predicate};

/// Trait for views that define what a data source reads from one relation.
///
/// A table view encapsulates the relation name, filtering, ordering and
/// pagination of a query.
pub trait TableView: Send + Sync {
    /// The name of the relation being queried.
    fn relation(&self) -> &str;

    /// Optional filter rows must satisfy.
    fn filter(&self) -> Option<&Predicate> {
        None
    }

    /// Ordering, primary term first.
    fn order_by(&self) -> &[OrderTerm] {
        &[]
    }

    /// Optional limit on the number of rows returned.
    fn limit(&self) -> Option<u64> {
        None
    }

    /// Optional offset for pagination.
    fn offset(&self) -> Option<u64> {
        None
    }
}
