//! Capabilities the execution engine needs from a relational data source.

use crate::{Relation, TableCountView, TableQuery};
use datatables_error::DataTableResult;
use serde_json::Value;
use std::sync::Arc;

/// Positional values of one fetched row, in projection order.
pub type RawRow = Vec<Value>;

/// A data source that hands out request-scoped sessions.
pub trait DataSource: Send + Sync {
    /// Open a session for one request.
    ///
    /// The session is released when dropped, whatever the outcome of the request.
    fn open_session(&self) -> DataTableResult<Box<dyn Session + '_>>;

    /// Look up a relation and its schema columns.
    fn describe(&self, relation: &str) -> DataTableResult<Relation>;
}

/// A scoped connection to a data source.
pub trait Session {
    /// Number of rows matching the view's relation and filter.
    fn count(&mut self, view: &TableCountView) -> DataTableResult<u64>;

    /// Rows selected by the query, each as values in projection order.
    fn fetch(&mut self, query: &TableQuery) -> DataTableResult<Vec<RawRow>>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn open_session(&self) -> DataTableResult<Box<dyn Session + '_>> {
        (**self).open_session()
    }

    fn describe(&self, relation: &str) -> DataTableResult<Relation> {
        (**self).describe(relation)
    }
}

impl<T: DataSource + ?Sized> DataSource for Arc<T> {
    fn open_session(&self) -> DataTableResult<Box<dyn Session + '_>> {
        (**self).open_session()
    }

    fn describe(&self, relation: &str) -> DataTableResult<Relation> {
        (**self).describe(relation)
    }
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn open_session(&self) -> DataTableResult<Box<dyn Session + '_>> {
        (**self).open_session()
    }

    fn describe(&self, relation: &str) -> DataTableResult<Relation> {
        (**self).describe(relation)
    }
}
