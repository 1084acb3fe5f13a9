//! Queryable relation handle and column resolution.

use datatables_error::{DataTableErrorKind, DataTableResult};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A column that has been resolved against a relation's schema.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::Deref,
)]
pub struct ColumnRef(String);

impl ColumnRef {
    /// Schema name of the column.
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A single table or view the datatable queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Relation {
    /// Relation name as known to the data source
    name: String,
    /// Schema column names
    columns: Vec<String>,
}

impl Relation {
    /// Create a relation handle from its name and schema columns.
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the schema has a column with this name.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Resolve a logical column identifier against the schema.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` when the relation has no such column.
    pub fn resolve(&self, column: &str) -> DataTableResult<ColumnRef> {
        if self.has_column(column) {
            Ok(ColumnRef(column.to_string()))
        } else {
            Err(DataTableErrorKind::ColumnNotFound {
                column: column.to_string(),
                relation: self.name.clone(),
            }
            .into())
        }
    }
}
