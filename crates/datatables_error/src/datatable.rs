//! Error types for request translation and execution.

use crate::{ConfigError, DatabaseError};

/// Failure conditions of a datatable request.
#[derive(Debug, Clone, derive_more::Display, derive_more::From)]
pub enum DataTableErrorKind {
    /// Output column is not part of the relation's schema.
    #[display("Column '{column}' not found in relation '{relation}'")]
    ColumnNotFound {
        /// Requested column identifier
        column: String,
        /// Relation that was searched
        relation: String,
    },
    /// Search or order index does not address an output column.
    #[display("Column index {index} out of range for {len} output columns")]
    ColumnIndexOutOfRange {
        /// Index taken from the request
        index: usize,
        /// Number of output columns
        len: usize,
    },
    /// A fetched row does not have one value per output column.
    #[display("Row has {actual} values but {expected} output columns were requested")]
    RowShape {
        /// Number of output columns
        expected: usize,
        /// Number of values returned for the row
        actual: usize,
    },
    /// Relation is unknown to the data source.
    #[display("Relation '{_0}' not found")]
    TableNotFound(String),
    /// Regular expression search term could not be compiled.
    #[display("Invalid search pattern: {_0}")]
    InvalidPattern(String),
    /// Failure reported by the relational backend.
    #[display("{}", _0.kind())]
    #[from]
    Database(DatabaseError),
    /// Invalid or missing configuration.
    #[display("{}", _0.kind())]
    #[from]
    Config(ConfigError),
}

/// Datatable error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("DataTable Error: {} at line {} in {}", kind, line, file)]
pub struct DataTableError {
    kind: DataTableErrorKind,
    line: u32,
    file: &'static str,
}

impl DataTableError {
    /// Create a new datatable error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DataTableErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DataTableErrorKind {
        &self.kind
    }

    /// Line where the error was created.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// File where the error was created.
    pub fn file(&self) -> &'static str {
        self.file
    }
}

impl<T> From<T> for DataTableError
where
    T: Into<DataTableErrorKind>,
{
    #[track_caller]
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for datatable operations.
pub type DataTableResult<T> = Result<T, DataTableError>;
