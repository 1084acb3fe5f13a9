//! Errors raised by the relational backend.

/// Failure conditions of a database operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DatabaseErrorKind {
    /// Connection could not be established
    #[display("Database connection error: {_0}")]
    Connection(String),
    /// Connection pool could not hand out a session
    #[display("Connection pool error: {_0}")]
    Pool(String),
    /// Statement failed to run
    #[display("Database query error: {_0}")]
    Query(String),
    /// Row payload could not be decoded
    #[display("Row decoding error: {_0}")]
    Serialization(String),
    /// Relation has no columns in the current schema
    #[display("Table '{_0}' not found in database")]
    TableNotFound(String),
}

/// Database error with the location it was raised at.
///
/// # Examples
///
/// ```
/// use datatables_error::{DatabaseError, DatabaseErrorKind};
///
/// let err = DatabaseError::new(DatabaseErrorKind::TableNotFound("users".into()));
/// assert!(err.to_string().contains("'users' not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Database Error: {} at line {} in {}", kind, line, file)]
pub struct DatabaseError {
    kind: DatabaseErrorKind,
    line: u32,
    file: &'static str,
}

impl DatabaseError {
    /// Create a new DatabaseError at the caller's location.
    #[track_caller]
    pub fn new(kind: DatabaseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// What went wrong.
    pub fn kind(&self) -> &DatabaseErrorKind {
        &self.kind
    }
}

impl From<DatabaseErrorKind> for DatabaseError {
    #[track_caller]
    fn from(kind: DatabaseErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(feature = "database")]
mod conversions {
    use super::{DatabaseError, DatabaseErrorKind};

    impl From<diesel::result::Error> for DatabaseError {
        #[track_caller]
        fn from(err: diesel::result::Error) -> Self {
            DatabaseError::new(DatabaseErrorKind::Query(err.to_string()))
        }
    }

    impl From<diesel::ConnectionError> for DatabaseError {
        #[track_caller]
        fn from(err: diesel::ConnectionError) -> Self {
            DatabaseError::new(DatabaseErrorKind::Connection(err.to_string()))
        }
    }

    impl From<diesel::r2d2::PoolError> for DatabaseError {
        #[track_caller]
        fn from(err: diesel::r2d2::PoolError) -> Self {
            DatabaseError::new(DatabaseErrorKind::Pool(err.to_string()))
        }
    }

    impl From<serde_json::Error> for DatabaseError {
        #[track_caller]
        fn from(err: serde_json::Error) -> Self {
            DatabaseError::new(DatabaseErrorKind::Serialization(err.to_string()))
        }
    }
}
