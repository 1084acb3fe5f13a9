//! Configuration error types.

/// Ways loading or applying configuration can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// File or environment layer could not be read or deserialized
    #[display("Failed to load configuration: {_0}")]
    Load(String),
    /// Neither `database.url` nor `DATABASE_URL` is set
    #[display("No database URL configured; set database.url or DATABASE_URL")]
    MissingDatabaseUrl,
    /// Configured backend was not compiled in
    #[display("Backend '{_0}' is not available in this build")]
    UnavailableBackend(String),
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use datatables_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::MissingDatabaseUrl);
/// assert!(err.to_string().contains("DATABASE_URL"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the caller's location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// What went wrong.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}

impl From<ConfigErrorKind> for ConfigError {
    #[track_caller]
    fn from(kind: ConfigErrorKind) -> Self {
        Self::new(kind)
    }
}
