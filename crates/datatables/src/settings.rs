//! Layered configuration: optional TOML file, then `DATATABLES__*` environment variables.

use datatables_database::Dialect;
use datatables_error::{ConfigError, ConfigErrorKind, DataTableResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Top-level configuration.
///
/// ```toml
/// [database]
/// url = "users.db"
/// backend = "sqlite"
/// max_connections = 4
///
/// [log]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Database connection settings
    #[serde(default)]
    pub database: DatabaseSettings,
    /// Logging settings
    #[serde(default)]
    pub log: LogSettings,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Connection string; `DATABASE_URL` is used when unset
    #[serde(default)]
    pub url: Option<String>,
    /// Backend the URL points at
    #[serde(default)]
    pub backend: Dialect,
    /// Maximum number of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            backend: Dialect::default(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DataTableConfig {
    /// Prefix of configuration environment variables.
    pub const ENV_PREFIX: &'static str = "DATATABLES";

    /// Load from an optional TOML file and the process environment.
    ///
    /// A missing file is not an error; environment variables such as
    /// `DATATABLES__DATABASE__URL` override file values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or a variable cannot be parsed.
    pub fn load(path: Option<&Path>) -> DataTableResult<Self> {
        Self::build(path, None)
    }

    /// Load from an optional TOML file and the given environment map instead of
    /// the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or a variable cannot be parsed.
    pub fn load_with_env(
        path: Option<&Path>,
        environment: HashMap<String, String>,
    ) -> DataTableResult<Self> {
        Self::build(path, Some(environment))
    }

    fn build(
        path: Option<&Path>,
        environment: Option<HashMap<String, String>>,
    ) -> DataTableResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            debug!(path = %path.display(), "Adding configuration file");
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }
        builder = builder.add_source(
            config::Environment::with_prefix(Self::ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(environment),
        );

        let config = builder
            .build()
            .and_then(|settings| settings.try_deserialize::<Self>())
            .map_err(|e| ConfigError::new(ConfigErrorKind::Load(e.to_string())))?;
        debug!(
            backend = %config.database.backend,
            max_connections = config.database.max_connections,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, url: Option<String>, backend: Option<Dialect>) -> Self {
        if url.is_some() {
            self.database.url = url;
        }
        if let Some(backend) = backend {
            self.database.backend = backend;
        }
        self
    }

    /// Connection string from the configuration, else from `DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither is set.
    pub fn database_url(&self) -> DataTableResult<String> {
        match &self.database.url {
            Some(url) => Ok(url.clone()),
            None => datatables_database::database_url()
                .map_err(|_| ConfigError::new(ConfigErrorKind::MissingDatabaseUrl).into()),
        }
    }
}
