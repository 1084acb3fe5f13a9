//! Query and describe command handlers.

use crate::{ConfigError, ConfigErrorKind, DataSource, DataTable, DataTableConfig, Dialect};
use anyhow::{Context, Result};
use std::io::Read;
use tracing::{info, instrument, warn};

/// Open the configured data source.
///
/// # Errors
///
/// Returns an error if no database URL is configured, the backend was not
/// compiled in, or the pool cannot connect.
#[instrument(skip_all, fields(backend = %config.database.backend))]
pub fn open_source(config: &DataTableConfig) -> Result<Box<dyn DataSource>> {
    let url = config.database_url()?;
    let max_connections = config.database.max_connections;
    match config.database.backend {
        #[cfg(feature = "sqlite")]
        Dialect::Sqlite => Ok(Box::new(crate::SqliteSource::connect(&url, max_connections)?)),
        #[cfg(feature = "postgres")]
        Dialect::Postgres => Ok(Box::new(crate::PgSource::connect(&url, max_connections)?)),
        #[allow(unreachable_patterns)]
        backend => Err(ConfigError::new(ConfigErrorKind::UnavailableBackend(backend.to_string())).into()),
    }
}

/// Read request parameters from a file, or stdin for `-`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not JSON.
pub fn read_params(source: &str) -> Result<serde_json::Value> {
    let raw = if source == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read request parameters from stdin")?;
        raw
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read request parameters from {source}"))?
    };
    serde_json::from_str(&raw).context("Request parameters are not valid JSON")
}

/// Run one request and print the envelope.
///
/// A failed request still prints its envelope; the failure is only logged.
///
/// # Errors
///
/// Returns an error if the table cannot be reflected or the parameters read.
#[instrument(skip(source, columns, params))]
pub fn handle_query_command(
    source: Box<dyn DataSource>,
    table: &str,
    columns: Vec<String>,
    params: &str,
    pretty: bool,
) -> Result<()> {
    let request = read_params(params)?;
    let columns = (!columns.is_empty()).then_some(columns);
    let table = DataTable::for_relation(source, table, columns)?;

    let envelope = table.run_json(&request);
    if let Some(error) = envelope.error() {
        warn!(error = %error, "Request returned an error envelope");
    } else {
        info!(
            records_total = envelope.records_total(),
            records_filtered = envelope.records_filtered(),
            "Request succeeded"
        );
    }

    let output = if pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    println!("{output}");
    Ok(())
}

/// Print a table's reflected columns as JSON.
///
/// # Errors
///
/// Returns an error if the table does not exist.
#[instrument(skip(source))]
pub fn handle_describe_command(source: Box<dyn DataSource>, table: &str) -> Result<()> {
    let relation = source.describe(table)?;
    println!("{}", serde_json::to_string_pretty(&relation)?);
    Ok(())
}
