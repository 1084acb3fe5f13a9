//! Datatables command-line tool.
//!
//! Runs a single table request against the configured database and prints the
//! response envelope, or prints the columns of a table.

use anyhow::Result;
use clap::Parser;
use datatables::DataTableConfig;
use datatables::cli::{
    Cli, Commands, handle_describe_command, handle_query_command, open_source,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = DataTableConfig::load(Some(cli.config.as_path()))?
        .with_overrides(cli.database_url.clone(), cli.backend);

    // Logs go to stderr so stdout carries only the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(config = ?cli.config, backend = %config.database.backend, "Configuration loaded");

    let source = open_source(&config)?;
    match cli.command {
        Commands::Query {
            table,
            columns,
            params,
            pretty,
        } => handle_query_command(source, &table, columns, &params, pretty),
        Commands::Describe { table } => handle_describe_command(source, &table),
    }
}
