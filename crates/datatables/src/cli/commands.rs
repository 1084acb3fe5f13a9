//! CLI command structure and argument parsing.

use clap::{Parser, Subcommand};
use datatables_database::Dialect;
use std::path::PathBuf;

/// Run server-side table requests against a relational database.
#[derive(Parser, Debug)]
#[command(name = "datatables")]
#[command(about = "Run server-side table requests against a relational database", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "DATATABLES_CONFIG", default_value = "datatables.toml")]
    pub config: PathBuf,

    /// Database URL, overriding the configuration
    #[arg(long)]
    pub database_url: Option<String>,

    /// Database backend, overriding the configuration (sqlite or postgres)
    #[arg(long)]
    pub backend: Option<Dialect>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one table request and print the response envelope as JSON
    Query {
        /// Table or view to query
        #[arg(short, long)]
        table: String,

        /// Output columns, comma separated (default: every column of the table)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// JSON object of request parameters, as a file path or `-` for stdin
        #[arg(short, long, default_value = "-")]
        params: String,

        /// Pretty-print the envelope
        #[arg(long)]
        pretty: bool,
    },

    /// Print the columns of a table
    Describe {
        /// Table or view to describe
        #[arg(short, long)]
        table: String,
    },
}
