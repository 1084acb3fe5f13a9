//! Diesel data source for the server-side datatables library.
//!
//! Table queries are rendered into parameterized SQL for the connection's
//! [`Dialect`] and run over pooled connections. Rows come back packed as JSON
//! arrays so any projection decodes into positional values without a static
//! schema.
//!
//! Backends are selected with the `sqlite` (default) and `postgres` features.

#![warn(missing_docs)]

mod connection;
mod dialect;
#[cfg(feature = "sqlite")]
mod regexp;
mod source;
mod sql;

pub use connection::{
    PrepareConnection, SqlConnection, create_pool, database_url, establish_connection,
};
pub use dialect::Dialect;
#[cfg(feature = "sqlite")]
pub use regexp::register as register_regexp;
pub use source::{DieselSession, DieselSource};
pub use sql::SqlStatement;

/// Diesel source over SQLite.
#[cfg(feature = "sqlite")]
pub type SqliteSource = DieselSource<diesel::sqlite::SqliteConnection>;

/// Diesel source over PostgreSQL.
#[cfg(feature = "postgres")]
pub type PgSource = DieselSource<diesel::pg::PgConnection>;
