//! Database connection utilities.

use crate::{Dialect, SqlStatement};
use datatables_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};
use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, R2D2Connection};
use diesel::sql_types::{BigInt, Text};
use tracing::instrument;

/// Diesel connection types the data source can run on.
pub trait SqlConnection: R2D2Connection + Send + 'static {
    /// Dialect statements are rendered in.
    const DIALECT: Dialect;

    /// Per-connection setup run once when a connection is opened.
    fn prepare(&mut self) -> QueryResult<()> {
        Ok(())
    }

    /// Run a statement returning one `row_json` text column.
    fn load_json_rows(&mut self, statement: &SqlStatement) -> DatabaseResult<Vec<String>>;

    /// Run a statement returning a single `count` column.
    fn load_count(&mut self, statement: &SqlStatement) -> DatabaseResult<i64>;

    /// Run a statement returning one `name` text column.
    fn load_names(&mut self, statement: &SqlStatement) -> DatabaseResult<Vec<String>>;
}

#[derive(QueryableByName)]
struct JsonRow {
    #[diesel(sql_type = Text)]
    row_json: String,
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[derive(QueryableByName)]
struct NameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

fn bound<DB>(statement: &SqlStatement) -> BoxedSqlQuery<'static, DB, SqlQuery>
where
    DB: diesel::backend::Backend + diesel::sql_types::HasSqlType<Text>,
    String: diesel::serialize::ToSql<Text, DB>,
{
    tracing::debug!(sql = %statement.sql(), binds = statement.binds().len(), "Running statement");
    statement.binds().iter().fold(
        diesel::sql_query(statement.sql().clone()).into_boxed::<DB>(),
        |query, value| query.bind::<Text, _>(value.clone()),
    )
}

#[cfg(feature = "sqlite")]
impl SqlConnection for diesel::sqlite::SqliteConnection {
    const DIALECT: Dialect = Dialect::Sqlite;

    fn prepare(&mut self) -> QueryResult<()> {
        crate::regexp::register(self)
    }

    fn load_json_rows(&mut self, statement: &SqlStatement) -> DatabaseResult<Vec<String>> {
        let rows = bound::<diesel::sqlite::Sqlite>(statement).load::<JsonRow>(self)?;
        Ok(rows.into_iter().map(|row| row.row_json).collect())
    }

    fn load_count(&mut self, statement: &SqlStatement) -> DatabaseResult<i64> {
        let row = bound::<diesel::sqlite::Sqlite>(statement).get_result::<CountRow>(self)?;
        Ok(row.count)
    }

    fn load_names(&mut self, statement: &SqlStatement) -> DatabaseResult<Vec<String>> {
        let rows = bound::<diesel::sqlite::Sqlite>(statement).load::<NameRow>(self)?;
        Ok(rows.into_iter().map(|row| row.name).collect())
    }
}

#[cfg(feature = "postgres")]
impl SqlConnection for diesel::pg::PgConnection {
    const DIALECT: Dialect = Dialect::Postgres;

    fn load_json_rows(&mut self, statement: &SqlStatement) -> DatabaseResult<Vec<String>> {
        let rows = bound::<diesel::pg::Pg>(statement).load::<JsonRow>(self)?;
        Ok(rows.into_iter().map(|row| row.row_json).collect())
    }

    fn load_count(&mut self, statement: &SqlStatement) -> DatabaseResult<i64> {
        let row = bound::<diesel::pg::Pg>(statement).get_result::<CountRow>(self)?;
        Ok(row.count)
    }

    fn load_names(&mut self, statement: &SqlStatement) -> DatabaseResult<Vec<String>> {
        let rows = bound::<diesel::pg::Pg>(statement).load::<NameRow>(self)?;
        Ok(rows.into_iter().map(|row| row.name).collect())
    }
}

/// Runs [`SqlConnection::prepare`] on every connection the pool opens.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrepareConnection;

impl<C: SqlConnection> CustomizeConnection<C, diesel::r2d2::Error> for PrepareConnection {
    fn on_acquire(&self, conn: &mut C) -> Result<(), diesel::r2d2::Error> {
        conn.prepare().map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Read the connection string from the `DATABASE_URL` environment variable.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is not set.
pub fn database_url() -> DatabaseResult<String> {
    std::env::var("DATABASE_URL").map_err(|_| {
        tracing::error!("DATABASE_URL environment variable not set");
        DatabaseError::new(DatabaseErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })
}

/// Establish a single prepared connection.
///
/// # Errors
///
/// Returns an error if the connection or its setup fails.
#[instrument(name = "database.establish_connection", skip(database_url), fields(dialect = %C::DIALECT))]
pub fn establish_connection<C: SqlConnection>(database_url: &str) -> DatabaseResult<C> {
    tracing::debug!("Connecting to database");
    let mut conn = C::establish(database_url).map_err(|e| {
        tracing::error!(error = %e, "Failed to establish database connection");
        DatabaseError::new(DatabaseErrorKind::Connection(e.to_string()))
    })?;
    conn.prepare()?;
    Ok(conn)
}

/// Create a connection pool whose connections are prepared on acquisition.
///
/// # Errors
///
/// Returns an error if pool creation fails.
#[instrument(name = "database.create_pool", skip(database_url), fields(dialect = %C::DIALECT))]
pub fn create_pool<C: SqlConnection>(
    database_url: &str,
    max_size: u32,
) -> DatabaseResult<Pool<ConnectionManager<C>>> {
    tracing::debug!(max_size, "Creating connection pool");
    let manager = ConnectionManager::<C>::new(database_url);

    Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(PrepareConnection))
        .build(manager)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to create connection pool");
            DatabaseError::new(DatabaseErrorKind::Connection(e.to_string()))
        })
}
