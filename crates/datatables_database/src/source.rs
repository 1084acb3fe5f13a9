//! Pooled diesel data source.

use crate::{SqlConnection, SqlStatement, create_pool};
use datatables_error::{DataTableResult, DatabaseError, DatabaseErrorKind, DatabaseResult};
use datatables_interface::{
    DataSource, RawRow, Relation, Session, TableCountView, TableQuery, TableView,
};
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use serde_json::Value;
use tracing::{debug, instrument};

/// Data source backed by a pool of diesel connections.
pub struct DieselSource<C: SqlConnection> {
    pool: Pool<ConnectionManager<C>>,
}

impl<C: SqlConnection> DieselSource<C> {
    /// Wrap an existing pool.
    ///
    /// Connections must already be prepared; pools from [`create_pool`] are.
    pub fn new(pool: Pool<ConnectionManager<C>>) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` with at most `max_connections` pooled connections.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created.
    pub fn connect(database_url: &str, max_connections: u32) -> DatabaseResult<Self> {
        Ok(Self::new(create_pool(database_url, max_connections)?))
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &Pool<ConnectionManager<C>> {
        &self.pool
    }

    fn checkout(&self) -> DatabaseResult<PooledConnection<ConnectionManager<C>>> {
        Ok(self.pool.get()?)
    }
}

impl<C: SqlConnection> std::fmt::Debug for DieselSource<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.pool.state();
        f.debug_struct("DieselSource")
            .field("dialect", &C::DIALECT)
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .finish()
    }
}

impl<C: SqlConnection> DataSource for DieselSource<C> {
    fn open_session(&self) -> DataTableResult<Box<dyn Session + '_>> {
        let conn = self.checkout()?;
        debug!(dialect = %C::DIALECT, "Checked out pooled connection");
        Ok(Box::new(DieselSession { conn }))
    }

    #[instrument(skip(self), fields(dialect = %C::DIALECT))]
    fn describe(&self, relation: &str) -> DataTableResult<Relation> {
        let mut conn = self.checkout()?;
        let columns = conn.load_names(&SqlStatement::describe(C::DIALECT, relation))?;
        if columns.is_empty() {
            return Err(DatabaseError::new(DatabaseErrorKind::TableNotFound(
                relation.to_string(),
            ))
            .into());
        }
        debug!(columns = columns.len(), "Reflected relation");
        Ok(Relation::new(relation, columns))
    }
}

/// One pooled connection, returned to the pool on drop.
pub struct DieselSession<C: SqlConnection> {
    conn: PooledConnection<ConnectionManager<C>>,
}

impl<C: SqlConnection> Session for DieselSession<C> {
    #[instrument(skip_all, fields(relation = view.relation()))]
    fn count(&mut self, view: &TableCountView) -> DataTableResult<u64> {
        let count = self
            .conn
            .load_count(&SqlStatement::count(C::DIALECT, view))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    #[instrument(skip_all, fields(relation = query.relation()))]
    fn fetch(&mut self, query: &TableQuery) -> DataTableResult<Vec<RawRow>> {
        let rows = self
            .conn
            .load_json_rows(&SqlStatement::select(C::DIALECT, query))?;
        let decoded = rows
            .iter()
            .map(|row| serde_json::from_str::<Vec<Value>>(row).map_err(DatabaseError::from))
            .collect::<DatabaseResult<Vec<_>>>()?;
        debug!(rows = decoded.len(), "Fetched rows");
        Ok(decoded)
    }
}
