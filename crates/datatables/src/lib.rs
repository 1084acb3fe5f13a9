//! Server-side processing for table widgets.
//!
//! A table widget sends its paging, search and sort state as flat
//! `draw`/`start`/`length`/`columns[i][...]`/`order[i][...]` parameters.
//! [`DataTable`] turns them into one filtered, ordered and paginated query
//! against a [`DataSource`], and answers with a [`ResponseEnvelope`] holding
//! the total and filtered counts and the page of rows.
//!
//! # Example
//!
//! ```
//! use datatables::{DataTable, InMemorySource, RowDecorators};
//! use serde_json::json;
//!
//! let source = InMemorySource::new()
//!     .with_table("users", ["id", "username", "color"], vec![
//!         vec![json!(1), json!("spongebob"), json!("yellow")],
//!         vec![json!(2), json!("patrick"), json!("pink")],
//!         vec![json!(3), json!("squidward"), json!("grey")],
//!     ])
//!     .unwrap();
//!
//! let table = DataTable::for_relation(source, "users", None)
//!     .unwrap()
//!     .with_decorators(RowDecorators::new().with_row_class(|row| {
//!         row.text("color").unwrap_or_default()
//!     }));
//!
//! let envelope = table.run_json(&json!({
//!     "draw": "1",
//!     "start": "0",
//!     "length": "2",
//!     "order[0][column]": "1",
//!     "order[0][dir]": "desc",
//!     "columns[0][data]": "id",
//!     "columns[1][data]": "username",
//!     "columns[2][data]": "color",
//! }));
//!
//! let wire = envelope.to_json().unwrap();
//! assert_eq!(wire["recordsTotal"], 3);
//! assert_eq!(wire["data"][0]["username"], "squidward");
//! assert_eq!(wire["data"][0]["DT_RowClass"], "grey");
//! ```

#![warn(missing_docs)]

pub mod cli;
mod settings;

pub use settings::{DataTableConfig, DatabaseSettings, LogSettings};

pub use datatables_core::{
    ColumnSpec, ColumnSpecBuilder, MAX_GENERATED_DRAW, OrderCriterion, ParamSource, RequestParams,
    RequestParamsBuilder, ResponseEnvelope, ResultRow, RowDecorators, RowKey, RowMapFn, RowTextFn,
    SortDirection,
};
pub use datatables_database::{
    Dialect, DieselSession, DieselSource, PrepareConnection, SqlConnection, SqlStatement,
    create_pool, database_url, establish_connection,
};
#[cfg(feature = "postgres")]
pub use datatables_database::PgSource;
#[cfg(feature = "sqlite")]
pub use datatables_database::{SqliteSource, register_regexp};
pub use datatables_engine::{DataTable, InMemorySession, InMemorySource, QueryTranslator};
pub use datatables_error::{
    ConfigError, ConfigErrorKind, DataTableError, DataTableErrorKind, DataTableResult, DatabaseError,
    DatabaseErrorKind, DatabaseResult,
};
pub use datatables_interface::{
    ColumnRef, DataSource, OrderTerm, Predicate, RawRow, Relation, Session, TableCountView,
    TableQuery, TableView,
};
