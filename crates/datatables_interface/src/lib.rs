//! Trait and query definitions for the server-side datatables library.
//!
//! The execution engine talks to a relational backend only through the types
//! in this crate: a [`Relation`] handle resolving column names, a composable
//! [`TableQuery`] with its [`TableCountView`], and the [`DataSource`] /
//! [`Session`] capabilities that run them.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod query;
mod relation;
mod source;
mod table_view;

pub use query::{OrderTerm, Predicate, TableCountView, TableQuery};
pub use relation::{ColumnRef, Relation};
pub use source::{DataSource, RawRow, Session};
pub use table_view::TableView;
