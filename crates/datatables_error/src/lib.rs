//! Error types for the datatables library.
//!
//! This crate provides the foundation error types used throughout the datatables workspace.
//! Every error records the file and line where it was raised.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod database;
mod datatable;

pub use config::{ConfigError, ConfigErrorKind};
pub use database::{DatabaseError, DatabaseErrorKind, DatabaseResult};
pub use datatable::{DataTableError, DataTableErrorKind, DataTableResult};
