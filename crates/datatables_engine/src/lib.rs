//! Request translation and execution for the server-side datatables library.
//!
//! [`QueryTranslator`] turns a parsed request into a composable query and
//! [`DataTable`] runs the whole pipeline against any
//! [`DataSource`](datatables_interface::DataSource): total count, filtered
//! count, page fetch, row mapping and decoration. Failures never escape
//! [`DataTable::run`]; they come back in the envelope's `error` field.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod executor;
mod in_memory;
mod translator;

pub use executor::DataTable;
pub use in_memory::{InMemorySession, InMemorySource};
pub use translator::QueryTranslator;
