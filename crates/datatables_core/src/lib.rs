//! Core data types for the server-side datatables library.
//!
//! This crate holds the request model parsed from the table widget's wire
//! parameters, the rows and envelope sent back, and the row decorator chain.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod column;
mod decorators;
mod envelope;
mod params;
mod row;

pub use column::{ColumnSpec, ColumnSpecBuilder, OrderCriterion, SortDirection};
pub use decorators::{RowDecorators, RowMapFn, RowTextFn};
pub use envelope::ResponseEnvelope;
pub use params::{MAX_GENERATED_DRAW, ParamSource, RequestParams, RequestParamsBuilder};
pub use row::{ResultRow, RowKey};
