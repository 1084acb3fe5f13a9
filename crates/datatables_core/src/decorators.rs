//! Optional callbacks that attach presentation metadata to result rows.

use crate::ResultRow;
use serde_json::{Map, Value};
use tracing::trace;

/// Callback producing a string decoration (row id or class).
pub type RowTextFn = Box<dyn Fn(&ResultRow) -> String + Send + Sync>;

/// Callback producing an object decoration (row data or attributes).
pub type RowMapFn = Box<dyn Fn(&ResultRow) -> Map<String, Value> + Send + Sync>;

/// Up to four independently optional row callbacks.
///
/// Callbacks run in a fixed order (id, class, data, attributes), each seeing
/// the row as mapped from the query. A result is stored only when it is
/// non-empty.
///
/// # Example
///
/// ```
/// use datatables_core::{ResultRow, RowDecorators};
/// use serde_json::json;
///
/// let decorators = RowDecorators::new()
///     .with_row_id(|row| format!("row_{}", row.text("id").unwrap_or_default()));
///
/// let mut row = ResultRow::from_values(&["id".to_string()], vec![json!(7)]).unwrap();
/// decorators.decorate(&mut row);
/// assert_eq!(row.row_id(), Some("row_7"));
/// ```
#[derive(Default)]
pub struct RowDecorators {
    row_id: Option<RowTextFn>,
    row_class: Option<RowTextFn>,
    row_data: Option<RowMapFn>,
    row_attr: Option<RowMapFn>,
}

impl RowDecorators {
    /// Decorators with no callbacks configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the callback producing the row node's `id`.
    pub fn with_row_id<F>(mut self, getter: F) -> Self
    where
        F: Fn(&ResultRow) -> String + Send + Sync + 'static,
    {
        self.row_id = Some(Box::new(getter));
        self
    }

    /// Set the callback producing a class for the row node.
    pub fn with_row_class<F>(mut self, getter: F) -> Self
    where
        F: Fn(&ResultRow) -> String + Send + Sync + 'static,
    {
        self.row_class = Some(Box::new(getter));
        self
    }

    /// Set the callback producing auxiliary data attached to the row.
    pub fn with_row_data<F>(mut self, getter: F) -> Self
    where
        F: Fn(&ResultRow) -> Map<String, Value> + Send + Sync + 'static,
    {
        self.row_data = Some(Box::new(getter));
        self
    }

    /// Set the callback producing attributes for the row node.
    pub fn with_row_attr<F>(mut self, getter: F) -> Self
    where
        F: Fn(&ResultRow) -> Map<String, Value> + Send + Sync + 'static,
    {
        self.row_attr = Some(Box::new(getter));
        self
    }

    /// Whether no callback is configured.
    pub fn is_empty(&self) -> bool {
        self.row_id.is_none()
            && self.row_class.is_none()
            && self.row_data.is_none()
            && self.row_attr.is_none()
    }

    /// Run the configured callbacks against `row` and store non-empty results.
    pub fn decorate(&self, row: &mut ResultRow) {
        if self.is_empty() {
            return;
        }

        let mapped: &ResultRow = row;
        let id = self.row_id.as_ref().map(|getter| getter(mapped));
        let class = self.row_class.as_ref().map(|getter| getter(mapped));
        let data = self.row_data.as_ref().map(|getter| getter(mapped));
        let attr = self.row_attr.as_ref().map(|getter| getter(mapped));

        if let Some(id) = id.filter(|id| !id.is_empty()) {
            row.set_row_id(id);
        }
        if let Some(class) = class.filter(|class| !class.is_empty()) {
            row.set_row_class(class);
        }
        if let Some(data) = data.filter(|data| !data.is_empty()) {
            row.set_row_data(data);
        }
        if let Some(attr) = attr.filter(|attr| !attr.is_empty()) {
            row.set_row_attr(attr);
        }
        trace!(row_id = ?row.row_id(), "Row decorated");
    }
}

impl std::fmt::Debug for RowDecorators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowDecorators")
            .field("row_id", &self.row_id.is_some())
            .field("row_class", &self.row_class.is_some())
            .field("row_data", &self.row_data.is_some())
            .field("row_attr", &self.row_attr.is_some())
            .finish()
    }
}
