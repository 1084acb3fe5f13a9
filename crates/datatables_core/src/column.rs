//! Column descriptors and order criteria taken from a datatable request.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Sort direction of one order criterion.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest value first
    #[default]
    #[display("asc")]
    Asc,
    /// Largest value first
    #[display("desc")]
    Desc,
}

impl SortDirection {
    /// Interpret a wire `dir` value: only `"desc"` sorts descending.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    /// Whether this is ascending order.
    pub fn is_asc(&self) -> bool {
        matches!(self, SortDirection::Asc)
    }
}

/// One requested column (`columns[i][...]`).
///
/// `index` is the position of the group in the request and addresses the
/// caller's output column list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into), default)]
pub struct ColumnSpec {
    /// Position in the request, starting at 0
    index: usize,
    /// Data key used by the client to read the column
    data: String,
    /// Display name
    name: String,
    /// Whether the global search applies to this column
    searchable: bool,
    /// Whether the client allows ordering by this column
    orderable: bool,
    /// Per-column search term, empty when unset
    search_value: String,
    /// Whether `search_value` is a regular expression
    search_regex: bool,
}

impl ColumnSpec {
    /// Create a new builder.
    pub fn builder() -> ColumnSpecBuilder {
        ColumnSpecBuilder::default()
    }

    /// Whether this column carries its own search term.
    pub fn has_search(&self) -> bool {
        !self.search_value.is_empty()
    }
}

/// One sort directive (`order[i][...]`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct OrderCriterion {
    /// Index of the output column to sort by
    column_index: usize,
    /// Sort direction
    direction: SortDirection,
}

impl OrderCriterion {
    /// Create an order criterion.
    pub fn new(column_index: usize, direction: SortDirection) -> Self {
        Self {
            column_index,
            direction,
        }
    }

    /// Ascending order on the given column.
    pub fn asc(column_index: usize) -> Self {
        Self::new(column_index, SortDirection::Asc)
    }

    /// Descending order on the given column.
    pub fn desc(column_index: usize) -> Self {
        Self::new(column_index, SortDirection::Desc)
    }

    /// Whether the criterion sorts ascending.
    pub fn is_asc(&self) -> bool {
        self.direction.is_asc()
    }
}
