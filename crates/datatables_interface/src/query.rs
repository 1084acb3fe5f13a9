//! Composable query types handed to a data source.

use crate::{ColumnRef, TableView};
use datatables_core::SortDirection;
use serde::{Deserialize, Serialize};

/// Row filter built from search terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predicate {
    /// Column value, as text, contains `term` verbatim.
    Contains {
        /// Column to test
        column: ColumnRef,
        /// Substring to look for
        term: String,
    },
    /// Column value, as text, matches the regular expression `pattern`.
    Matches {
        /// Column to test
        column: ColumnRef,
        /// Regular expression
        pattern: String,
    },
    /// At least one inner predicate holds.
    Any(Vec<Predicate>),
    /// Every inner predicate holds.
    All(Vec<Predicate>),
}

impl Predicate {
    /// Substring or regular expression search on one column.
    pub fn search(column: ColumnRef, term: impl Into<String>, regex: bool) -> Self {
        if regex {
            Predicate::Matches {
                column,
                pattern: term.into(),
            }
        } else {
            Predicate::Contains {
                column,
                term: term.into(),
            }
        }
    }

    /// Disjunction of the given predicates, `None` when there are none.
    pub fn any(predicates: impl IntoIterator<Item = Predicate>) -> Option<Self> {
        let predicates: Vec<_> = predicates.into_iter().collect();
        (!predicates.is_empty()).then_some(Predicate::Any(predicates))
    }

    /// Conjunction of the given predicates, `None` when there are none.
    pub fn all(predicates: impl IntoIterator<Item = Predicate>) -> Option<Self> {
        let predicates: Vec<_> = predicates.into_iter().collect();
        (!predicates.is_empty()).then_some(Predicate::All(predicates))
    }

    /// Combine with another predicate so both must hold.
    pub fn and(self, other: Predicate) -> Self {
        match self {
            Predicate::All(mut predicates) => {
                predicates.push(other);
                Predicate::All(predicates)
            }
            predicate => Predicate::All(vec![predicate, other]),
        }
    }
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTerm {
    /// Column to sort by
    pub column: ColumnRef,
    /// Sort direction
    pub direction: SortDirection,
}

impl OrderTerm {
    /// Create an order term.
    pub fn new(column: ColumnRef, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}

/// Projected, filtered, ordered and optionally paginated selection from one relation.
///
/// Refinements layer independently: filters accumulate conjunctively and
/// order terms append in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableQuery {
    relation: String,
    projection: Vec<ColumnRef>,
    filter: Option<Predicate>,
    order_by: Vec<OrderTerm>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl TableQuery {
    /// Select the given columns from a relation, unfiltered and unordered.
    pub fn select(relation: impl Into<String>, projection: Vec<ColumnRef>) -> Self {
        Self {
            relation: relation.into(),
            projection,
            filter: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Projected columns in output order.
    pub fn projection(&self) -> &[ColumnRef] {
        &self.projection
    }

    /// Add a filter that rows must also satisfy.
    pub fn and_where(mut self, predicate: Predicate) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    /// Append an order term after the existing ones.
    pub fn then_order_by(mut self, term: OrderTerm) -> Self {
        self.order_by.push(term);
        self
    }

    /// Skip the first `offset` rows.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Return at most `limit` rows.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Slice the query to one page; `None` leaves the page unbounded.
    pub fn paginate(self, offset: u64, limit: Option<u64>) -> Self {
        let query = self.with_offset(offset);
        match limit {
            Some(limit) => query.with_limit(limit),
            None => query,
        }
    }

    /// Count of the rows this query matches, ignoring ordering and pagination.
    pub fn count_query(&self) -> TableCountView {
        TableCountView {
            relation: self.relation.clone(),
            filter: self.filter.clone(),
        }
    }
}

impl TableView for TableQuery {
    fn relation(&self) -> &str {
        &self.relation
    }

    fn filter(&self) -> Option<&Predicate> {
        self.filter.as_ref()
    }

    fn order_by(&self) -> &[OrderTerm] {
        &self.order_by
    }

    fn limit(&self) -> Option<u64> {
        self.limit
    }

    fn offset(&self) -> Option<u64> {
        self.offset
    }
}

/// Row count over a relation with an optional filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCountView {
    relation: String,
    filter: Option<Predicate>,
}

impl TableCountView {
    /// Count every row of the relation.
    pub fn all(relation: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            filter: None,
        }
    }
}

impl TableView for TableCountView {
    fn relation(&self) -> &str {
        &self.relation
    }

    fn filter(&self) -> Option<&Predicate> {
        self.filter.as_ref()
    }
}
