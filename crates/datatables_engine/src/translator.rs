//! Translation of a parsed request into a composable query.

use datatables_core::{ColumnSpec, RequestParams, SortDirection};
use datatables_error::{DataTableErrorKind, DataTableResult};
use datatables_interface::{ColumnRef, OrderTerm, Predicate, Relation, TableQuery};
use regex::Regex;
use tracing::{debug, instrument};

/// Builds the filtered, ordered projection for one request.
///
/// Column and order indices in the request address `columns`, the caller's
/// output column list, which is resolved against `relation`.
#[derive(Debug, Clone, Copy)]
pub struct QueryTranslator<'a> {
    relation: &'a Relation,
    columns: &'a [String],
}

impl<'a> QueryTranslator<'a> {
    /// Create a translator for the given relation and output columns.
    pub fn new(relation: &'a Relation, columns: &'a [String]) -> Self {
        Self { relation, columns }
    }

    /// Translate a request into an unpaginated query.
    ///
    /// Per-column searches are combined with AND, the global search is an OR
    /// over the searchable columns, and both must hold. Without order criteria
    /// the first output column sorts ascending.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` when an output column is not in the relation,
    /// `ColumnIndexOutOfRange` when a search or order index has no output column
    /// and `InvalidPattern` when a regular expression search does not compile.
    #[instrument(
        skip_all,
        fields(relation = %self.relation.name(), columns = self.columns.len())
    )]
    pub fn translate(&self, params: &RequestParams) -> DataTableResult<TableQuery> {
        let projection = self.projection()?;
        let mut query = TableQuery::select(self.relation.name(), projection.clone());

        if let Some(filter) = self.column_search(params.columns())? {
            query = query.and_where(filter);
        }
        if let Some(filter) = self.global_search(params)? {
            query = query.and_where(filter);
        }

        if params.order().is_empty() {
            if let Some(first) = projection.into_iter().next() {
                query = query.then_order_by(OrderTerm::new(first, SortDirection::Asc));
            }
        } else {
            for criterion in params.order() {
                let column = self.column_at(*criterion.column_index())?;
                query = query.then_order_by(OrderTerm::new(column, *criterion.direction()));
            }
        }

        debug!(
            order_terms = params.order().len(),
            "Translated datatable request"
        );
        Ok(query)
    }

    /// Output columns resolved against the relation schema.
    pub fn projection(&self) -> DataTableResult<Vec<ColumnRef>> {
        self.columns
            .iter()
            .map(|column| self.relation.resolve(column))
            .collect()
    }

    fn column_at(&self, index: usize) -> DataTableResult<ColumnRef> {
        let name = self.columns.get(index).ok_or(
            DataTableErrorKind::ColumnIndexOutOfRange {
                index,
                len: self.columns.len(),
            },
        )?;
        self.relation.resolve(name)
    }

    fn column_search(&self, specs: &[ColumnSpec]) -> DataTableResult<Option<Predicate>> {
        let predicates = specs
            .iter()
            .filter(|spec| spec.has_search())
            .map(|spec| {
                let column = self.column_at(*spec.index())?;
                search(column, spec.search_value(), *spec.search_regex())
            })
            .collect::<DataTableResult<Vec<_>>>()?;
        Ok(Predicate::all(predicates))
    }

    fn global_search(&self, params: &RequestParams) -> DataTableResult<Option<Predicate>> {
        if !params.has_global_search() {
            return Ok(None);
        }
        let predicates = params
            .columns()
            .iter()
            .filter(|spec| *spec.searchable())
            .map(|spec| {
                let column = self.column_at(*spec.index())?;
                search(column, params.search_value(), *params.search_regex())
            })
            .collect::<DataTableResult<Vec<_>>>()?;
        Ok(Predicate::any(predicates))
    }
}

/// Search predicate on one column; a regular expression must compile.
fn search(column: ColumnRef, term: &str, regex: bool) -> DataTableResult<Predicate> {
    if regex {
        Regex::new(term).map_err(|e| DataTableErrorKind::InvalidPattern(e.to_string()))?;
    }
    Ok(Predicate::search(column, term, regex))
}
