//! In-memory data source over registered tables of JSON rows.

use datatables_error::{DataTableErrorKind, DataTableResult};
use datatables_interface::{
    DataSource, OrderTerm, Predicate, RawRow, Relation, Session, TableCountView, TableQuery,
    TableView,
};
use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone)]
struct MemoryTable {
    relation: Relation,
    rows: Vec<RawRow>,
}

impl MemoryTable {
    fn position(&self, column: &str) -> DataTableResult<usize> {
        self.relation
            .columns()
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| {
                DataTableErrorKind::ColumnNotFound {
                    column: column.to_string(),
                    relation: self.relation.name().clone(),
                }
                .into()
            })
    }
}

/// Data source holding whole tables in memory.
///
/// Searches, ordering and pagination behave like the relational backends:
/// containment is a verbatim substring test on the value's text form, NULL
/// never matches, and values order NULL < boolean < number < text.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tables: BTreeMap<String, MemoryTable>,
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, builder style.
    ///
    /// # Errors
    ///
    /// Returns `RowShape` if a row does not have one value per column.
    pub fn with_table<I, C>(mut self, name: &str, columns: I, rows: Vec<RawRow>) -> DataTableResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.insert_table(name, columns, rows)?;
        Ok(self)
    }

    /// Register or replace a table.
    ///
    /// # Errors
    ///
    /// Returns `RowShape` if a row does not have one value per column.
    pub fn insert_table<I, C>(&mut self, name: &str, columns: I, rows: Vec<RawRow>) -> DataTableResult<()>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let relation = Relation::new(name, columns);
        let expected = relation.columns().len();
        if let Some(row) = rows.iter().find(|row| row.len() != expected) {
            return Err(DataTableErrorKind::RowShape {
                expected,
                actual: row.len(),
            }
            .into());
        }
        debug!(table = name, rows = rows.len(), "Registered in-memory table");
        self.tables.insert(name.to_string(), MemoryTable { relation, rows });
        Ok(())
    }

    fn table(&self, name: &str) -> DataTableResult<&MemoryTable> {
        self.tables
            .get(name)
            .ok_or_else(|| DataTableErrorKind::TableNotFound(name.to_string()).into())
    }
}

impl DataSource for InMemorySource {
    fn open_session(&self) -> DataTableResult<Box<dyn Session + '_>> {
        Ok(Box::new(InMemorySession { source: self }))
    }

    fn describe(&self, relation: &str) -> DataTableResult<Relation> {
        Ok(self.table(relation)?.relation.clone())
    }
}

/// Session over an [`InMemorySource`].
#[derive(Debug)]
pub struct InMemorySession<'a> {
    source: &'a InMemorySource,
}

impl InMemorySession<'_> {
    fn matching<'t>(
        &self,
        table: &'t MemoryTable,
        view: &dyn TableView,
    ) -> DataTableResult<Vec<&'t RawRow>> {
        let matcher = view
            .filter()
            .map(|filter| Matcher::compile(filter, table))
            .transpose()?;
        Ok(table
            .rows
            .iter()
            .filter(|row| matcher.as_ref().is_none_or(|m| m.matches(row)))
            .collect())
    }
}

impl Session for InMemorySession<'_> {
    #[instrument(skip_all, fields(relation = view.relation()))]
    fn count(&mut self, view: &TableCountView) -> DataTableResult<u64> {
        let table = self.source.table(view.relation())?;
        let count = self.matching(table, view)?.len();
        trace!(count, "Counted in-memory rows");
        Ok(count as u64)
    }

    #[instrument(skip_all, fields(relation = query.relation()))]
    fn fetch(&mut self, query: &TableQuery) -> DataTableResult<Vec<RawRow>> {
        let table = self.source.table(query.relation())?;
        let mut rows = self.matching(table, query)?;

        let order = query
            .order_by()
            .iter()
            .map(|term| Ok((table.position(term.column.name())?, term)))
            .collect::<DataTableResult<Vec<(usize, &OrderTerm)>>>()?;
        rows.sort_by(|a, b| {
            order
                .iter()
                .map(|(index, term)| {
                    let ordering = compare_values(&a[*index], &b[*index]);
                    if term.direction.is_asc() {
                        ordering
                    } else {
                        ordering.reverse()
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        let projection = query
            .projection()
            .iter()
            .map(|column| table.position(column.name()))
            .collect::<DataTableResult<Vec<_>>>()?;

        let offset = usize::try_from(query.offset().unwrap_or(0)).unwrap_or(usize::MAX);
        let limit = query
            .limit()
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));

        let page: Vec<RawRow> = rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|row| projection.iter().map(|&i| row[i].clone()).collect())
            .collect();
        trace!(rows = page.len(), "Fetched in-memory rows");
        Ok(page)
    }
}

/// Predicate with columns resolved to positions and patterns compiled.
enum Matcher {
    Contains(usize, String),
    Matches(usize, Regex),
    Any(Vec<Matcher>),
    All(Vec<Matcher>),
}

impl Matcher {
    fn compile(predicate: &Predicate, table: &MemoryTable) -> DataTableResult<Self> {
        Ok(match predicate {
            Predicate::Contains { column, term } => {
                Matcher::Contains(table.position(column.name())?, term.clone())
            }
            Predicate::Matches { column, pattern } => {
                let regex = Regex::new(pattern)
                    .map_err(|e| DataTableErrorKind::InvalidPattern(e.to_string()))?;
                Matcher::Matches(table.position(column.name())?, regex)
            }
            Predicate::Any(inner) => Matcher::Any(
                inner
                    .iter()
                    .map(|p| Matcher::compile(p, table))
                    .collect::<DataTableResult<_>>()?,
            ),
            Predicate::All(inner) => Matcher::All(
                inner
                    .iter()
                    .map(|p| Matcher::compile(p, table))
                    .collect::<DataTableResult<_>>()?,
            ),
        })
    }

    fn matches(&self, row: &RawRow) -> bool {
        match self {
            Matcher::Contains(index, term) => {
                value_text(&row[*index]).is_some_and(|text| text.contains(term.as_str()))
            }
            Matcher::Matches(index, regex) => {
                value_text(&row[*index]).is_some_and(|text| regex.is_match(&text))
            }
            Matcher::Any(inner) => inner.iter().any(|m| m.matches(row)),
            Matcher::All(inner) => inner.iter().all(|m| m.matches(row)),
        }
    }
}

/// Text form searched by containment and regex predicates; NULL has none.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) | Value::Object(_) => 4,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
        },
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => type_rank(a)
            .cmp(&type_rank(b))
            .then_with(|| a.to_string().cmp(&b.to_string())),
    }
}
