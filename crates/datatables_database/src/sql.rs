//! Rendering of table queries into parameterized SQL.

use crate::Dialect;
use datatables_interface::{Predicate, TableCountView, TableQuery, TableView};
use derive_getters::Getters;

/// SQL text with its bind values in placeholder order.
///
/// Every bind is a text value; identifiers are quoted into the text and
/// search terms only ever travel as binds.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SqlStatement {
    /// SQL text
    sql: String,
    /// Bind values
    binds: Vec<String>,
}

impl SqlStatement {
    /// Page of rows, each packed into a JSON array column named `row_json`.
    pub fn select(dialect: Dialect, query: &TableQuery) -> Self {
        let mut writer = StatementWriter::new(dialect);
        let columns: Vec<String> = query
            .projection()
            .iter()
            .map(|column| dialect.quote_identifier(column.name()))
            .collect();

        writer.push(&format!(
            "SELECT {} AS row_json FROM {}",
            dialect.json_row(&columns),
            dialect.quote_identifier(query.relation())
        ));
        writer.push_filter(query);

        if !query.order_by().is_empty() {
            let terms: Vec<String> = query
                .order_by()
                .iter()
                .map(|term| {
                    format!(
                        "{} {}",
                        dialect.quote_identifier(term.column.name()),
                        if term.direction.is_asc() { "ASC" } else { "DESC" }
                    )
                })
                .collect();
            writer.push(&format!(" ORDER BY {}", terms.join(", ")));
        }

        writer.push(&dialect.limit_offset(query.limit(), query.offset()));
        writer.finish()
    }

    /// Row count, in a column named `count`.
    pub fn count(dialect: Dialect, view: &TableCountView) -> Self {
        let mut writer = StatementWriter::new(dialect);
        writer.push(&format!(
            "SELECT COUNT(*) AS count FROM {}",
            dialect.quote_identifier(view.relation())
        ));
        writer.push_filter(view);
        writer.finish()
    }

    /// Column names of a relation, in a column named `name`.
    pub fn describe(dialect: Dialect, relation: &str) -> Self {
        Self {
            sql: dialect.describe_sql().to_string(),
            binds: vec![relation.to_string()],
        }
    }
}

struct StatementWriter {
    dialect: Dialect,
    sql: String,
    binds: Vec<String>,
}

impl StatementWriter {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            binds: Vec::new(),
        }
    }

    fn push(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    fn bind(&mut self, value: &str) -> String {
        self.binds.push(value.to_string());
        self.dialect.placeholder(self.binds.len())
    }

    fn push_filter(&mut self, view: &dyn TableView) {
        if let Some(filter) = view.filter() {
            let condition = self.condition(filter);
            self.push(" WHERE ");
            self.push(&condition);
        }
    }

    fn condition(&mut self, predicate: &Predicate) -> String {
        match predicate {
            Predicate::Contains { column, term } => {
                let placeholder = self.bind(term);
                self.dialect
                    .contains(&self.dialect.quote_identifier(column.name()), &placeholder)
            }
            Predicate::Matches { column, pattern } => {
                let placeholder = self.bind(pattern);
                self.dialect
                    .matches(&self.dialect.quote_identifier(column.name()), &placeholder)
            }
            Predicate::Any(inner) if inner.is_empty() => "1 = 0".to_string(),
            Predicate::All(inner) if inner.is_empty() => "1 = 1".to_string(),
            Predicate::Any(inner) => self.group(inner, " OR "),
            Predicate::All(inner) => self.group(inner, " AND "),
        }
    }

    fn group(&mut self, inner: &[Predicate], separator: &str) -> String {
        let parts: Vec<String> = inner.iter().map(|p| self.condition(p)).collect();
        format!("({})", parts.join(separator))
    }

    fn finish(self) -> SqlStatement {
        SqlStatement {
            sql: self.sql,
            binds: self.binds,
        }
    }
}
