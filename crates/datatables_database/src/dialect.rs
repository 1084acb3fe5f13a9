//! SQL dialect differences between the supported backends.

use serde::{Deserialize, Serialize};

/// Relational backend a statement is rendered for.
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
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Dialect {
    /// PostgreSQL
    Postgres,
    /// SQLite
    #[default]
    Sqlite,
}

impl Dialect {
    /// Quote an identifier, doubling embedded quotes.
    pub fn quote_identifier(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    /// Placeholder for the `n`th bind parameter, counting from 1.
    pub fn placeholder(&self, n: usize) -> String {
        match self {
            Dialect::Postgres => format!("${n}"),
            Dialect::Sqlite => "?".to_string(),
        }
    }

    /// Column value as text.
    pub fn text_of(&self, column: &str) -> String {
        format!("CAST({column} AS TEXT)")
    }

    /// Verbatim substring containment; NULL never matches.
    pub fn contains(&self, column: &str, placeholder: &str) -> String {
        let text = self.text_of(column);
        match self {
            Dialect::Postgres => format!("strpos({text}, {placeholder}) > 0"),
            Dialect::Sqlite => format!("instr({text}, {placeholder}) > 0"),
        }
    }

    /// Regular expression match; NULL never matches.
    pub fn matches(&self, column: &str, placeholder: &str) -> String {
        let text = self.text_of(column);
        match self {
            Dialect::Postgres => format!("{text} ~ {placeholder}"),
            Dialect::Sqlite => format!("{text} REGEXP {placeholder}"),
        }
    }

    /// Expression packing the given columns into one JSON array, as text.
    pub fn json_row(&self, columns: &[String]) -> String {
        let list = columns.join(", ");
        match self {
            Dialect::Postgres => format!("CAST(json_build_array({list}) AS TEXT)"),
            Dialect::Sqlite => format!("json_array({list})"),
        }
    }

    /// `LIMIT`/`OFFSET` clause, empty when neither is set.
    pub fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        match (self, limit, offset) {
            (_, Some(limit), Some(offset)) => format!(" LIMIT {limit} OFFSET {offset}"),
            (_, Some(limit), None) => format!(" LIMIT {limit}"),
            (Dialect::Sqlite, None, Some(offset)) => format!(" LIMIT -1 OFFSET {offset}"),
            (Dialect::Postgres, None, Some(offset)) => format!(" OFFSET {offset}"),
            (_, None, None) => String::new(),
        }
    }

    /// Query listing a relation's column names in schema order, with the
    /// relation name as its only bind parameter.
    pub fn describe_sql(&self) -> &'static str {
        match self {
            Dialect::Postgres => {
                "SELECT CAST(column_name AS TEXT) AS name FROM information_schema.columns \
                 WHERE table_schema = current_schema() AND table_name = $1 \
                 ORDER BY ordinal_position"
            }
            Dialect::Sqlite => "SELECT name FROM pragma_table_info(?) ORDER BY cid",
        }
    }
}
