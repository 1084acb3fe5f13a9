//! `REGEXP` operator support for SQLite connections.
//!
//! SQLite parses `X REGEXP Y` as a call to `regexp(Y, X)` but ships no
//! implementation, so each connection registers one backed by the `regex` crate.

use diesel::QueryResult;
use diesel::sql_types::{Nullable, Text};
use diesel::sqlite::SqliteConnection;
use regex::Regex;
use std::sync::{Mutex, PoisonError};

diesel::define_sql_function! {
    /// `regexp(pattern, value)` as called by SQLite's `REGEXP` operator.
    fn regexp(pattern: Text, value: Nullable<Text>) -> diesel::sql_types::Bool;
}

/// Register the `regexp` function on a connection.
///
/// NULL values never match and neither does anything when the pattern
/// fails to compile.
pub fn register(conn: &mut SqliteConnection) -> QueryResult<()> {
    let cache: Mutex<Option<(String, Option<Regex>)>> = Mutex::new(None);
    regexp_utils::register_impl(conn, move |pattern: String, value: Option<String>| {
        let Some(value) = value else {
            return false;
        };
        let mut cached = cache.lock().unwrap_or_else(PoisonError::into_inner);
        let stale = cached.as_ref().is_none_or(|(last, _)| *last != pattern);
        if stale {
            let compiled = match Regex::new(&pattern) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::warn!(pattern = %pattern, error = %e, "Invalid REGEXP pattern");
                    None
                }
            };
            *cached = Some((pattern, compiled));
        }
        cached
            .as_ref()
            .and_then(|(_, regex)| regex.as_ref())
            .is_some_and(|regex| regex.is_match(&value))
    })
}
