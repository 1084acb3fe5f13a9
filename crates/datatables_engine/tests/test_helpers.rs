//! Shared fixtures for engine tests.

#![allow(dead_code)]

use datatables_engine::InMemorySource;
use serde_json::{Value, json};
use std::collections::HashMap;

pub const COLUMNS: [&str; 5] = ["id", "username", "email_address", "fullname", "color"];

/// (username, fullname, email_address, color), inserted with ids 1..=20.
pub const USERS: [(&str, &str, &str, &str); 20] = [
    ("spongebob", "Spongebob Squarepants", "spongebob@bikinibottom.org", "yellow"),
    ("harold", "Harold Squarepants", "harold@bikinibottom.org", "yellow"),
    ("margaret", "Margaret Squarepants", "margaret@bikinibottom.org", "yellow"),
    ("jelly", "Jellyfish", "jelly@bikinibottom.org", "pink"),
    ("patrick", "Patrick Star", "patrick@@bikinibottom.org", "pink"),
    ("squidward", "Squidward Tentacles", "squidward@bikinibottom.org", "grey"),
    ("gary", "Gary the Snail", "gary@bikinibottom.org", "pinkgreen"),
    ("larry", "Larry the Lobster", "larry@bikinibottom.org", "red"),
    ("krabs", "Mr. Krabs", "krabs@@krabshack.com", "red"),
    ("pearl", "Pearl Krabs", "pearl@@krabshack.com", "greypink"),
    ("plankton", "Sheldon Plankton", "plankton@chumbucket.com", "green"),
    ("karen", "Karen Plankton", "karen@chumbucket.com", "metal"),
    ("sandy", "Sandy Cheeks", "sandy@squirrelpower.org", "brown"),
    ("mrspuff", "Mrs. Puff", "mrspuff@drivesafely.com", "greybluered"),
    ("patchy", "Patchy the Pirate", "patchy@abovethesea.org", "mixed"),
    ("potty", "Potty the Parrot", "potty@abovethesea.org", "greenyellowred"),
    ("mm", "Mermaid Man", "mm@superhero.net", "orange"),
    ("bb", "Barnacle Boy", "bb@superhero.net", "redblack"),
    ("dutchman", "The Flying Dutchman", "dutchman@ghostship.org", "bluegrey"),
    ("neptune", "King Neptune", "neptune@gods.net", "greenred"),
];

pub fn user_rows() -> Vec<Vec<Value>> {
    USERS
        .iter()
        .enumerate()
        .map(|(i, (username, fullname, email, color))| {
            vec![
                json!(i as i64 + 1),
                json!(username),
                json!(email),
                json!(fullname),
                json!(color),
            ]
        })
        .collect()
}

pub fn users_source() -> InMemorySource {
    InMemorySource::new()
        .with_table("users", COLUMNS, user_rows())
        .expect("fixture rows match columns")
}

pub fn output_columns() -> Vec<String> {
    COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// Wire parameters for a request over `columns`, every column searchable.
pub fn query_params(
    columns: &[&str],
    search: &str,
    start: u64,
    length: i64,
    order: &[(usize, &str)],
) -> HashMap<String, String> {
    let mut params = HashMap::from([
        ("draw".to_string(), "1".to_string()),
        ("start".to_string(), start.to_string()),
        ("length".to_string(), length.to_string()),
        ("search[value]".to_string(), search.to_string()),
        ("search[regex]".to_string(), "false".to_string()),
    ]);
    for (i, column) in columns.iter().enumerate() {
        let prefix = format!("columns[{i}]");
        params.insert(format!("{prefix}[data]"), column.to_string());
        params.insert(format!("{prefix}[name]"), column.to_string());
        params.insert(format!("{prefix}[searchable]"), "true".to_string());
        params.insert(format!("{prefix}[orderable]"), "true".to_string());
        params.insert(format!("{prefix}[search][value]"), String::new());
        params.insert(format!("{prefix}[search][regex]"), "false".to_string());
    }
    for (i, (column, dir)) in order.iter().enumerate() {
        params.insert(format!("order[{i}][column]"), column.to_string());
        params.insert(format!("order[{i}][dir]"), dir.to_string());
    }
    params
}

/// Default fixture request: first page of ten, ordered by id.
pub fn default_params() -> HashMap<String, String> {
    query_params(&COLUMNS, "", 0, 10, &[(0, "asc")])
}
