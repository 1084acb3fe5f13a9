#![cfg(feature = "sqlite")]

use datatables_core::RowDecorators;
use datatables_database::{SqliteSource, establish_connection};
use datatables_engine::DataTable;
use datatables_interface::DataSource;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use diesel::sqlite::SqliteConnection;
use serde_json::Value;
use std::collections::HashMap;
use tempfile::TempDir;

const COLUMNS: [&str; 5] = ["id", "username", "email_address", "fullname", "color"];

const USERS: [(&str, &str, &str, &str); 20] = [
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

/// Temporary database seeded with the users fixture; removed on drop.
struct TestDatabase {
    _dir: TempDir,
    url: String,
}

impl TestDatabase {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("users.db").to_str().unwrap().to_string();
        let mut conn: SqliteConnection = establish_connection(&url).unwrap();

        diesel::sql_query(
            "CREATE TABLE users (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL,
                email_address TEXT,
                fullname TEXT,
                color TEXT
            )",
        )
        .execute(&mut conn)
        .unwrap();
        for (username, fullname, email, color) in USERS {
            diesel::sql_query(
                "INSERT INTO users (username, email_address, fullname, color) VALUES (?, ?, ?, ?)",
            )
            .bind::<Text, _>(username)
            .bind::<Text, _>(email)
            .bind::<Text, _>(fullname)
            .bind::<Text, _>(color)
            .execute(&mut conn)
            .unwrap();
        }

        diesel::sql_query("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT)")
            .execute(&mut conn)
            .unwrap();
        for body in [Some("first"), None, Some("third")] {
            diesel::sql_query("INSERT INTO notes (body) VALUES (?)")
                .bind::<Nullable<Text>, _>(body)
                .execute(&mut conn)
                .unwrap();
        }

        Self { _dir: dir, url }
    }

    fn source(&self) -> SqliteSource {
        SqliteSource::connect(&self.url, 2).unwrap()
    }
}

#[derive(QueryableByName)]
struct Name {
    #[diesel(sql_type = Text)]
    name: String,
}

fn params(search: &str, start: u64, length: i64, order: &[(usize, &str)]) -> HashMap<String, String> {
    let mut params = HashMap::from([
        ("draw".to_string(), "1".to_string()),
        ("start".to_string(), start.to_string()),
        ("length".to_string(), length.to_string()),
        ("search[value]".to_string(), search.to_string()),
    ]);
    for (i, column) in COLUMNS.iter().enumerate() {
        params.insert(format!("columns[{i}][data]"), column.to_string());
        params.insert(format!("columns[{i}][searchable]"), "true".to_string());
    }
    for (i, (column, dir)) in order.iter().enumerate() {
        params.insert(format!("order[{i}][column]"), column.to_string());
        params.insert(format!("order[{i}][dir]"), dir.to_string());
    }
    params
}

fn usernames(table: &DataTable<SqliteSource>, params: &HashMap<String, String>) -> Vec<String> {
    let envelope = table.run(params);
    assert!(!envelope.is_error(), "unexpected error: {:?}", envelope.error());
    envelope
        .data()
        .iter()
        .map(|row| row.text("username").unwrap())
        .collect()
}

#[test]
fn test_describe_reflects_columns() {
    let db = TestDatabase::new();
    let relation = db.source().describe("users").unwrap();

    assert_eq!(relation.name(), "users");
    assert_eq!(relation.columns(), &COLUMNS.map(String::from).to_vec());
}

#[test]
fn test_describe_unknown_table() {
    let db = TestDatabase::new();
    let err = db.source().describe("fish").unwrap_err();
    assert!(err.to_string().contains("'fish' not found"));
}

#[test]
fn test_first_page() {
    let db = TestDatabase::new();
    let table = DataTable::for_relation(db.source(), "users", None).unwrap();
    let envelope = table.run(&params("", 0, 10, &[(0, "asc")]));

    assert!(!envelope.is_error());
    assert_eq!(*envelope.records_total(), 20);
    assert_eq!(*envelope.records_filtered(), 20);
    assert_eq!(envelope.data().len(), 10);

    let first = &envelope.data()[0];
    assert_eq!(first.get("id"), Some(&Value::from(1)));
    assert_eq!(first.text("fullname").as_deref(), Some("Spongebob Squarepants"));
    assert_eq!(first.columns().collect::<Vec<_>>(), COLUMNS.to_vec());
}

#[test]
fn test_page_size_and_remainder() {
    let db = TestDatabase::new();
    let table = DataTable::for_relation(db.source(), "users", None).unwrap();

    let page = table.run(&params("", 15, 5, &[(0, "asc")]));
    assert_eq!(page.data()[0].get("id"), Some(&Value::from(16)));
    assert_eq!(page.data().len(), 5);

    let remainder = table.run(&params("", 12, -1, &[]));
    assert_eq!(remainder.data().len(), 8);
}

#[test]
fn test_global_search() {
    let db = TestDatabase::new();
    let table = DataTable::for_relation(db.source(), "users", None).unwrap();
    let envelope = table.run(&params("bikinibottom.org", 0, 10, &[]));

    assert_eq!(*envelope.records_total(), 20);
    assert_eq!(*envelope.records_filtered(), 8);
}

#[test]
fn test_search_is_verbatim() {
    let db = TestDatabase::new();
    let table = DataTable::for_relation(db.source(), "users", None).unwrap();

    assert_eq!(*table.run(&params("bikini%org", 0, 10, &[])).records_filtered(), 0);
    assert_eq!(*table.run(&params("gar_", 0, 10, &[])).records_filtered(), 0);
}

#[test]
fn test_column_search() {
    let db = TestDatabase::new();
    let table = DataTable::for_relation(db.source(), "users", None).unwrap();
    let mut request = params("", 0, 10, &[(0, "asc")]);
    request.insert("columns[4][search][value]".to_string(), "red".to_string());
    request.insert("columns[2][search][value]".to_string(), "org".to_string());

    assert_eq!(usernames(&table, &request), vec!["larry", "potty"]);
}

#[test]
fn test_regexp_search() {
    let db = TestDatabase::new();
    let table = DataTable::for_relation(db.source(), "users", None).unwrap();
    let mut request = params("", 0, 10, &[(0, "asc")]);
    request.insert("columns[4][search][value]".to_string(), "^grey".to_string());
    request.insert("columns[4][search][regex]".to_string(), "true".to_string());

    assert_eq!(usernames(&table, &request), vec!["squidward", "pearl", "mrspuff"]);
}

#[test]
fn test_invalid_regexp_reports_error() {
    let db = TestDatabase::new();
    let table = DataTable::for_relation(db.source(), "users", None).unwrap();
    let mut request = params("", 0, 10, &[]);
    request.insert("columns[1][search][value]".to_string(), "(".to_string());
    request.insert("columns[1][search][regex]".to_string(), "true".to_string());
    let envelope = table.run(&request);

    assert!(envelope.is_error());
    assert!(envelope.error().as_deref().unwrap().contains("Invalid search pattern"));
    assert_eq!(*envelope.records_total(), 20);
    assert!(envelope.data().is_empty());
}

#[test]
fn test_regexp_function_ignores_invalid_pattern() {
    let db = TestDatabase::new();
    let source = db.source();
    let mut conn = source.pool().get().unwrap();

    let matched: Vec<String> =
        diesel::sql_query("SELECT username AS name FROM users WHERE username REGEXP '^sq' ORDER BY id")
            .load::<Name>(&mut *conn)
            .unwrap()
            .into_iter()
            .map(|row| row.name)
            .collect();
    assert_eq!(matched, vec!["squidward"]);

    let rows = diesel::sql_query("SELECT username AS name FROM users WHERE username REGEXP '('")
        .load::<Name>(&mut *conn)
        .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_pool_size_follows_connect() {
    let db = TestDatabase::new();
    let source = db.source();

    assert_eq!(source.pool().max_size(), 2);
}

#[test]
fn test_multi_column_order() {
    let db = TestDatabase::new();
    let table = DataTable::for_relation(db.source(), "users", None).unwrap();
    let envelope = table.run(&params("", 0, -1, &[(4, "desc"), (1, "desc")]));

    let rows: Vec<(String, String)> = envelope
        .data()
        .iter()
        .map(|row| (row.text("color").unwrap(), row.text("username").unwrap()))
        .collect();
    let mut sorted = rows.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(rows, sorted);
}

#[test]
fn test_null_values() {
    let db = TestDatabase::new();
    let table = DataTable::for_relation(db.source(), "notes", None).unwrap();
    let mut request = HashMap::from([
        ("search[value]".to_string(), "i".to_string()),
        ("columns[0][data]".to_string(), "id".to_string()),
        ("columns[1][data]".to_string(), "body".to_string()),
        ("columns[1][searchable]".to_string(), "true".to_string()),
    ]);
    let envelope = table.run(&request);
    assert_eq!(*envelope.records_filtered(), 2);

    request.remove("search[value]");
    let envelope = table.run(&request);
    assert_eq!(envelope.data()[1].get("body"), Some(&Value::Null));
}

#[test]
fn test_decorated_rows() {
    let db = TestDatabase::new();
    let table = DataTable::for_relation(db.source(), "users", None)
        .unwrap()
        .with_decorators(
            RowDecorators::new().with_row_id(|row| format!("row_{}", row.get("id").unwrap())),
        );
    let envelope = table.run(&params("", 0, 1, &[]));
    let wire = envelope.to_json().unwrap();

    assert_eq!(wire["data"][0]["DT_RowId"], Value::from("row_1"));
    assert_eq!(wire["recordsTotal"], Value::from(20));
}

#[test]
fn test_unknown_column_reports_error() {
    let db = TestDatabase::new();
    let table = DataTable::for_relation(
        db.source(),
        "users",
        Some(vec!["id".to_string(), "shoe_size".to_string()]),
    )
    .unwrap();
    let envelope = table.run(&params("", 0, 10, &[]));

    assert!(envelope.is_error());
    assert!(envelope.error().as_deref().unwrap().contains("shoe_size"));
}
