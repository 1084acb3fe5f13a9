use clap::Parser;
use datatables::Dialect;
use datatables::cli::{Cli, Commands, read_params};
use std::io::Write;

#[test]
fn test_parse_query_command() {
    let cli = Cli::try_parse_from([
        "datatables",
        "--backend",
        "postgres",
        "query",
        "--table",
        "users",
        "--columns",
        "id,username,color",
        "--params",
        "request.json",
        "--pretty",
    ])
    .unwrap();

    assert_eq!(cli.backend, Some(Dialect::Postgres));
    match cli.command {
        Commands::Query {
            table,
            columns,
            params,
            pretty,
        } => {
            assert_eq!(table, "users");
            assert_eq!(columns, vec!["id", "username", "color"]);
            assert_eq!(params, "request.json");
            assert!(pretty);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_query_defaults() {
    let cli = Cli::try_parse_from(["datatables", "query", "-t", "users"]).unwrap();

    assert_eq!(cli.backend, None);
    assert_eq!(cli.database_url, None);
    match cli.command {
        Commands::Query {
            columns, params, ..
        } => {
            assert!(columns.is_empty());
            assert_eq!(params, "-");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_describe_command() {
    let cli = Cli::try_parse_from([
        "datatables",
        "--database-url",
        "users.db",
        "describe",
        "--table",
        "users",
    ])
    .unwrap();

    assert_eq!(cli.database_url.as_deref(), Some("users.db"));
    assert!(matches!(cli.command, Commands::Describe { ref table } if table == "users"));
}

#[test]
fn test_unknown_backend_rejected() {
    assert!(Cli::try_parse_from(["datatables", "--backend", "oracle", "describe", "-t", "x"]).is_err());
}

#[test]
fn test_read_params_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"draw": "4", "search[value]": "red"}}"#).unwrap();
    let params = read_params(file.path().to_str().unwrap()).unwrap();

    assert_eq!(params["draw"], "4");
    assert_eq!(params["search[value]"], "red");
}

#[test]
fn test_read_params_rejects_invalid_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert!(read_params(file.path().to_str().unwrap()).is_err());
}
