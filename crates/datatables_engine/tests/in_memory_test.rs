use datatables_core::SortDirection;
use datatables_engine::InMemorySource;
use datatables_error::DataTableErrorKind;
use datatables_interface::{DataSource, OrderTerm, Predicate, TableCountView, TableQuery};
use serde_json::{Value, json};

fn mixed_source() -> InMemorySource {
    InMemorySource::new()
        .with_table(
            "things",
            ["id", "label"],
            vec![
                vec![json!(1), json!("banana")],
                vec![json!(2), Value::Null],
                vec![json!(3), json!(10)],
                vec![json!(4), json!(true)],
                vec![json!(5), json!("apple")],
                vec![json!(6), json!(2.5)],
            ],
        )
        .unwrap()
}

fn ids(rows: &[Vec<Value>]) -> Vec<i64> {
    rows.iter().map(|row| row[0].as_i64().unwrap()).collect()
}

#[test]
fn test_describe() {
    let source = mixed_source();
    let relation = source.describe("things").unwrap();
    assert_eq!(relation.name(), "things");
    assert_eq!(relation.columns(), &vec!["id".to_string(), "label".to_string()]);

    let err = source.describe("nothing").unwrap_err();
    assert!(matches!(err.kind(), DataTableErrorKind::TableNotFound(name) if name == "nothing"));
}

#[test]
fn test_row_shape_checked_on_insert() {
    let err = InMemorySource::new()
        .with_table("bad", ["a", "b"], vec![vec![json!(1)]])
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        DataTableErrorKind::RowShape {
            expected: 2,
            actual: 1
        }
    ));
}

#[test]
fn test_count_all_and_filtered() {
    let source = mixed_source();
    let relation = source.describe("things").unwrap();
    let label = relation.resolve("label").unwrap();
    let mut session = source.open_session().unwrap();

    assert_eq!(session.count(&TableCountView::all("things")).unwrap(), 6);

    let query = TableQuery::select("things", vec![label.clone()])
        .and_where(Predicate::search(label, "an", false));
    assert_eq!(session.count(&query.count_query()).unwrap(), 1);
}

#[test]
fn test_null_never_matches() {
    let source = mixed_source();
    let relation = source.describe("things").unwrap();
    let label = relation.resolve("label").unwrap();
    let mut session = source.open_session().unwrap();

    let query = TableQuery::select("things", vec![relation.resolve("id").unwrap()])
        .and_where(Predicate::search(label, ".*", true));
    assert_eq!(ids(&session.fetch(&query).unwrap()), vec![1, 3, 4, 5, 6]);
}

#[test]
fn test_non_text_values_searched_as_text() {
    let source = mixed_source();
    let relation = source.describe("things").unwrap();
    let label = relation.resolve("label").unwrap();
    let mut session = source.open_session().unwrap();

    let query = TableQuery::select("things", vec![relation.resolve("id").unwrap()])
        .and_where(Predicate::search(label, "1", false));
    assert_eq!(ids(&session.fetch(&query).unwrap()), vec![3]);
}

#[test]
fn test_mixed_type_ordering() {
    let source = mixed_source();
    let relation = source.describe("things").unwrap();
    let label = relation.resolve("label").unwrap();
    let mut session = source.open_session().unwrap();

    let query = TableQuery::select("things", vec![relation.resolve("id").unwrap()])
        .then_order_by(OrderTerm::new(label.clone(), SortDirection::Asc));
    assert_eq!(ids(&session.fetch(&query).unwrap()), vec![2, 4, 6, 3, 5, 1]);

    let query = TableQuery::select("things", vec![relation.resolve("id").unwrap()])
        .then_order_by(OrderTerm::new(label, SortDirection::Desc));
    assert_eq!(ids(&session.fetch(&query).unwrap()), vec![1, 5, 3, 6, 4, 2]);
}

#[test]
fn test_pagination() {
    let source = mixed_source();
    let relation = source.describe("things").unwrap();
    let id = relation.resolve("id").unwrap();
    let mut session = source.open_session().unwrap();

    let base = TableQuery::select("things", vec![id.clone()])
        .then_order_by(OrderTerm::new(id, SortDirection::Desc));
    assert_eq!(
        ids(&session.fetch(&base.clone().paginate(1, Some(2))).unwrap()),
        vec![5, 4]
    );
    assert_eq!(
        ids(&session.fetch(&base.clone().paginate(4, None)).unwrap()),
        vec![2, 1]
    );
    assert!(session.fetch(&base.paginate(10, Some(5))).unwrap().is_empty());
}

#[test]
fn test_invalid_pattern() {
    let source = mixed_source();
    let relation = source.describe("things").unwrap();
    let label = relation.resolve("label").unwrap();
    let mut session = source.open_session().unwrap();

    let query = TableQuery::select("things", vec![label.clone()])
        .and_where(Predicate::search(label, "[", true));
    let err = session.count(&query.count_query()).unwrap_err();
    assert!(matches!(err.kind(), DataTableErrorKind::InvalidPattern(_)));
}
