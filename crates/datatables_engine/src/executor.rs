//! Request execution against a data source.

use crate::QueryTranslator;
use datatables_core::{ParamSource, RequestParams, ResponseEnvelope, ResultRow, RowDecorators};
use datatables_error::DataTableResult;
use datatables_interface::{DataSource, Relation, TableCountView};
use derive_getters::Getters;
use tracing::{debug, error, info, instrument};

/// Server-side table over one relation of a data source.
///
/// Each call to [`DataTable::run`] is independent: it opens its own session,
/// which is released before the call returns.
///
/// # Examples
///
/// ```
/// use datatables_engine::{DataTable, InMemorySource};
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let source = InMemorySource::new()
///     .with_table("users", ["id", "username"], vec![
///         vec![json!(1), json!("spongebob")],
///         vec![json!(2), json!("patrick")],
///     ])
///     .unwrap();
/// let table = DataTable::for_relation(source, "users", None).unwrap();
///
/// let params: HashMap<String, String> = HashMap::from([
///     ("draw".to_string(), "3".to_string()),
///     ("search[value]".to_string(), "pat".to_string()),
///     ("columns[0][data]".to_string(), "id".to_string()),
///     ("columns[1][data]".to_string(), "username".to_string()),
///     ("columns[1][searchable]".to_string(), "true".to_string()),
/// ]);
/// let envelope = table.run(&params);
///
/// assert_eq!(*envelope.records_total(), 2);
/// assert_eq!(*envelope.records_filtered(), 1);
/// ```
#[derive(Debug, Getters)]
pub struct DataTable<S> {
    /// Data source the requests run against
    source: S,
    /// Queried relation
    relation: Relation,
    /// Output column list, in projection order
    columns: Vec<String>,
    /// Row decoration callbacks
    decorators: RowDecorators,
}

impl<S: DataSource> DataTable<S> {
    /// Create a table over `relation` projecting `columns`.
    pub fn new<I, C>(source: S, relation: Relation, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            source,
            relation,
            columns: columns.into_iter().map(Into::into).collect(),
            decorators: RowDecorators::default(),
        }
    }

    /// Create a table by reflecting `relation` from the source.
    ///
    /// With `columns` unset every schema column is projected, in schema order.
    ///
    /// # Errors
    ///
    /// Returns an error if the source does not know the relation.
    #[instrument(skip(source, columns))]
    pub fn for_relation(
        source: S,
        relation: &str,
        columns: Option<Vec<String>>,
    ) -> DataTableResult<Self> {
        let relation = source.describe(relation)?;
        let columns = columns.unwrap_or_else(|| relation.columns().clone());
        Ok(Self::new(source, relation, columns))
    }

    /// Attach row decoration callbacks.
    pub fn with_decorators(mut self, decorators: RowDecorators) -> Self {
        self.decorators = decorators;
        self
    }

    /// Parse wire parameters and run the request.
    ///
    /// Never fails: errors are reported in the envelope's `error` field.
    pub fn run<P: ParamSource + ?Sized>(&self, params: &P) -> ResponseEnvelope {
        let request = RequestParams::parse(params);
        self.run_request(&request)
    }

    /// Run a request given as a JSON object of wire parameters.
    pub fn run_json(&self, params: &serde_json::Value) -> ResponseEnvelope {
        let request = RequestParams::from_json(params);
        self.run_request(&request)
    }

    /// Run an already parsed request.
    #[instrument(
        skip_all,
        fields(
            relation = %self.relation.name(),
            draw = request.draw(),
            start = request.start(),
            length = request.length()
        )
    )]
    pub fn run_request(&self, request: &RequestParams) -> ResponseEnvelope {
        let mut envelope = ResponseEnvelope::for_request(request);
        match self.execute(request, &mut envelope) {
            Ok(()) => {
                info!(
                    records_total = envelope.records_total(),
                    records_filtered = envelope.records_filtered(),
                    rows = envelope.data().len(),
                    "Datatable request completed"
                );
                envelope
            }
            Err(e) => {
                error!(error = %e, "Datatable request failed");
                envelope.fail(e.kind().to_string())
            }
        }
    }

    fn execute(
        &self,
        request: &RequestParams,
        envelope: &mut ResponseEnvelope,
    ) -> DataTableResult<()> {
        let mut session = self.source.open_session()?;

        let total = session.count(&TableCountView::all(self.relation.name()))?;
        envelope.set_records_total(total);
        debug!(records_total = total, "Counted relation rows");

        let query = QueryTranslator::new(&self.relation, &self.columns).translate(request)?;

        let filtered = session.count(&query.count_query())?;
        envelope.set_records_filtered(filtered);
        debug!(records_filtered = filtered, "Counted filtered rows");

        let page = query.paginate(*request.start(), request.page_limit());
        let raw_rows = session.fetch(&page)?;
        debug!(rows = raw_rows.len(), "Fetched page");

        let rows = raw_rows
            .into_iter()
            .map(|values| {
                let mut row = ResultRow::from_values(&self.columns, values)?;
                self.decorators.decorate(&mut row);
                Ok(row)
            })
            .collect::<DataTableResult<Vec<_>>>()?;
        envelope.set_data(rows);
        Ok(())
    }
}
