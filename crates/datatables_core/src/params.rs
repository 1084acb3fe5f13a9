//! Request parameters and the total parser that produces them.
//!
//! Parsing never fails. Every recognised wire key maps to a typed field with an
//! explicit default, and malformed values fall back to that default.

use crate::{ColumnSpec, OrderCriterion, SortDirection};
use derive_builder::Builder;
use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use tracing::{debug, instrument};

/// Upper bound of the generated draw token.
pub const MAX_GENERATED_DRAW: i64 = 1000;

/// Flat string-keyed parameter map as sent by the table widget.
pub trait ParamSource {
    /// Value stored under `key`.
    fn param(&self, key: &str) -> Option<&str>;

    /// All keys present in the map.
    fn param_keys(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}

impl<S: BuildHasher> ParamSource for HashMap<String, String, S> {
    fn param(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }

    fn param_keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.keys().map(String::as_str))
    }
}

impl ParamSource for BTreeMap<String, String> {
    fn param(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }

    fn param_keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.keys().map(String::as_str))
    }
}

/// Fully parsed datatable request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into), default)]
pub struct RequestParams {
    /// Token echoed back to the client
    draw: i64,
    /// Row offset of the requested page
    start: u64,
    /// Page size, negative for all remaining rows
    length: i64,
    /// Global search term, empty when unset
    search_value: String,
    /// Whether the global search term is a regular expression
    search_regex: bool,
    /// Requested columns in request order
    columns: Vec<ColumnSpec>,
    /// Order criteria, primary key first
    order: Vec<OrderCriterion>,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            draw: 0,
            start: 0,
            length: -1,
            search_value: String::new(),
            search_regex: false,
            columns: Vec::new(),
            order: Vec::new(),
        }
    }
}

impl RequestParams {
    /// Create a new builder.
    pub fn builder() -> RequestParamsBuilder {
        RequestParamsBuilder::default()
    }

    /// Parse a flat wire parameter map.
    ///
    /// Column and order groups are read for `i` in `0..count`, where `count` is
    /// the number of `columns[..][data]` (resp. `order[..][column]`) keys present.
    #[instrument(skip_all)]
    pub fn parse<P: ParamSource + ?Sized>(params: &P) -> Self {
        let draw = match int_param(params, "draw", 0) {
            0 => rand::thread_rng().gen_range(1..=MAX_GENERATED_DRAW),
            draw => draw,
        };
        let start = u64::try_from(int_param(params, "start", 0)).unwrap_or(0);
        let length = int_param(params, "length", -1);

        let parsed = Self {
            draw,
            start,
            length,
            search_value: params.param("search[value]").unwrap_or_default().to_string(),
            search_regex: flag_param(params, "search[regex]"),
            columns: parse_columns(params),
            order: parse_order(params),
        };
        debug!(
            draw = parsed.draw,
            start = parsed.start,
            length = parsed.length,
            columns = parsed.columns.len(),
            order = parsed.order.len(),
            "Parsed datatable request"
        );
        parsed
    }

    /// Parse a JSON object of wire parameters.
    ///
    /// Scalar values are coerced to their string form; nulls, arrays and nested
    /// objects are ignored. Anything other than an object parses as an empty map.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut params = HashMap::new();
        if let Some(object) = value.as_object() {
            for (key, value) in object {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                params.insert(key.clone(), text);
            }
        }
        Self::parse(&params)
    }

    /// Page size as an upper bound, `None` when the whole remainder is requested.
    pub fn page_limit(&self) -> Option<u64> {
        u64::try_from(self.length).ok()
    }

    /// Whether a global search term is present.
    pub fn has_global_search(&self) -> bool {
        !self.search_value.is_empty()
    }
}

fn int_param<P: ParamSource + ?Sized>(params: &P, key: &str, default: i64) -> i64 {
    params
        .param(key)
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

fn flag_param<P: ParamSource + ?Sized>(params: &P, key: &str) -> bool {
    params.param(key) == Some("true")
}

fn text_param<P: ParamSource + ?Sized>(params: &P, key: &str) -> String {
    params.param(key).unwrap_or_default().to_string()
}

/// Number of `{group}[<i>]{field}` keys, whatever `<i>` holds.
fn count_keys<P: ParamSource + ?Sized>(params: &P, group: &str, field: &str) -> usize {
    params
        .param_keys()
        .filter(|key| {
            key.strip_prefix(group)
                .and_then(|rest| rest.strip_prefix('['))
                .and_then(|rest| rest.strip_suffix(field))
                .and_then(|rest| rest.strip_suffix(']'))
                .is_some_and(|index| !index.contains(']'))
        })
        .count()
}

fn parse_columns<P: ParamSource + ?Sized>(params: &P) -> Vec<ColumnSpec> {
    (0..count_keys(params, "columns", "[data]"))
        .map(|i| {
            let prefix = format!("columns[{i}]");
            ColumnSpec::builder()
                .index(i)
                .data(text_param(params, &format!("{prefix}[data]")))
                .name(text_param(params, &format!("{prefix}[name]")))
                .searchable(flag_param(params, &format!("{prefix}[searchable]")))
                .orderable(flag_param(params, &format!("{prefix}[orderable]")))
                .search_value(text_param(params, &format!("{prefix}[search][value]")))
                .search_regex(flag_param(params, &format!("{prefix}[search][regex]")))
                .build()
                .unwrap_or_default()
        })
        .collect()
}

fn parse_order<P: ParamSource + ?Sized>(params: &P) -> Vec<OrderCriterion> {
    (0..count_keys(params, "order", "[column]"))
        .map(|i| {
            let column_index = params
                .param(&format!("order[{i}][column]"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or_default();
            let direction = SortDirection::from_wire(params.param(&format!("order[{i}][dir]")));
            OrderCriterion::new(column_index, direction)
        })
        .collect()
}
