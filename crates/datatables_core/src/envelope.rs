//! Response envelope returned for every request.

use crate::{RequestParams, ResultRow};
use derive_getters::Getters;
use serde::Serialize;

/// Paginated, filtered result set in the table widget's response shape.
///
/// Always produced, also on failure: `error` then carries the message and the
/// counts hold whatever was computed before the failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Echoed draw token
    draw: i64,
    /// Row offset of the page
    start: u64,
    /// Requested page size
    length: i64,
    /// Row count of the relation, ignoring every filter
    records_total: u64,
    /// Row count after searching, before pagination
    records_filtered: u64,
    /// Rows of the requested page
    data: Vec<ResultRow>,
    /// Failure message, absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ResponseEnvelope {
    /// Empty envelope echoing the request's draw, start and length.
    pub fn for_request(params: &RequestParams) -> Self {
        Self {
            draw: *params.draw(),
            start: *params.start(),
            length: *params.length(),
            ..Self::default()
        }
    }

    /// Record the unfiltered row count.
    pub fn set_records_total(&mut self, total: u64) {
        self.records_total = total;
    }

    /// Record the filtered row count.
    pub fn set_records_filtered(&mut self, filtered: u64) {
        self.records_filtered = filtered;
    }

    /// Attach the page of rows.
    pub fn set_data(&mut self, data: Vec<ResultRow>) {
        self.data = data;
    }

    /// Mark the envelope as failed.
    pub fn fail(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Whether the request failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Serialize into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if a row value cannot be represented as JSON.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
