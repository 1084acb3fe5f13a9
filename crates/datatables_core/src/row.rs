//! Result rows keyed by output column.

use datatables_error::{DataTableErrorKind, DataTableResult};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Reserved keys under which row decorations are emitted.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum RowKey {
    /// `id` attribute of the row node
    #[strum(serialize = "DT_RowId")]
    RowId,
    /// Class added to the row node
    #[strum(serialize = "DT_RowClass")]
    RowClass,
    /// Auxiliary data attached to the row
    #[strum(serialize = "DT_RowData")]
    RowData,
    /// Attributes added to the row node
    #[strum(serialize = "DT_RowAttr")]
    RowAttr,
}

impl RowKey {
    /// Wire name of the key.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// One returned row: values in output-column order plus optional decorations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRow {
    values: Vec<(String, Value)>,
    row_id: Option<String>,
    row_class: Option<String>,
    row_data: Option<Map<String, Value>>,
    row_attr: Option<Map<String, Value>>,
}

impl ResultRow {
    /// Pair positional values with the output column list.
    ///
    /// # Errors
    ///
    /// Returns `RowShape` when the number of values differs from the number
    /// of columns.
    pub fn from_values(columns: &[String], values: Vec<Value>) -> DataTableResult<Self> {
        if columns.len() != values.len() {
            return Err(DataTableErrorKind::RowShape {
                expected: columns.len(),
                actual: values.len(),
            }
            .into());
        }
        Ok(Self {
            values: columns.iter().cloned().zip(values).collect(),
            ..Self::default()
        })
    }

    /// Value of an output column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Value of an output column rendered as text (strings unquoted).
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Output column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }

    /// Column/value pairs in output order.
    pub fn values(&self) -> &[(String, Value)] {
        &self.values
    }

    /// Number of output columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row identifier decoration.
    pub fn row_id(&self) -> Option<&str> {
        self.row_id.as_deref()
    }

    /// Row class decoration.
    pub fn row_class(&self) -> Option<&str> {
        self.row_class.as_deref()
    }

    /// Auxiliary row data decoration.
    pub fn row_data(&self) -> Option<&Map<String, Value>> {
        self.row_data.as_ref()
    }

    /// Row attribute decoration.
    pub fn row_attr(&self) -> Option<&Map<String, Value>> {
        self.row_attr.as_ref()
    }

    /// Decoration stored under a reserved key, as JSON.
    pub fn decoration(&self, key: RowKey) -> Option<Value> {
        match key {
            RowKey::RowId => self.row_id.clone().map(Value::String),
            RowKey::RowClass => self.row_class.clone().map(Value::String),
            RowKey::RowData => self.row_data.clone().map(Value::Object),
            RowKey::RowAttr => self.row_attr.clone().map(Value::Object),
        }
    }

    pub(crate) fn set_row_id(&mut self, id: String) {
        self.row_id = Some(id);
    }

    pub(crate) fn set_row_class(&mut self, class: String) {
        self.row_class = Some(class);
    }

    pub(crate) fn set_row_data(&mut self, data: Map<String, Value>) {
        self.row_data = Some(data);
    }

    pub(crate) fn set_row_attr(&mut self, attr: Map<String, Value>) {
        self.row_attr = Some(attr);
    }

    /// Flat JSON object: columns in order, then decorations that are set.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (name, value) in &self.values {
            object.insert(name.clone(), value.clone());
        }
        for key in <RowKey as strum::IntoEnumIterator>::iter() {
            if let Some(value) = self.decoration(key) {
                object.insert(key.as_str().to_string(), value);
            }
        }
        Value::Object(object)
    }
}

impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let decorations = [
            self.row_id.is_some(),
            self.row_class.is_some(),
            self.row_data.is_some(),
            self.row_attr.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();

        let mut map = serializer.serialize_map(Some(self.values.len() + decorations))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        if let Some(id) = &self.row_id {
            map.serialize_entry(RowKey::RowId.as_str(), id)?;
        }
        if let Some(class) = &self.row_class {
            map.serialize_entry(RowKey::RowClass.as_str(), class)?;
        }
        if let Some(data) = &self.row_data {
            map.serialize_entry(RowKey::RowData.as_str(), data)?;
        }
        if let Some(attr) = &self.row_attr {
            map.serialize_entry(RowKey::RowAttr.as_str(), attr)?;
        }
        map.end()
    }
}
