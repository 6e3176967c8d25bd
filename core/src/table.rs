//! Columnar hand-off tables for glyph layers.

use serde::ser::{Serialize, SerializeMap, Serializer};
use smartstring::alias::String as SmartString;

use crate::errors::{GraphPlotError, Result};
use crate::types::AttrValue;

/// One column of an [`EncodingTable`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Column {
    Numeric(Vec<f64>),
    Text(Vec<SmartString>),
    /// `[from, to]` coordinate pairs of line glyphs.
    Spans(Vec<[f64; 2]>),
    /// Raw attribute values, kept for tooltip display.
    Values(Vec<AttrValue>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
            Column::Spans(v) => v.len(),
            Column::Values(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Columnar table handed to the plotting surface for one glyph layer.
///
/// Columns keep their insertion order, and every column holds one row per
/// node or edge of the layer. Inserting a column whose length deviates from
/// the rest of the table is a contract violation: it is checked in debug
/// builds on insert and can be checked explicitly with
/// [`EncodingTable::validate`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EncodingTable {
    columns: Vec<(SmartString, Column)>,
}

impl EncodingTable {
    pub fn new() -> EncodingTable {
        EncodingTable::default()
    }

    /// Adds a column or replaces an existing one with the same name without
    /// changing its position.
    pub fn insert<K: Into<SmartString>>(&mut self, name: K, column: Column) {
        let name = name.into();
        debug_assert!(
            self.columns
                .iter()
                .all(|(n, c)| *n == name || c.len() == column.len()),
            "column '{}' has {} rows, table has {}",
            name,
            column.len(),
            self.rows()
        );
        if let Some(existing) = self.columns.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = column;
        } else {
            self.columns.push((name, column));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, c)| c)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows, taken from the first column.
    pub fn rows(&self) -> usize {
        self.columns.first().map(|(_, c)| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Checks that all columns have the same number of rows.
    pub fn validate(&self) -> Result<()> {
        let mut expected: Option<usize> = None;
        for (name, column) in &self.columns {
            let len = column.len();
            match expected {
                None => expected = Some(len),
                Some(e) if e != len => {
                    return Err(GraphPlotError::InconsistentRowLength {
                        column: name.to_string(),
                        expected: e,
                        actual: len,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

// Serialized as a map so the JSON shape is directly consumable as a column
// data source. Insertion order is preserved.
impl Serialize for EncodingTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, column) in &self.columns {
            map.serialize_entry(name.as_str(), column)?;
        }
        map.end()
    }
}
