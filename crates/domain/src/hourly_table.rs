//! Hourly time-series table
//!
//! Flattens the `hourly` block of an Open-Meteo style document into a
//! rectangular table: one column per measurement series, one row per entry
//! of the shared `time` axis.
//!
//! # Examples
//!
//! ```
//! use domain::hourly_table::hourly_to_csv;
//!
//! let payload = br#"{"hourly": {"time": ["2024-01-01T00:00"], "pm10": [5]}}"#;
//! let csv = hourly_to_csv(payload).expect("valid payload");
//! assert_eq!(csv, b"time,pm10\n2024-01-01T00:00,5\n");
//! ```

use std::iter;

use serde_json::{Map, Value};

use crate::errors::DomainError;

/// Top-level key holding the hourly series
pub const HOURLY_KEY: &str = "hourly";

/// Series used as the row axis, also the first column header
pub const TIME_COLUMN: &str = "time";

/// Tabular view of the hourly series
///
/// The header is `time` followed by the measurement names in the order
/// they appear in the source document. Each data row starts with the
/// timestamp; measurement series shorter than the time axis yield empty
/// cells for the missing tail, longer ones are cut at the time axis length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl HourlyTable {
    /// Parse raw JSON bytes into a table
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidJson` if the bytes are not JSON and
    /// `DomainError::InvalidPayload` if a present key has the wrong shape.
    pub fn from_json(payload: &[u8]) -> Result<Self, DomainError> {
        let document: Value = serde_json::from_slice(payload)?;
        Self::from_value(&document)
    }

    /// Build a table from an already parsed document
    ///
    /// A missing or `null` `hourly` block is treated as empty, as is a
    /// missing or `null` series.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPayload` if the document is not an
    /// object, `hourly` is not an object, or a series is not an array.
    pub fn from_value(document: &Value) -> Result<Self, DomainError> {
        let Value::Object(root) = document else {
            return Err(DomainError::invalid_payload(
                "top-level value is not an object",
            ));
        };

        let empty = Map::new();
        let hourly = match root.get(HOURLY_KEY) {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(DomainError::invalid_payload(format!(
                    "'{HOURLY_KEY}' is not an object"
                )));
            },
        };

        let times = match hourly.get(TIME_COLUMN) {
            Some(value) => series(TIME_COLUMN, value)?,
            None => &[],
        };

        let fields = hourly
            .iter()
            .filter(|(name, _)| name.as_str() != TIME_COLUMN)
            .map(|(name, value)| series(name, value).map(|values| (name.as_str(), values)))
            .collect::<Result<Vec<_>, _>>()?;

        let header = iter::once(TIME_COLUMN.to_string())
            .chain(fields.iter().map(|(name, _)| (*name).to_string()))
            .collect();

        let rows = times
            .iter()
            .enumerate()
            .map(|(i, time)| {
                iter::once(render_cell(time))
                    .chain(
                        fields
                            .iter()
                            .map(|(_, values)| values.get(i).map_or_else(String::new, render_cell)),
                    )
                    .collect()
            })
            .collect();

        Ok(Self { header, rows })
    }

    /// Column names, starting with `time`
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, excluding the header
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Serialize as comma-separated values with `\n` line endings
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CsvWrite` if the writer fails.
    pub fn to_csv(&self) -> Result<Vec<u8>, DomainError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }

        writer
            .into_inner()
            .map_err(|e| DomainError::CsvWrite(e.error().to_string()))
    }
}

/// Convert a raw JSON payload straight to CSV bytes
///
/// # Errors
///
/// See [`HourlyTable::from_json`] and [`HourlyTable::to_csv`].
pub fn hourly_to_csv(payload: &[u8]) -> Result<Vec<u8>, DomainError> {
    HourlyTable::from_json(payload)?.to_csv()
}

fn series<'a>(name: &str, value: &'a Value) -> Result<&'a [Value], DomainError> {
    match value {
        Value::Null => Ok(&[]),
        Value::Array(values) => Ok(values),
        _ => Err(DomainError::invalid_payload(format!(
            "series '{name}' is not an array"
        ))),
    }
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        // Nested values are kept as compact JSON
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
