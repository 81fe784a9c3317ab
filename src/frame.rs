//! A small date-indexed table of metric columns, built from the JSON rows analytics APIs return.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

pub const DATE_COLUMN: &str = "Date";

/// One JSON object as returned by the API, keys in response order.
pub type Record = Map<String, Value>;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("rows have no Date column")]
    MissingDate,
    #[error("failed to parse date {0}")]
    InvalidDate(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameRow {
    pub date: NaiveDate,
    /// One value per metric column, NaN where the API gave none.
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<FrameRow>,
}

/// Upper-cases the first character and lower-cases the rest, `NUM_MINTED` -> `Num_minted`.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

fn parse_date(value: &Value) -> Result<NaiveDate, FrameError> {
    let text = match value {
        Value::String(text) => text.trim(),
        other => return Err(FrameError::InvalidDate(other.to_string())),
    };

    if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        // Keep the wall-clock date of the given offset.
        return Ok(date_time.naive_local().date());
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(date_time.date());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| FrameError::InvalidDate(text.to_string()))
}

fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(f64::NAN),
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

impl Frame {
    pub fn new(columns: Vec<String>, rows: Vec<FrameRow>) -> Self {
        assert!(
            rows.iter().all(|row| row.values.len() == columns.len()),
            "every frame row needs one value per column"
        );
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a frame from API rows. Column names are capitalized, columns that aren't numeric
    /// are dropped, and rows come out sorted ascending by date.
    pub fn from_records(records: &[Record]) -> Result<Self, FrameError> {
        if records.is_empty() {
            return Ok(Self::empty());
        }

        // Rows may omit keys, take every key in order of first appearance.
        let mut keys: Vec<&String> = Vec::new();
        for key in records.iter().flat_map(|record| record.keys()) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        let date_key = keys
            .iter()
            .find(|key| capitalize(key) == DATE_COLUMN)
            .copied()
            .ok_or(FrameError::MissingDate)?;

        let metric_keys = keys
            .iter()
            .copied()
            .filter(|key| *key != date_key)
            .filter(|key| {
                let numeric = records
                    .iter()
                    .all(|record| record.get(*key).map_or(true, |v| parse_number(v).is_some()));
                if !numeric {
                    debug!(column = key.as_str(), "dropping non-numeric column");
                }
                numeric
            })
            .collect::<Vec<_>>();

        let mut rows = records
            .iter()
            .map(|record| {
                let date = parse_date(record.get(date_key).unwrap_or(&Value::Null))?;
                let values = metric_keys
                    .iter()
                    .map(|key| record.get(*key).and_then(parse_number).unwrap_or(f64::NAN))
                    .collect();
                Ok(FrameRow { date, values })
            })
            .collect::<Result<Vec<_>, FrameError>>()?;

        // Stable, rows sharing a date keep their response order.
        rows.sort_by_key(|row| row.date);

        let columns = metric_keys.iter().map(|key| capitalize(key)).collect();

        Ok(Self { columns, rows })
    }

    /// Metric column names, the date column excluded.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[FrameRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|row| row.date).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row.values[index]).collect())
    }
}
