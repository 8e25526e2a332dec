use serde::Deserialize;
use serde_json::Value;

use crate::models::series::Series;
use crate::providers::{DecodeSnafu, ProviderError};

/// Field written for a `null` value cell.
pub const NULL_VALUE: &str = "0";

#[derive(Deserialize, Debug)]
pub struct DatatableResponse {
    pub datatable: Datatable,
    #[serde(default)]
    pub meta: Option<DatatableMeta>,
}

/// Rows are `[code, date, value, ...]`; only the date and value cells are used.
#[derive(Deserialize, Debug)]
pub struct Datatable {
    pub data: Vec<Vec<Value>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct DatatableMeta {
    #[serde(default)]
    pub next_cursor_id: Option<String>,
}

impl DatatableResponse {
    pub fn next_cursor(&self) -> Option<&str> {
        self.meta.as_ref()?.next_cursor_id.as_deref()
    }
}

impl Datatable {
    /// Folds every row into `series`. A later row with the same date replaces
    /// an earlier one.
    pub fn extend_series(&self, series: &mut Series) -> Result<(), ProviderError> {
        for (index, row) in self.data.iter().enumerate() {
            let (Some(date), Some(value)) = (row.get(1), row.get(2)) else {
                return DecodeSnafu {
                    message: format!("row {index} has {} cells, expected at least 3", row.len()),
                }
                .fail();
            };

            let date = match date {
                Value::Null => None,
                other => scalar_text(other),
            }
            .ok_or_else(|| {
                DecodeSnafu {
                    message: format!("row {index} has an unusable date cell: {date}"),
                }
                .build()
            })?;

            let value = match value {
                Value::Null => Some(NULL_VALUE.to_string()),
                other => scalar_text(other),
            }
            .ok_or_else(|| {
                DecodeSnafu {
                    message: format!("row {index} has a non-scalar value cell: {value}"),
                }
                .build()
            })?;

            series.insert(date, value);
        }
        Ok(())
    }

    pub fn into_series(self) -> Result<Series, ProviderError> {
        let mut series = Series::new();
        self.extend_series(&mut series)?;
        Ok(series)
    }
}

fn scalar_text(cell: &Value) -> Option<String> {
    match cell {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
