//! Aligns per-metric series into one wide table keyed by date.
//!
//! Each folded series adds exactly one column. A date missing from a series
//! gets [`MISSING_VALUE`] in that column, and a date first seen in a later
//! series is back-filled with [`MISSING_VALUE`] for every earlier column.
//! Rows are kept in a `BTreeMap`, so iteration is already in plain string
//! order of the date key (not calendar order).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::series::Series;

/// Field written where a metric has no value for a date.
pub const MISSING_VALUE: &str = "0";

/// How metrics that produce no rows before any data has arrived are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnPolicy {
    /// Leading empty series are dropped without reserving a column, so the
    /// output is narrower than the catalog when the first metrics fail.
    /// Empty series after the first non-empty one still add a `"0"` column.
    #[default]
    SkipLeading,
    /// Every series reserves a column, so the output always has one column
    /// per folded metric.
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOutcome {
    /// The first rows of the table came from this series.
    Seeded,
    /// A column was added.
    Merged,
    /// The series was empty and the table had no rows yet; no column added.
    SkippedLeading,
}

#[derive(Debug, Clone)]
pub struct MetricTable {
    policy: ColumnPolicy,
    capacity: usize,
    width: usize,
    rows: BTreeMap<String, Vec<String>>,
}

impl MetricTable {
    /// `capacity` is the expected number of columns, used to size each row.
    pub fn new(policy: ColumnPolicy, capacity: usize) -> Self {
        Self {
            policy,
            capacity,
            width: 0,
            rows: BTreeMap::new(),
        }
    }

    pub fn fold(&mut self, series: &Series) -> FoldOutcome {
        if self.rows.is_empty() && series.is_empty() && self.policy == ColumnPolicy::SkipLeading {
            return FoldOutcome::SkippedLeading;
        }

        let seeding = self.rows.is_empty() && !series.is_empty();

        for (date, fields) in self.rows.iter_mut() {
            fields.push(series.get(date).unwrap_or(MISSING_VALUE).to_string());
        }

        for (date, value) in series.iter() {
            if self.rows.contains_key(date) {
                continue;
            }
            let mut fields = Vec::with_capacity(self.capacity.max(self.width + 1));
            fields.resize(self.width, MISSING_VALUE.to_string());
            fields.push(value.to_string());
            self.rows.insert(date.to_string(), fields);
        }

        self.width += 1;

        if seeding {
            FoldOutcome::Seeded
        } else {
            FoldOutcome::Merged
        }
    }

    /// Number of columns every row currently holds.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, date: &str) -> Option<&[String]> {
        self.rows.get(date).map(Vec::as_slice)
    }

    /// Rows in ascending string order of the date.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.rows.iter().map(|(date, fields)| (date.as_str(), fields.as_slice()))
    }
}
