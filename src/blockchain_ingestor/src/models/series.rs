//! A single metric's time series, keyed by the provider's date string.

use indexmap::IndexMap;

/// Date → value mapping for one metric.
///
/// Dates are kept as the provider sent them; no calendar parsing happens here.
/// Inserting a date that is already present replaces its value, so the last
/// row of a payload wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Series {
    points: IndexMap<String, String>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: impl Into<String>, value: impl Into<String>) {
        self.points.insert(date.into(), value.into());
    }

    pub fn get(&self, date: &str) -> Option<&str> {
        self.points.get(date).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.points.iter().map(|(d, v)| (d.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<D, V> FromIterator<(D, V)> for Series
where
    D: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (D, V)>>(iter: I) -> Self {
        let mut series = Series::new();
        for (date, value) in iter {
            series.insert(date, value);
        }
        series
    }
}
