#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use blockchain_ingestor::{
    models::{metric::Metric, series::Series},
    providers::{DecodeSnafu, ProviderError, SeriesProvider},
};

pub fn series(points: &[(&str, &str)]) -> Series {
    points.iter().copied().collect()
}

pub fn failure(message: &str) -> ProviderError {
    DecodeSnafu { message }.build()
}

/// In-memory provider: each code replays its scripted results in order and
/// fails once the script runs out. Unknown codes always fail.
#[derive(Default)]
pub struct ScriptedProvider {
    scripts: Mutex<HashMap<String, VecDeque<Result<Series, ProviderError>>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(self, code: &str, series: Series) -> Self {
        self.with_results(code, vec![Ok(series)])
    }

    pub fn with_results(self, code: &str, results: Vec<Result<Series, ProviderError>>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(code.to_string())
            .or_default()
            .extend(results);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, code: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == code).count()
    }
}

#[async_trait]
impl SeriesProvider for ScriptedProvider {
    async fn fetch_series(&self, code: &str) -> Result<Series, ProviderError> {
        self.calls.lock().unwrap().push(code.to_string());
        let next = self.scripts.lock().unwrap().get_mut(code).and_then(VecDeque::pop_front);
        next.unwrap_or_else(|| Err(failure("no scripted response")))
    }
}

pub const A: Metric = Metric::new("A", "AAAA");
pub const B: Metric = Metric::new("B", "BBBB");
pub const C: Metric = Metric::new("C", "CCCC");

pub const AB: &[Metric] = &[A, B];
pub const ABC: &[Metric] = &[A, B, C];
