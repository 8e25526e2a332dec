//! Provider abstraction for blockchain metric sources.
//!
//! This module defines the [`SeriesProvider`] trait, the seam between the
//! ingestion pipeline and a concrete data vendor. The pipeline only ever asks
//! for one metric at a time, by provider code, and receives a [`Series`].
//!
//! The trait is async and object safe, so tests and alternative vendors can be
//! swapped in without touching the pipeline.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use blockchain_ingestor::models::series::Series;
//! use blockchain_ingestor::providers::{ProviderError, SeriesProvider};
//!
//! struct FixedProvider;
//!
//! #[async_trait]
//! impl SeriesProvider for FixedProvider {
//!     async fn fetch_series(&self, _code: &str) -> Result<Series, ProviderError> {
//!         Ok([("2020-01-01", "10")].into_iter().collect())
//!     }
//! }
//! ```

pub mod nasdaq_rest;

use async_trait::async_trait;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::series::Series;

/// Trait for fetching one metric's time series from a data provider.
#[async_trait]
pub trait SeriesProvider {
    /// Fetches the full time series for the metric identified by `code`.
    ///
    /// # Returns
    ///
    /// * `Ok(Series)` - Every (date, value) row the provider returned.
    /// * `Err(ProviderError)` - The request or the payload decoding failed.
    async fn fetch_series(&self, code: &str) -> Result<Series, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `SeriesProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider answered with a non-success status.
    #[snafu(display("API error (status {status}): {message}"))]
    Api {
        status: u16,
        message: String,
        backtrace: Backtrace,
    },

    /// The response body was not the expected JSON document.
    #[snafu(display("Malformed response body: {source}"))]
    Json {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// The JSON document parsed but its rows did not have the expected shape.
    #[snafu(display("Unexpected response data: {message}"))]
    Decode {
        message: String,
        backtrace: Backtrace,
    },
}
