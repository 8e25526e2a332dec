use thiserror::Error;

use crate::config::ConfigError;
use crate::io::sink::SinkError;
use crate::providers::ProviderInitError;

/// The unified error type for the `blockchain_ingestor` crate.
///
/// Per-metric download failures never surface here; they are retried and
/// then logged by the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The provider could not be created (e.g., missing API key).
    #[error("Provider initialization error: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// An error originating from the data sink (e.g., file I/O).
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}
