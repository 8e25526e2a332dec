//! Bounded retry around a single metric download.
//!
//! Every attempt is classified as an [`AttemptOutcome`], so the loop itself
//! can be exercised with a scripted provider instead of a live endpoint.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::DEFAULT_MAX_ATTEMPTS;
use crate::models::{metric::Metric, series::Series};
use crate::providers::{ProviderError, SeriesProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per metric, including the first.
    pub max_attempts: u32,
    /// Pause between a failed attempt and the next one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::ZERO,
        }
    }
}

/// Result of one attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    Success(Series),
    /// Failed, but attempts remain.
    Retryable(ProviderError),
    /// The final permitted attempt failed.
    Exhausted(ProviderError),
}

impl AttemptOutcome {
    pub fn classify(
        result: Result<Series, ProviderError>,
        attempt: u32,
        policy: &RetryPolicy,
    ) -> Self {
        match result {
            Ok(series) => AttemptOutcome::Success(series),
            Err(err) if attempt < policy.max_attempts => AttemptOutcome::Retryable(err),
            Err(err) => AttemptOutcome::Exhausted(err),
        }
    }
}

/// Result of all attempts for one metric.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched { series: Series, attempts: u32 },
    Exhausted { attempts: u32, last_error: ProviderError },
}

impl FetchOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            FetchOutcome::Fetched { attempts, .. } | FetchOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, FetchOutcome::Exhausted { .. })
    }

    /// The fetched series, or an empty one when every attempt failed.
    pub fn into_series(self) -> Series {
        match self {
            FetchOutcome::Fetched { series, .. } => series,
            FetchOutcome::Exhausted { .. } => Series::new(),
        }
    }
}

/// Downloads one metric, retrying failed attempts up to `policy.max_attempts`.
///
/// Each attempt starts from an empty series; nothing from a failed attempt is
/// kept. All error kinds count the same.
pub async fn fetch_with_retry<P>(
    provider: &P,
    metric: &Metric,
    policy: &RetryPolicy,
) -> FetchOutcome
where
    P: SeriesProvider + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let policy = RetryPolicy { max_attempts, ..*policy };
    let mut attempt = 1;

    loop {
        let result = provider.fetch_series(metric.code).await;

        match AttemptOutcome::classify(result, attempt, &policy) {
            AttemptOutcome::Success(series) => {
                info!(
                    metric = metric.name,
                    rows = series.len(),
                    "Downloaded '{}' successfully",
                    metric.name
                );
                return FetchOutcome::Fetched {
                    series,
                    attempts: attempt,
                };
            }
            AttemptOutcome::Retryable(err) => {
                warn!(
                    metric = metric.name,
                    attempt,
                    max_attempts,
                    error = %err,
                    "Failed to download '{}' ({attempt} / {max_attempts})",
                    metric.name
                );
                if !policy.delay.is_zero() {
                    tokio::time::sleep(policy.delay).await;
                }
                attempt += 1;
            }
            AttemptOutcome::Exhausted(err) => {
                error!(
                    metric = metric.name,
                    code = metric.code,
                    attempt,
                    max_attempts,
                    error = %err,
                    "Failed to download '{}' ({attempt} / {max_attempts}), giving up",
                    metric.name
                );
                return FetchOutcome::Exhausted {
                    attempts: attempt,
                    last_error: err,
                };
            }
        }
    }
}
