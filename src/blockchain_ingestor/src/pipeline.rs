//! The fetch → merge → emit pass over the metric catalog.

use tracing::{Instrument, info, info_span, warn};

use crate::errors::Error;
use crate::io::sink::DataSink;
use crate::merge::{ColumnPolicy, FoldOutcome, MetricTable};
use crate::models::metric::{Metric, MetricCatalog};
use crate::providers::SeriesProvider;
use crate::requests::retry::{RetryPolicy, fetch_with_retry};

/// What happened to each metric of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub downloaded: Vec<&'static Metric>,
    /// Metrics whose every attempt failed.
    pub failed: Vec<&'static Metric>,
    /// Metrics that contributed no column because no data had arrived yet.
    pub skipped_leading: Vec<&'static Metric>,
}

#[derive(Debug)]
pub struct RunReport<O> {
    pub summary: MergeSummary,
    pub columns: usize,
    pub rows: usize,
    pub output: O,
}

/// Downloads every metric of `catalog` in order, one at a time, and folds each
/// series into a single table.
///
/// Failed metrics never abort the pass; they contribute an empty series.
pub async fn build_table<P>(
    provider: &P,
    catalog: MetricCatalog,
    retry_policy: &RetryPolicy,
    column_policy: ColumnPolicy,
) -> (MetricTable, MergeSummary)
where
    P: SeriesProvider + ?Sized,
{
    let mut table = MetricTable::new(column_policy, catalog.len());
    let mut summary = MergeSummary::default();

    for metric in catalog {
        let outcome = fetch_with_retry(provider, metric, retry_policy)
            .instrument(info_span!("metric", code = metric.code))
            .await;

        if outcome.is_exhausted() {
            summary.failed.push(metric);
        } else {
            summary.downloaded.push(metric);
        }

        let series = outcome.into_series();
        if table.fold(&series) == FoldOutcome::SkippedLeading {
            warn!(
                metric = metric.name,
                code = metric.code,
                "'{}' returned no rows before any other metric did; no column reserved for it",
                metric.name
            );
            summary.skipped_leading.push(metric);
        }
    }

    (table, summary)
}

/// Runs the whole job: builds the table and hands it to `sink` once.
pub async fn run_pipeline<P, S>(
    provider: &P,
    catalog: MetricCatalog,
    retry_policy: &RetryPolicy,
    column_policy: ColumnPolicy,
    sink: &S,
) -> Result<RunReport<S::Output>, Error>
where
    P: SeriesProvider + ?Sized,
    S: DataSink + ?Sized,
{
    let (table, summary) = build_table(provider, catalog, retry_policy, column_policy).await;

    let output = sink.write(&table).await?;

    info!(
        downloaded = summary.downloaded.len(),
        failed = summary.failed.len(),
        skipped_leading = summary.skipped_leading.len(),
        columns = table.width(),
        rows = table.len(),
        "Finished blockchain metrics run"
    );

    Ok(RunReport {
        summary,
        columns: table.width(),
        rows: table.len(),
        output,
    })
}
