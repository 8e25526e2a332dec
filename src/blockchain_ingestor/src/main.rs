use anyhow::{Context, Result};
use blockchain_ingestor::{
    config::IngestorConfig,
    io::sink::CsvFileSink,
    logging::init_logging,
    models::metric::MetricCatalog,
    pipeline::run_pipeline,
    providers::nasdaq_rest::NasdaqProvider,
};
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // A missing .env file is fine; the key may come from the real environment.
    dotenvy::dotenv().ok();
    init_logging()?;

    let config = IngestorConfig::load().context("Failed to load configuration")?;
    let provider = NasdaqProvider::new(&config).context("Failed to create data provider")?;
    let sink = CsvFileSink::create(config.output_path()).context("Failed to prepare output file")?;
    info!(path = %sink.path().display(), "Writing merged metrics");

    let report = run_pipeline(
        &provider,
        MetricCatalog::bitcoin_metadata(),
        &config.retry_policy(),
        config.column_policy,
        &sink,
    )
    .await?;

    if !report.summary.failed.is_empty() {
        let failed: Vec<_> = report.summary.failed.iter().map(|m| m.name).collect();
        warn!(?failed, "Some metrics could not be downloaded");
    }
    info!(path = %report.output.display(), rows = report.rows, columns = report.columns, "Done");

    Ok(())
}
