use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use snafu::{Backtrace, ResultExt, Snafu};
use tracing::info;

use crate::merge::MetricTable;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// The output directory could not be created.
    #[snafu(display("Failed to create output directory {}: {source}", path.display()))]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// A generic I/O error.
    #[snafu(display("I/O error on {}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// An error occurred while encoding a row.
    #[snafu(display("Failed to write CSV row: {source}"))]
    Csv {
        source: csv::Error,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait DataSink {
    /// The type of output returned after a successful write operation.
    ///
    /// A file sink returns the path it wrote; other sinks may return a row count.
    type Output;

    /// Writes the merged table to the destination.
    async fn write(&self, table: &MetricTable) -> Result<Self::Output, SinkError>;
}

/// Writes `date,field1,field2,...` lines without a header, in table order.
///
/// Returns the number of rows written.
pub fn write_table<W: Write>(table: &MetricTable, writer: W) -> Result<usize, SinkError> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    let mut written = 0;
    for (date, fields) in table.rows() {
        let record = std::iter::once(date).chain(fields.iter().map(String::as_str));
        csv_writer.write_record(record).context(CsvSnafu)?;
        written += 1;
    }

    csv_writer
        .flush()
        .map_err(csv::Error::from)
        .context(CsvSnafu)?;
    Ok(written)
}

/// A CSV file sink. The file is replaced on every run.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Like [`CsvFileSink::new`], but creates the parent directory up front so
    /// an unwritable destination fails before anything is downloaded.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let sink = Self::new(path);
        sink.ensure_parent_dir()?;
        Ok(sink)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<(), SinkError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).context(CreateDirSnafu { path: dir })?;
        }
        Ok(())
    }
}

#[async_trait]
impl DataSink for CsvFileSink {
    type Output = PathBuf;

    async fn write(&self, table: &MetricTable) -> Result<PathBuf, SinkError> {
        self.ensure_parent_dir()?;

        let file = File::create(&self.path).context(IoSnafu { path: &self.path })?;
        let rows = write_table(table, BufWriter::new(file))?;

        info!(path = %self.path.display(), rows, columns = table.width(), "Wrote merged metrics");
        Ok(self.path.clone())
    }
}
