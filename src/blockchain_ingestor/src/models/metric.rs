//! The fixed catalog of blockchain metrics published in the `QDL/BCHAIN` datatable.

/// A single named metric and the provider code used to request it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    /// Human-readable metric name (e.g., "Difficulty").
    pub name: &'static str,
    /// Provider code for the metric (e.g., "DIFF").
    pub code: &'static str,
}

impl Metric {
    pub const fn new(name: &'static str, code: &'static str) -> Self {
        Self { name, code }
    }
}

/// An ordered, read-only list of metrics.
///
/// The order of the catalog is the column order of the merged output, so it
/// is never sorted or otherwise rearranged.
#[derive(Debug, Clone, Copy)]
pub struct MetricCatalog {
    metrics: &'static [Metric],
}

impl MetricCatalog {
    pub const fn new(metrics: &'static [Metric]) -> Self {
        Self { metrics }
    }

    /// The Bitcoin metadata catalog.
    pub const fn bitcoin_metadata() -> Self {
        Self::new(BITCOIN_METADATA)
    }

    pub fn iter(&self) -> std::slice::Iter<'static, Metric> {
        self.metrics.iter()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl IntoIterator for MetricCatalog {
    type Item = &'static Metric;
    type IntoIter = std::slice::Iter<'static, Metric>;

    fn into_iter(self) -> Self::IntoIter {
        self.metrics.iter()
    }
}

impl Default for MetricCatalog {
    fn default() -> Self {
        Self::bitcoin_metadata()
    }
}

pub const BITCOIN_METADATA: &[Metric] = &[
    Metric::new("Difficulty", "DIFF"),
    Metric::new("My Wallet Number of Users", "MWNUS"),
    Metric::new("Average Block Size", "AVBLS"),
    Metric::new("Blockchain Size", "BLCHS"),
    Metric::new("Median Transaction Confirmation Time", "ATRCT"),
    Metric::new("Miners Revenue", "MIREV"),
    Metric::new("Hash Rate", "HRATE"),
    Metric::new("Cost Per Transaction", "CPTRA"),
    Metric::new("Cost Percent of Transaction Volume", "CPTRV"),
    Metric::new("Estimated Transaction Volume USD", "ETRVU"),
    Metric::new("Estimated Transaction Volume", "ETRAV"),
    Metric::new("Total Output Volume", "TOUTV"),
    Metric::new("Number of Transaction per Block", "NTRBL"),
    Metric::new("Number of Unique Bitcoin Addresses Used", "NADDU"),
    Metric::new("Number of Transactions Excluding Popular Addresses", "NTREP"),
    Metric::new("Total Number of Transactions", "NTRAT"),
    Metric::new("Number of Transactions", "NTRAN"),
    Metric::new("Total Transaction Fees USD", "TRFUS"),
    Metric::new("Total Transaction Fees", "TRFEE"),
    Metric::new("Market Capitalization", "MKTCP"),
    Metric::new("Total Bitcoins", "TOTBC"),
    Metric::new("My Wallet Number of Transaction Per Day", "MWNTD"),
    Metric::new("My Wallet Transaction Volume", "MWTRV"),
];
