//! Reader for the merged CSV, one [`BitcoinMetadata`] record per line.
//!
//! A line is `yyyy-MM-dd` followed by one decimal per catalog metric, in
//! catalog order. Records cover a whole day: `end_time` is the day after `time`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::metric::BITCOIN_METADATA;

/// Number of value columns following the date.
pub const COLUMN_COUNT: usize = 23;

const _: () = assert!(BITCOIN_METADATA.len() == COLUMN_COUNT);

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Expected {expected} comma-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("Invalid date {value:?}: {source}")]
    Date {
        value: String,
        source: chrono::ParseError,
    },

    #[error("Date {0} has no following day")]
    DateOutOfRange(NaiveDate),

    #[error("Invalid value {value:?} for '{metric}'")]
    Value { metric: &'static str, value: String },
}

/// One day of Bitcoin blockchain metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitcoinMetadata {
    pub time: NaiveDate,
    pub end_time: NaiveDate,
    pub difficulty: Decimal,
    pub my_wallet_number_of_users: Decimal,
    /// Average block size in MB.
    pub average_block_size: Decimal,
    pub blockchain_size: Decimal,
    pub median_transaction_confirmation_time: Decimal,
    pub miners_revenue: Decimal,
    /// Tera hashes per second.
    pub hash_rate: Decimal,
    pub cost_per_transaction: Decimal,
    pub cost_percent_of_transaction_volume: Decimal,
    pub estimated_transaction_volume_usd: Decimal,
    pub estimated_transaction_volume: Decimal,
    pub total_output_volume: Decimal,
    pub number_of_transaction_per_block: Decimal,
    pub number_of_unique_bitcoin_addresses_used: Decimal,
    pub number_of_transactions_excluding_popular_addresses: Decimal,
    pub total_number_of_transactions: Decimal,
    pub number_of_transactions: Decimal,
    pub total_transaction_fees_usd: Decimal,
    pub total_transaction_fees: Decimal,
    pub market_capitalization: Decimal,
    pub total_bitcoins: Decimal,
    pub my_wallet_number_of_transaction_per_day: Decimal,
    pub my_wallet_transaction_volume: Decimal,
}

impl BitcoinMetadata {
    /// Builds a record from values given in catalog order.
    pub fn from_values(
        time: NaiveDate,
        values: [Decimal; COLUMN_COUNT],
    ) -> Result<Self, RecordError> {
        let end_time = time
            .checked_add_days(Days::new(1))
            .ok_or(RecordError::DateOutOfRange(time))?;
        let [
            difficulty,
            my_wallet_number_of_users,
            average_block_size,
            blockchain_size,
            median_transaction_confirmation_time,
            miners_revenue,
            hash_rate,
            cost_per_transaction,
            cost_percent_of_transaction_volume,
            estimated_transaction_volume_usd,
            estimated_transaction_volume,
            total_output_volume,
            number_of_transaction_per_block,
            number_of_unique_bitcoin_addresses_used,
            number_of_transactions_excluding_popular_addresses,
            total_number_of_transactions,
            number_of_transactions,
            total_transaction_fees_usd,
            total_transaction_fees,
            market_capitalization,
            total_bitcoins,
            my_wallet_number_of_transaction_per_day,
            my_wallet_transaction_volume,
        ] = values;

        Ok(Self {
            time,
            end_time,
            difficulty,
            my_wallet_number_of_users,
            average_block_size,
            blockchain_size,
            median_transaction_confirmation_time,
            miners_revenue,
            hash_rate,
            cost_per_transaction,
            cost_percent_of_transaction_volume,
            estimated_transaction_volume_usd,
            estimated_transaction_volume,
            total_output_volume,
            number_of_transaction_per_block,
            number_of_unique_bitcoin_addresses_used,
            number_of_transactions_excluding_popular_addresses,
            total_number_of_transactions,
            number_of_transactions,
            total_transaction_fees_usd,
            total_transaction_fees,
            market_capitalization,
            total_bitcoins,
            my_wallet_number_of_transaction_per_day,
            my_wallet_transaction_volume,
        })
    }

    /// Parses one line of the merged CSV.
    pub fn parse_line(line: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(',').collect();
        if fields.len() != COLUMN_COUNT + 1 {
            return Err(RecordError::FieldCount {
                expected: COLUMN_COUNT + 1,
                found: fields.len(),
            });
        }

        let time = NaiveDate::parse_from_str(fields[0], DATE_FORMAT).map_err(|source| {
            RecordError::Date {
                value: fields[0].to_string(),
                source,
            }
        })?;

        let mut values = [Decimal::ZERO; COLUMN_COUNT];
        for ((slot, raw), metric) in values.iter_mut().zip(&fields[1..]).zip(BITCOIN_METADATA) {
            *slot = parse_decimal(raw).ok_or_else(|| RecordError::Value {
                metric: metric.name,
                value: raw.to_string(),
            })?;
        }

        Self::from_values(time, values)
    }

    /// Values in catalog order.
    pub fn values(&self) -> [Decimal; COLUMN_COUNT] {
        [
            self.difficulty,
            self.my_wallet_number_of_users,
            self.average_block_size,
            self.blockchain_size,
            self.median_transaction_confirmation_time,
            self.miners_revenue,
            self.hash_rate,
            self.cost_per_transaction,
            self.cost_percent_of_transaction_volume,
            self.estimated_transaction_volume_usd,
            self.estimated_transaction_volume,
            self.total_output_volume,
            self.number_of_transaction_per_block,
            self.number_of_unique_bitcoin_addresses_used,
            self.number_of_transactions_excluding_popular_addresses,
            self.total_number_of_transactions,
            self.number_of_transactions,
            self.total_transaction_fees_usd,
            self.total_transaction_fees,
            self.market_capitalization,
            self.total_bitcoins,
            self.my_wallet_number_of_transaction_per_day,
            self.my_wallet_transaction_volume,
        ]
    }

    /// Value of the metric with provider code `code`.
    pub fn value(&self, code: &str) -> Option<Decimal> {
        let index = BITCOIN_METADATA.iter().position(|metric| metric.code == code)?;
        Some(self.values()[index])
    }

    /// Location of a symbol's file under a data folder:
    /// `{data_folder}/alternative/blockchain/{symbol}.csv`, symbol lowercased.
    pub fn source_path(data_folder: impl AsRef<Path>, symbol: &str) -> PathBuf {
        data_folder
            .as_ref()
            .join("alternative")
            .join("blockchain")
            .join(format!("{}.csv", symbol.to_lowercase()))
    }
}

impl FromStr for BitcoinMetadata {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s)
    }
}

impl fmt::Display for BitcoinMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time.format(DATE_FORMAT))?;
        for (metric, value) in BITCOIN_METADATA.iter().zip(self.values()) {
            write!(f, ", {} {value}", metric.name)?;
        }
        Ok(())
    }
}

/// Plain decimals, with exponent notation (`1.5E+3`) as a fallback.
fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
