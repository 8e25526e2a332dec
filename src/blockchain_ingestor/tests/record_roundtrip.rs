mod common;

use std::str::FromStr;

use blockchain_ingestor::{
    io::sink::write_table,
    merge::{ColumnPolicy, MetricTable},
    models::{
        metric::BITCOIN_METADATA,
        record::{BitcoinMetadata, COLUMN_COUNT, RecordError},
        series::Series,
    },
};
use chrono::NaiveDate;
use common::series;
use rust_decimal::Decimal;

fn written_lines(table: &MetricTable) -> Vec<String> {
    let mut buffer = Vec::new();
    write_table(table, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap().lines().map(str::to_string).collect()
}

/// Metric `i` (1-based) reports `i` on the first day and `i.5` on the second,
/// except the hash rate, which has no second-day value.
fn full_catalog_table() -> MetricTable {
    let mut table = MetricTable::new(ColumnPolicy::SkipLeading, BITCOIN_METADATA.len());
    for (index, metric) in BITCOIN_METADATA.iter().enumerate() {
        let first = (index + 1).to_string();
        let second = format!("{}.5", index + 1);
        let series = if metric.code == "HRATE" {
            series(&[("2020-01-01", first.as_str())])
        } else {
            series(&[("2020-01-01", first.as_str()), ("2020-01-02", second.as_str())])
        };
        table.fold(&series);
    }
    table
}

#[test]
fn every_written_line_parses_into_a_record() {
    let lines = written_lines(&full_catalog_table());
    assert_eq!(lines.len(), 2);

    let records: Vec<BitcoinMetadata> = lines
        .iter()
        .map(|line| BitcoinMetadata::parse_line(line).unwrap())
        .collect();

    let first = &records[0];
    assert_eq!(first.time, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    assert_eq!(first.end_time, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
    let expected: Vec<Decimal> = (1..=COLUMN_COUNT as i64).map(Decimal::from).collect();
    assert_eq!(first.values().to_vec(), expected);

    let second = &records[1];
    assert_eq!(second.difficulty, Decimal::from_str("1.5").unwrap());
    assert_eq!(second.hash_rate, Decimal::ZERO);
    assert_eq!(second.value("MWTRV"), Some(Decimal::from_str("23.5").unwrap()));
}

#[test]
fn record_values_follow_catalog_order() {
    let lines = written_lines(&full_catalog_table());
    let record = BitcoinMetadata::parse_line(&lines[0]).unwrap();

    for (index, metric) in BITCOIN_METADATA.iter().enumerate() {
        assert_eq!(record.value(metric.code), Some(Decimal::from(index as i64 + 1)));
    }
}

#[test]
fn skipped_leading_metric_produces_unreadable_lines() {
    let mut table = MetricTable::new(ColumnPolicy::SkipLeading, BITCOIN_METADATA.len());
    table.fold(&Series::new());
    for _ in 1..BITCOIN_METADATA.len() {
        table.fold(&series(&[("2020-01-01", "1")]));
    }

    let lines = written_lines(&table);
    let err = BitcoinMetadata::parse_line(&lines[0]).unwrap_err();

    assert!(matches!(err, RecordError::FieldCount { expected: 24, found: 23 }));
}

#[test]
fn placeholder_policy_keeps_lines_readable() {
    let mut table = MetricTable::new(ColumnPolicy::Placeholder, BITCOIN_METADATA.len());
    table.fold(&Series::new());
    for _ in 1..BITCOIN_METADATA.len() {
        table.fold(&series(&[("2020-01-01", "1")]));
    }

    let lines = written_lines(&table);
    let record = BitcoinMetadata::parse_line(&lines[0]).unwrap();

    assert_eq!(record.difficulty, Decimal::ZERO);
    assert_eq!(record.my_wallet_transaction_volume, Decimal::ONE);
}
