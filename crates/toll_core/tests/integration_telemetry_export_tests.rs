mod support;

use std::fs::File;
use std::path::Path;

use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use toll_core::ledger::Account;
use toll_core::telemetry::SimTelemetry;
use toll_core::telemetry_export::{write_notices_parquet, write_payments_parquet};
use toll_core::test_helpers::{parked_vehicle, test_vehicle};

use support::schedule::ScheduleRunner;
use support::world::TestWorldBuilder;

fn parquet_field_specs(path: &Path) -> Vec<(String, bool)> {
    let file = File::open(path).expect("parquet file should exist");
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).expect("parquet reader should build");
    builder
        .schema()
        .fields()
        .iter()
        .map(|field| (field.name().to_string(), field.is_nullable()))
        .collect()
}

fn parquet_row_count(path: &Path) -> usize {
    let file = File::open(path).expect("parquet file should exist");
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .expect("parquet reader should build")
        .build()
        .expect("reader");
    reader
        .map(|batch| batch.expect("batch").num_rows())
        .sum()
}

#[test]
fn payments_and_notices_export_to_parquet() {
    let mut world = TestWorldBuilder::new()
        .with_vehicle(test_vehicle("moving", 0.2))
        .with_vehicle(parked_vehicle("parked"))
        .with_covering_zone()
        .with_section("slow", 5.0)
        .build();
    ScheduleRunner::new().run_full(&mut world);

    let dir = tempfile::tempdir().expect("tempdir");
    let payments_path = dir.path().join("payments.parquet");
    let notices_path = dir.path().join("notices.parquet");

    let account = world.resource::<Account>();
    write_payments_parquet(&payments_path, account).expect("write payments");
    assert_eq!(parquet_row_count(&payments_path), account.payment_count());
    assert_eq!(
        parquet_field_specs(&payments_path),
        vec![
            ("seq".to_string(), false),
            ("tick".to_string(), true),
            ("vehicle".to_string(), true),
            ("vendor".to_string(), false),
            ("amount".to_string(), false),
        ]
    );

    let telemetry = world.resource::<SimTelemetry>();
    write_notices_parquet(&notices_path, telemetry).expect("write notices");
    assert_eq!(parquet_row_count(&notices_path), telemetry.notices.len());
    let fields = parquet_field_specs(&notices_path);
    assert_eq!(fields.len(), 11);
    assert_eq!(fields[0], ("tick".to_string(), false));
    assert_eq!(fields[3], ("zone".to_string(), true));
}

#[test]
fn empty_logs_export_header_only_files() {
    let world = TestWorldBuilder::new().build();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("payments.parquet");

    write_payments_parquet(&path, world.resource::<Account>()).expect("write");
    assert_eq!(parquet_row_count(&path), 0);
}
