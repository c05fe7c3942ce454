//! Batch pricing against an on-disk fixture file.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use quote_cli::app::{BatchSummary, run_batch};
use quote_cli::{AppConfig, csv_loader};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_batch.csv")
}

#[test]
fn fixture_loads_every_row() {
    let rows = csv_loader::load_from_file(&fixture_path()).expect("fixture should load");

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].label, "Acme brochure site");
    assert!(rows[1].selection.maintenance);
    assert_eq!(rows[2].selection.integrations.len(), 2);
}

#[test]
fn fixture_prices_every_row() {
    let mut out = Vec::new();

    let summary = run_batch(&fixture_path(), &AppConfig::default(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(summary, BatchSummary { priced: 3, failed: 0 });
    assert!(text.contains("$8,498"));
    assert!(text.contains("$10,198"));
    // (17999 + 1499 + 2199 + 1499 + 2999) × 2 = 52390
    assert!(text.contains("$52,390"));
    assert!(text.contains("3 priced, 0 skipped"));
}

#[test]
fn fixture_uses_legacy_prices_when_configured() {
    let mut config = AppConfig::default();
    config.calculator.variant = quote_core::Variant::Legacy;
    let mut out = Vec::new();

    run_batch(&fixture_path(), &config, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    // 5000 + 1200
    assert!(text.contains("$6,200"));
}
