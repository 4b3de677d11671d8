//! Integration tests for tally-core
//!
//! These tests exercise the full store → normalize → aggregate → fit →
//! forecast workflow against a real ledger file.

use std::fs;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::{
    aggregate, forecast, normalize, CsvRecordStore, DailyTotal, Error, ForecastPoint, Ledger,
    RawRecord, RecordStore, TrendModel,
};
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn temp_ledger() -> (TempDir, Ledger<CsvRecordStore>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store =
        CsvRecordStore::open(dir.path().join("expense.csv")).expect("Failed to open ledger");
    (dir, Ledger::new(store))
}

/// Ledger file as the original tracker would have left it, including a
/// hand-edited row with a bad amount and one with an impossible date
fn legacy_ledger_csv() -> &'static str {
    r#"date,category,amount,notes
01/01/2024,Groceries,10,
02/01/2024,Transport,12.50,"bus, return"
02/01/2024,Coffee,7.5,
03/01/2024,Dining,abc,typo
31/02/2024,Rent,900,bad date
"#
}

// =============================================================================
// Pipeline Scenarios
// =============================================================================

#[test]
fn test_two_day_scenario() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add(&RawRecord::new("01/01/2024", "Food", "10", ""))
        .unwrap();
    ledger
        .add(&RawRecord::new("02/01/2024", "Food", "20", ""))
        .unwrap();

    let records = ledger.store().read_all().unwrap();
    let entries = normalize(&records);
    let daily = aggregate(&entries).unwrap();
    assert_eq!(
        daily,
        vec![
            DailyTotal {
                date: date(2024, 1, 1),
                amount: Decimal::new(10, 0),
                day_index: 0,
            },
            DailyTotal {
                date: date(2024, 1, 2),
                amount: Decimal::new(20, 0),
                day_index: 1,
            },
        ]
    );

    let model = TrendModel::fit(&daily).unwrap();
    assert_eq!(model.slope, 10.0);
    assert_eq!(model.intercept, 10.0);

    let points = forecast(&daily, &model, 1).unwrap();
    assert_eq!(
        points,
        vec![ForecastPoint {
            date: date(2024, 1, 3),
            predicted_amount: Decimal::new(3000, 2),
        }]
    );
}

#[test]
fn test_single_day_scenario() {
    let (_dir, ledger) = temp_ledger();
    for amount in ["4", "6.25"] {
        ledger
            .add(&RawRecord::new("15/03/2024", "Lunch", amount, ""))
            .unwrap();
    }

    assert!(matches!(
        ledger.predict(7),
        Err(Error::InsufficientData { days: 1 })
    ));

    let report = ledger.view().unwrap();
    assert_eq!(report.daily.len(), 1);
    assert_eq!(report.total, Decimal::new(1025, 2));
}

#[test]
fn test_bad_amount_excluded_everywhere() {
    let (dir, _) = temp_ledger();
    let path = dir.path().join("expense.csv");
    fs::write(&path, legacy_ledger_csv()).unwrap();
    let ledger = Ledger::new(CsvRecordStore::open(&path).unwrap());

    let report = ledger.view().unwrap();
    assert_eq!(report.entries.len(), 3);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.total, Decimal::new(3000, 2));
    assert!(report.entries.iter().all(|e| e.category != "Dining"));

    let forecast = ledger.predict(1).unwrap();
    assert_eq!(forecast.observed_days, 2);
    assert_eq!(forecast.skipped, 2);
    // (0, 10) and (1, 20) -> 30 on 03/01/2024
    assert_eq!(forecast.points[0].date, date(2024, 1, 3));
    assert_eq!(forecast.points[0].predicted_amount, Decimal::new(30, 0));
}

#[test]
fn test_negative_trend_clamps_to_zero() {
    let (_dir, ledger) = temp_ledger();
    for (d, amount) in [("01/05/2024", "100"), ("02/05/2024", "60"), ("03/05/2024", "20")] {
        ledger.add(&RawRecord::new(d, "Misc", amount, "")).unwrap();
    }

    let report = ledger.predict(10).unwrap();
    assert!(report.model.slope < 0.0);
    assert_eq!(report.points.len(), 10);
    assert!(report
        .points
        .iter()
        .all(|p| p.predicted_amount >= Decimal::ZERO));
    assert_eq!(report.points[9].predicted_amount, Decimal::ZERO);
}

#[test]
fn test_empty_ledger() {
    let (_dir, ledger) = temp_ledger();
    assert!(matches!(ledger.view(), Err(Error::NoData)));
    assert!(matches!(ledger.predict(5), Err(Error::NoData)));
}

// =============================================================================
// Modeling Behavior
// =============================================================================

#[test]
fn test_gaps_are_not_zero_filled() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add(&RawRecord::new("01/01/2024", "Misc", "10", ""))
        .unwrap();
    ledger
        .add(&RawRecord::new("11/01/2024", "Misc", "20", ""))
        .unwrap();

    let report = ledger.predict(2).unwrap();
    // Fit through (0, 10) and (10, 20): one unit per day
    assert!((report.model.slope - 1.0).abs() < 1e-12);
    assert_eq!(report.last_observed, date(2024, 1, 11));
    assert_eq!(report.points[0].date, date(2024, 1, 12));
    assert_eq!(report.points[0].predicted_amount, Decimal::new(21, 0));
    assert_eq!(report.points[1].predicted_amount, Decimal::new(22, 0));
}

#[test]
fn test_forecast_spans_year_end() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add(&RawRecord::new("30/12/2023", "Misc", "1", ""))
        .unwrap();
    ledger
        .add(&RawRecord::new("31/12/2023", "Misc", "1", ""))
        .unwrap();

    let report = ledger.predict(2).unwrap();
    let dates: Vec<NaiveDate> = report.points.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 2)]);
}

#[test]
fn test_reports_serialize_to_json() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add(&RawRecord::new("01/01/2024", "Food", "10", ""))
        .unwrap();
    ledger
        .add(&RawRecord::new("02/01/2024", "Food", "20", ""))
        .unwrap();

    let json = serde_json::to_value(ledger.predict(1).unwrap()).unwrap();
    assert_eq!(json["points"][0]["date"], "2024-01-03");
    assert_eq!(json["model"]["slope"], 10.0);

    let json = serde_json::to_value(ledger.view().unwrap()).unwrap();
    assert_eq!(json["entries"].as_array().unwrap().len(), 2);
}
