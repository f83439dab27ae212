//! 파일 로드부터 리포트 렌더링까지의 통합 테스트

use journal_analytics::TradeFilter;
use journal_cli::{load_trades, render, FilterOptions, Report};
use journal_core::JournalError;
use rust_decimal_macros::dec;
use std::path::PathBuf;

fn write_export(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "journal-cli-{}-{}.json",
        std::process::id(),
        name
    ));
    std::fs::write(&path, body).unwrap();
    path
}

/// 12건: 1월 1일 ~ 1월 12일, 손익 = ID × 10, 짝수 ID는 PUT
fn twelve_trades() -> String {
    let rows: Vec<String> = (1..=12)
        .map(|id| {
            format!(
                r#"{{"id": {id}, "symbol": "SPY", "position_type": {pt}, "entry_price": "1",
                    "exit_price": "1", "quantity": 1, "exit_date": "2024-01-{id:02}",
                    "profit": "{profit}"}}"#,
                id = id,
                pt = if id % 2 == 0 { 2 } else { 1 },
                profit = id * 10,
            )
        })
        .collect();
    format!("[{}]", rows.join(","))
}

#[test]
fn test_compare_report_from_file() {
    let path = write_export("compare", &twelve_trades());
    let trades = load_trades(&path, 100).unwrap();

    let value = render(&Report::Compare, &trades, dec!(0), &TradeFilter::new()).unwrap();

    // 12건 → 현재 2건(11, 12), 이전 10건(1..=10)
    assert_eq!(value["is_baseline"], false);
    assert_eq!(value["current"]["total_trades"], 2);
    assert_eq!(value["previous"]["total_trades"], 10);

    let points = value["points"].as_array().unwrap();
    assert_eq!(points.len(), 10);
    assert_eq!(points[0]["current_value"], "110");
    assert_eq!(points[1]["current_value"], "230");
    assert!(points[2]["current_value"].is_null());
    assert_eq!(points[9]["previous_value"], "550");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_dashboard_report_with_position_filter() {
    let path = write_export("dashboard", &twelve_trades());
    let trades = load_trades(&path, 100).unwrap();
    let filter = FilterOptions {
        position: Some("PUT".to_string()),
        ..Default::default()
    }
    .into_filter()
    .unwrap();

    let value = render(&Report::Dashboard, &trades, dec!(1000), &filter).unwrap();

    // 짝수 ID 6건: 20 + 40 + ... + 120 = 420
    assert_eq!(value["metrics"]["total_trades"], 6);
    assert_eq!(value["metrics"]["current_balance"], "1420");
    assert_eq!(value["comparison"]["is_baseline"], true);
    assert_eq!(value["account_balance"].as_array().unwrap().len(), 7);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("journal-cli-does-not-exist.json");

    let err = load_trades(&path, 100).unwrap_err();
    assert!(matches!(err, JournalError::Io(_)));
}
