//! 분석 엔진 통합 테스트
//!
//! 백엔드 행(JSON)에서 시작해 대시보드 전체를 계산하고,
//! 직접 구현한 `TradeRecord` 타입으로도 같은 결과가 나오는지 확인합니다.

use journal_analytics::{
    calculate_balance_at_date, calculate_metrics, calculate_trade_batches,
    generate_account_balance_data, generate_batch_comparison_data,
    generate_cumulative_profit_data, BalanceKey, Dashboard, TradeFilter,
};
use journal_core::{
    newest_first, normalize_str, sort_newest_first, CanonicalDate, DateInput, PositionType,
    TagId, Trade, TradeId, TradeMap, TradeRecord, TradeResult,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 최소 필드만 가진 테스트용 거래
#[derive(Debug, Clone)]
struct LedgerRow {
    id: TradeId,
    profit: Decimal,
    exit: DateInput,
}

impl LedgerRow {
    fn new(id: TradeId, exit: &str, profit: Decimal) -> Self {
        Self {
            id,
            profit,
            exit: DateInput::from(exit),
        }
    }
}

impl TradeRecord for LedgerRow {
    fn id(&self) -> TradeId {
        self.id
    }

    fn symbol(&self) -> &str {
        "SPY"
    }

    fn position_type(&self) -> PositionType {
        PositionType::Call
    }

    fn profit(&self) -> Decimal {
        self.profit
    }

    fn exit_date(&self) -> &DateInput {
        &self.exit
    }

    fn result(&self) -> Option<TradeResult> {
        None
    }

    fn has_tag(&self, _tag: TagId) -> bool {
        false
    }
}

fn date(raw: &str) -> CanonicalDate {
    normalize_str(raw).unwrap()
}

const BACKEND_ROWS: &str = r##"{
    "1": {
        "id": 1, "symbol": "SPY", "position_type": 1,
        "entry_price": "1.00", "exit_price": "2.00", "quantity": 1,
        "entry_date": "2024-01-01", "exit_date": "2024-01-01T14:30:00Z",
        "profit": "100", "result": 1,
        "tags": [{ "id": 7, "name": "breakout", "color": "#22c55e" }]
    },
    "2": {
        "id": 2, "symbol": "QQQ", "position_type": 2,
        "entry_price": "3.00", "exit_price": "2.60", "quantity": 1,
        "entry_date": "2024-01-04", "exit_date": "2024-01-05",
        "profit": "-40", "result": 0
    },
    "3": {
        "id": 3, "symbol": "IWM", "position_type": 1,
        "entry_price": "1.00", "exit_price": "1.00", "quantity": 2,
        "entry_date": "2024-01-06", "exit_date": null,
        "profit": "0"
    }
}"##;

#[test]
fn test_dashboard_from_backend_rows() {
    let map: TradeMap = serde_json::from_str(BACKEND_ROWS).unwrap();
    let ordered = newest_first(&map);

    // 청산일 없는 거래는 맨 뒤
    let ids: Vec<TradeId> = ordered.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 1, 3]);

    let dashboard = Dashboard::build(&ordered, dec!(1000));

    assert_eq!(dashboard.metrics.total_trades, 3);
    assert_eq!(dashboard.metrics.winning_trades, 1);
    assert_eq!(dashboard.metrics.losing_trades, 1);
    assert_eq!(dashboard.metrics.total_profit, dec!(60));
    assert_eq!(dashboard.metrics.current_balance, dec!(1060));

    // 청산일 없는 거래는 시계열에서 빠짐
    assert_eq!(dashboard.cumulative_profit.len(), 2);
    assert_eq!(dashboard.cumulative_profit[0].date, date("2024-01-01"));
    assert_eq!(dashboard.cumulative_profit[1].cumulative, dec!(60));

    assert_eq!(dashboard.result_tally.marked_wins, 1);
    assert_eq!(dashboard.result_tally.marked_losses, 1);
    assert_eq!(dashboard.result_tally.unmarked, 1);

    assert!(dashboard.comparison.is_baseline);
    assert_eq!(dashboard.comparison.points.len(), 3);
}

#[test]
fn test_dashboard_serializes_chart_shapes() {
    let map: TradeMap = serde_json::from_str(BACKEND_ROWS).unwrap();
    let ordered = newest_first(&map);
    let dashboard = Dashboard::build(&ordered, dec!(1000));

    let json = serde_json::to_value(&dashboard).unwrap();

    assert_eq!(json["account_balance"][0]["date"], "Start");
    assert_eq!(json["account_balance"][1]["date"], "2024-01-01");
    assert_eq!(json["monthly_pnl"][0]["label"], "Jan 2024");
    assert_eq!(json["last_30_days"].as_array().unwrap().len(), 31);
}

#[test]
fn test_filter_by_tag_then_build() {
    let map: TradeMap = serde_json::from_str(BACKEND_ROWS).unwrap();
    let trades: Vec<Trade> = map.into_values().collect();

    let filter = TradeFilter::new().with_tag(7);
    let dashboard = Dashboard::build_filtered(&trades, dec!(1000), &filter);

    assert_eq!(dashboard.metrics.total_trades, 1);
    assert_eq!(dashboard.metrics.current_balance, dec!(1100));
}

#[test]
fn test_custom_record_type_matches_trade() {
    let rows = vec![
        LedgerRow::new(1, "2024-01-01", dec!(100)),
        LedgerRow::new(2, "2024-01-05", dec!(-40)),
    ];

    let metrics = calculate_metrics(&rows, dec!(1000));
    assert_eq!(metrics.win_rate, dec!(50));
    assert_eq!(metrics.current_balance, dec!(1060));

    let balance = generate_account_balance_data(&rows, dec!(1000));
    let keys: Vec<BalanceKey> = balance.iter().map(|p| p.date).collect();
    assert_eq!(
        keys,
        vec![
            BalanceKey::Start,
            BalanceKey::Date(date("2024-01-01")),
            BalanceKey::Date(date("2024-01-05")),
        ]
    );
    assert_eq!(balance[2].balance, dec!(1060));
}

#[test]
fn test_balance_at_window_start_matches_cumulative() {
    let rows = vec![
        LedgerRow::new(1, "2024-03-01", dec!(15)),
        LedgerRow::new(2, "2024-03-02", dec!(25)),
        LedgerRow::new(3, "2024-03-03", dec!(-5)),
    ];
    let target = DateInput::from("2024-03-03");

    let at_start = calculate_balance_at_date(&rows, dec!(100), Some(&target));
    let cumulative = generate_cumulative_profit_data(&rows);

    // 3월 3일 이전까지의 누적 = 두 번째 점
    assert_eq!(at_start, dec!(100) + cumulative[1].cumulative);
}

#[test]
fn test_twenty_three_trades_batch_walkthrough() {
    let mut rows: Vec<LedgerRow> = (1..=23)
        .map(|i| LedgerRow::new(i, &format!("2024-05-{:02}", i), Decimal::from(i)))
        .collect();
    sort_newest_first(&mut rows);

    let batches = calculate_trade_batches(&rows);

    let current: Vec<TradeId> = batches.current.iter().map(|r| r.id).collect();
    let previous: Vec<TradeId> = batches.previous.iter().map(|r| r.id).collect();
    assert_eq!(current, vec![23, 22, 21]);
    assert_eq!(previous, (11..=20).rev().collect::<Vec<TradeId>>());

    let points = generate_batch_comparison_data(batches.current, batches.previous);
    assert_eq!(points.len(), 10);

    // 시간순: 21, 22, 23
    assert_eq!(points[0].current_value, Some(dec!(21)));
    assert_eq!(points[2].current_value, Some(dec!(66)));
    assert_eq!(points[3].current_value, None);
    assert_eq!(points[9].current_cumulative, dec!(66));

    // 시간순: 11..=20
    assert_eq!(points[0].previous_value, Some(dec!(11)));
    assert_eq!(points[9].previous_value, Some(dec!(155)));
}
