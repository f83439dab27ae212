//! 청산일 기준 시계열 생성 모듈
//!
//! 차트 컴포넌트가 사용하는 시계열을 생성합니다.
//!
//! # 제공 시계열
//!
//! - 누적 손익 곡선
//! - 계좌 잔고 곡선 ("Start" 기준점 포함)
//! - 월별 순손익
//! - 최근 30일 일별 순손익 (빈 날 없이 31개 행)
//!
//! 모든 생성기는 같은 순서로 동작합니다: 청산일을 정규화할 수 있는 거래만 남기고,
//! 청산일 오름차순으로 정렬한 뒤, 순서대로 누적합니다.
//! 같은 날짜의 거래는 입력 순서를 유지합니다.

use chrono::Datelike;
use journal_core::{CanonicalDate, TradeRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// 최근 N일 윈도우 길이 (기준일 포함 `LAST_30_DAYS_SPAN + 1`일).
pub const LAST_30_DAYS_SPAN: i64 = 30;

/// 잔고 곡선 시작점 레이블.
const START_LABEL: &str = "Start";

/// 누적 손익 곡선의 한 점
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    /// 청산일
    pub date: CanonicalDate,

    /// 이 거래까지의 누적 손익
    pub cumulative: Decimal,

    /// 이 거래의 손익
    pub profit: Decimal,
}

/// 잔고 곡선 X축 키
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BalanceKey {
    /// 첫 거래 이전 기준점
    Start,
    /// 청산일
    Date(CanonicalDate),
}

impl fmt::Display for BalanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceKey::Start => f.write_str(START_LABEL),
            BalanceKey::Date(date) => write!(f, "{}", date),
        }
    }
}

impl Serialize for BalanceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 계좌 잔고 곡선의 한 점
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalancePoint {
    /// X축 키 ("Start" 또는 청산일)
    pub date: BalanceKey,

    /// 이 시점의 잔고
    pub balance: Decimal,

    /// 거래 번호 (Start = 0)
    pub trade_num: usize,
}

/// 월별 순손익
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPnl {
    /// 연도
    pub year: i32,

    /// 월 (1-12)
    pub month: u32,

    /// 차트 레이블 (예: "Jan 2024")
    pub label: String,

    /// 순손익 (부호 있음)
    pub net_pnl: Decimal,

    /// 거래 수
    pub trade_count: usize,
}

/// 일별 순손익
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPnl {
    /// 날짜
    pub date: CanonicalDate,

    /// 순손익, 거래가 없으면 0
    pub net_pnl: Decimal,

    /// 거래 수
    pub trade_count: usize,
}

impl DailyPnl {
    fn empty(date: CanonicalDate) -> Self {
        Self {
            date,
            net_pnl: Decimal::ZERO,
            trade_count: 0,
        }
    }
}

/// 청산일이 유효한 거래만 골라 청산일 오름차순으로 정렬합니다.
///
/// 안정 정렬이므로 같은 날짜의 거래는 입력 순서를 유지합니다.
pub(crate) fn chronological<T: TradeRecord>(trades: &[T]) -> Vec<(CanonicalDate, &T)> {
    let mut dated: Vec<(CanonicalDate, &T)> = trades
        .iter()
        .filter_map(|trade| trade.exit_key().map(|date| (date, trade)))
        .collect();
    dated.sort_by_key(|(date, _)| *date);
    dated
}

/// 누적 손익 곡선을 생성합니다.
///
/// 거래 하나당 한 점. 유효한 청산일이 없으면 빈 벡터.
pub fn generate_cumulative_profit_data<T: TradeRecord>(trades: &[T]) -> Vec<CumulativePoint> {
    let mut cumulative = Decimal::ZERO;

    chronological(trades)
        .into_iter()
        .map(|(date, trade)| {
            let profit = trade.profit();
            cumulative = cumulative.saturating_add(profit);
            CumulativePoint {
                date,
                cumulative,
                profit,
            }
        })
        .collect()
}

/// 계좌 잔고 곡선을 생성합니다.
///
/// 첫 점은 항상 `{ date: "Start", balance: starting_balance, trade_num: 0 }`이므로
/// 거래가 없어도 최소 한 점을 반환합니다.
pub fn generate_account_balance_data<T: TradeRecord>(
    trades: &[T],
    starting_balance: Decimal,
) -> Vec<BalancePoint> {
    let dated = chronological(trades);
    let mut points = Vec::with_capacity(dated.len() + 1);
    points.push(BalancePoint {
        date: BalanceKey::Start,
        balance: starting_balance,
        trade_num: 0,
    });

    let mut balance = starting_balance;
    for (index, (date, trade)) in dated.into_iter().enumerate() {
        balance = balance.saturating_add(trade.profit());
        points.push(BalancePoint {
            date: BalanceKey::Date(date),
            balance,
            trade_num: index + 1,
        });
    }

    points
}

/// 월별 순손익을 생성합니다.
///
/// 결과는 입력 순서와 무관하게 (연, 월) 오름차순입니다.
pub fn generate_monthly_net_pnl_data<T: TradeRecord>(trades: &[T]) -> Vec<MonthlyPnl> {
    let mut buckets: BTreeMap<(i32, u32), MonthlyPnl> = BTreeMap::new();

    for (date, trade) in chronological(trades) {
        let day = date.date();
        let bucket = buckets
            .entry((day.year(), day.month()))
            .or_insert_with(|| MonthlyPnl {
                year: day.year(),
                month: day.month(),
                label: day.format("%b %Y").to_string(),
                net_pnl: Decimal::ZERO,
                trade_count: 0,
            });
        bucket.net_pnl = bucket.net_pnl.saturating_add(trade.profit());
        bucket.trade_count += 1;
    }

    buckets.into_values().collect()
}

/// 최근 30일 일별 순손익을 생성합니다.
///
/// 기준일은 "오늘"이 아니라 입력에서 가장 늦은 유효 청산일입니다.
/// 기준일을 포함해 31일의 모든 날짜를 반환하며 거래가 없는 날은 0입니다.
/// 유효한 청산일이 없으면 빈 벡터.
pub fn generate_last_30_days_net_pnl_data<T: TradeRecord>(trades: &[T]) -> Vec<DailyPnl> {
    let dated = chronological(trades);
    let Some(anchor) = dated.last().map(|(date, _)| *date) else {
        return Vec::new();
    };

    let mut days: BTreeMap<CanonicalDate, DailyPnl> = (0..=LAST_30_DAYS_SPAN)
        .filter_map(|back| anchor.offset_days(-back))
        .map(|date| (date, DailyPnl::empty(date)))
        .collect();

    for (date, trade) in dated {
        if let Some(day) = days.get_mut(&date) {
            day.net_pnl = day.net_pnl.saturating_add(trade.profit());
            day.trade_count += 1;
        }
    }

    days.into_values().collect()
}
