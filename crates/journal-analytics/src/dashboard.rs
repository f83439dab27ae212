//! 대시보드 일괄 계산.
//!
//! 한 거래 집합과 시작 잔고에 대해 대시보드가 그리는 모든 파생 데이터를
//! 한 번에 계산합니다. 필터가 있으면 기간 시작일의 잔고를 시작 잔고로 사용합니다.

use journal_core::{sort_newest_first, DateInput, TradeRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::balance::calculate_balance_at_date;
use crate::comparison::BatchComparison;
use crate::filter::TradeFilter;
use crate::metrics::{calculate_metrics, tally_results, Metrics, ResultTally};
use crate::series::{
    generate_account_balance_data, generate_cumulative_profit_data,
    generate_last_30_days_net_pnl_data, generate_monthly_net_pnl_data, BalancePoint,
    CumulativePoint, DailyPnl, MonthlyPnl,
};

/// 대시보드 전체 데이터
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// 요약 지표
    pub metrics: Metrics,

    /// 결과 표시 집계
    pub result_tally: ResultTally,

    /// 누적 손익 곡선
    pub cumulative_profit: Vec<CumulativePoint>,

    /// 계좌 잔고 곡선
    pub account_balance: Vec<BalancePoint>,

    /// 월별 순손익
    pub monthly_pnl: Vec<MonthlyPnl>,

    /// 최근 30일 일별 순손익
    pub last_30_days: Vec<DailyPnl>,

    /// 최근 배치 vs 이전 배치
    pub comparison: BatchComparison,
}

impl Dashboard {
    /// 거래 목록과 시작 잔고로 대시보드를 계산합니다.
    ///
    /// 입력 순서는 상관없습니다. 배치 비교용 최신순 정렬은 내부에서 수행합니다.
    pub fn build<T: TradeRecord>(trades: &[T], starting_balance: Decimal) -> Self {
        let mut newest_first: Vec<&T> = trades.iter().collect();
        sort_newest_first(&mut newest_first);

        debug!(trades = trades.len(), %starting_balance, "대시보드 계산");

        Self {
            metrics: calculate_metrics(trades, starting_balance),
            result_tally: tally_results(trades),
            cumulative_profit: generate_cumulative_profit_data(trades),
            account_balance: generate_account_balance_data(trades, starting_balance),
            monthly_pnl: generate_monthly_net_pnl_data(trades),
            last_30_days: generate_last_30_days_net_pnl_data(trades),
            comparison: BatchComparison::from_newest_first(&newest_first),
        }
    }

    /// 필터를 적용한 대시보드를 계산합니다.
    ///
    /// 시작 잔고는 [`Dashboard::balance_at`]으로 필터 시작일 시점의 잔고를
    /// 전체 거래로 재구성한 값입니다.
    pub fn build_filtered<T: TradeRecord>(
        trades: &[T],
        starting_balance: Decimal,
        filter: &TradeFilter,
    ) -> Self {
        let window_start = Self::balance_at(trades, starting_balance, filter);
        let filtered = filter.apply(trades);
        Self::build(&filtered, window_start)
    }

    /// 필터 기간 시작일 시점의 잔고.
    ///
    /// 시작일이 없으면 `starting_balance` 그대로입니다.
    pub fn balance_at<T: TradeRecord>(
        trades: &[T],
        starting_balance: Decimal,
        filter: &TradeFilter,
    ) -> Decimal {
        let from = filter.from.map(DateInput::from);
        calculate_balance_at_date(trades, starting_balance, from.as_ref())
    }
}
