//! 매매일지 분석 및 배치 엔진.
//!
//! 정렬되지 않은 거래 목록을 대시보드가 그리는 파생 데이터로 변환합니다.
//! 모든 함수는 순수 함수이며 I/O가 없고 실패하지 않습니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 요약 지표 (승률, 평균 수익/손실, 총손익, 현재 잔고)
//! - 시계열 (누적 손익, 계좌 잔고, 월별 손익, 최근 30일 손익)
//! - 특정 시점 잔고 재구성
//! - 최근 10건 vs 이전 10건 배치 비교
//! - 거래 필터 (태그, 종목, 포지션, 기간)
//! - 대시보드 일괄 계산과 호출자 소유 메모이제이션 캐시
//!
//! # Re-exports
//!
//! - [`metrics`]: 요약 지표 (Metrics, ResultTally)
//! - [`series`]: 청산일 기준 시계열
//! - [`batch`]: 배치 분할
//! - [`comparison`]: 배치 비교 시리즈

pub mod balance;
pub mod batch;
pub mod cache;
pub mod comparison;
pub mod dashboard;
pub mod filter;
pub mod metrics;
pub mod series;

pub use balance::calculate_balance_at_date;
pub use batch::{calculate_trade_batches, TradeBatches, BATCH_SIZE};
pub use cache::{fingerprint, DashboardCache};
pub use comparison::{generate_batch_comparison_data, BatchComparison, ComparisonPoint};
pub use dashboard::Dashboard;
pub use filter::TradeFilter;
pub use metrics::{calculate_metrics, tally_results, Metrics, ResultTally};
pub use series::{
    generate_account_balance_data, generate_cumulative_profit_data,
    generate_last_30_days_net_pnl_data, generate_monthly_net_pnl_data, BalanceKey, BalancePoint,
    CumulativePoint, DailyPnl, MonthlyPnl, LAST_30_DAYS_SPAN,
};
