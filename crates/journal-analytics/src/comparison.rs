//! 배치 비교 시리즈.
//!
//! 현재 배치와 이전 배치를 각각 시간순으로 다시 정렬한 뒤, 같은 인덱스끼리
//! 맞춘 두 개의 누적 손익 시리즈를 만듭니다.

use journal_core::{CanonicalDate, TradeRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::batch::calculate_trade_batches;
use crate::metrics::{calculate_metrics, Metrics};

/// 비교 차트의 한 점
///
/// 해당 배치에 이 인덱스의 거래가 없으면 `*_value`는 `None`입니다 (차트가 선을
/// 잇지 않도록). `*_cumulative`는 그 경우에도 직전까지의 누적값을 유지합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    /// 1부터 시작하는 거래 순번
    pub index: usize,

    /// 현재 배치 누적 손익 (진행 중인 합계)
    pub current_cumulative: Decimal,

    /// 이전 배치 누적 손익 (진행 중인 합계)
    pub previous_cumulative: Decimal,

    /// 현재 배치 표시값
    pub current_value: Option<Decimal>,

    /// 이전 배치 표시값
    pub previous_value: Option<Decimal>,
}

/// 배치를 청산일 오름차순으로 정렬합니다.
///
/// 청산일이 없는 거래는 [`CanonicalDate::LATEST`]로 취급해 맨 뒤로 보냅니다.
fn sort_chronologically<T: TradeRecord>(batch: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = batch.iter().collect();
    sorted.sort_by_key(|trade| trade.exit_key().unwrap_or(CanonicalDate::LATEST));
    sorted
}

/// 두 배치의 인덱스 정렬 누적 비교 시리즈를 생성합니다.
///
/// 항상 `max(len(current), len(previous))`개의 점을 반환합니다.
pub fn generate_batch_comparison_data<T: TradeRecord>(
    current: &[T],
    previous: &[T],
) -> Vec<ComparisonPoint> {
    let current = sort_chronologically(current);
    let previous = sort_chronologically(previous);
    let length = current.len().max(previous.len());

    let mut current_cumulative = Decimal::ZERO;
    let mut previous_cumulative = Decimal::ZERO;

    (0..length)
        .map(|i| {
            let current_value = current.get(i).map(|trade| {
                current_cumulative = current_cumulative.saturating_add(trade.profit());
                current_cumulative
            });
            let previous_value = previous.get(i).map(|trade| {
                previous_cumulative = previous_cumulative.saturating_add(trade.profit());
                previous_cumulative
            });

            ComparisonPoint {
                index: i + 1,
                current_cumulative,
                previous_cumulative,
                current_value,
                previous_value,
            }
        })
        .collect()
}

/// "최근 배치 vs 이전 배치" 카드 데이터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchComparison {
    /// 두 배치가 같은 목록인지 (거래 10건 이하)
    pub is_baseline: bool,

    /// 현재 배치 지표 (시작 잔고 0 기준, 잔고 = 배치 순손익)
    pub current: Metrics,

    /// 이전 배치 지표 (시작 잔고 0 기준)
    pub previous: Metrics,

    /// 비교 차트 시리즈
    pub points: Vec<ComparisonPoint>,
}

impl BatchComparison {
    /// 최신순 거래 목록에서 배치를 나누고 비교 데이터를 만듭니다.
    pub fn from_newest_first<T: TradeRecord>(trades: &[T]) -> Self {
        let batches = calculate_trade_batches(trades);

        Self {
            is_baseline: batches.is_baseline(),
            current: calculate_metrics(batches.current, Decimal::ZERO),
            previous: calculate_metrics(batches.previous, Decimal::ZERO),
            points: generate_batch_comparison_data(batches.current, batches.previous),
        }
    }

    /// 현재 배치 순손익 - 이전 배치 순손익.
    pub fn profit_change(&self) -> Decimal {
        self.current
            .total_profit
            .saturating_sub(self.previous.total_profit)
    }

    /// 현재 배치 승률 - 이전 배치 승률 (%p).
    pub fn win_rate_change(&self) -> Decimal {
        self.current.win_rate - self.previous.win_rate
    }
}
