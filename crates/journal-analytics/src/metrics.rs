//! 요약 지표 계산 모듈
//!
//! 거래 목록과 시작 잔고로부터 대시보드 상단 카드의 지표를 계산합니다:
//! - 승률 (Win Rate): `profit > 0` 거래 비율
//! - 평균 수익 / 평균 손실
//! - 총손익과 현재 잔고
//!
//! 승/패 분류는 `profit`의 부호만 사용합니다. 사용자가 기록한 결과 표시
//! (`TradeResult`)는 [`tally_results`]에서 별도로 집계하며 두 경로는 섞이지 않습니다.
//!
//! 합계는 `Decimal` 범위 끝에서 포화(saturating)합니다. 패닉하지 않습니다.

use journal_core::{TradeRecord, TradeResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 거래 요약 지표
///
/// # 불변식
///
/// - `winning_trades + losing_trades <= total_trades` (손익 0 거래는 어느 쪽에도 포함되지 않음)
/// - `current_balance - starting_balance == total_profit`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// 총 거래 수
    pub total_trades: usize,

    /// 수익 거래 수 (`profit > 0`)
    pub winning_trades: usize,

    /// 손실 거래 수 (`profit < 0`)
    pub losing_trades: usize,

    /// 승률 (%), 거래가 없으면 0
    pub win_rate: Decimal,

    /// 평균 수익 (수익 거래만), 없으면 0
    pub avg_win: Decimal,

    /// 평균 손실 (손실 거래만, 양수로 표시), 없으면 0
    pub avg_loss: Decimal,

    /// 최대 단일 수익
    pub largest_win: Decimal,

    /// 최대 단일 손실 (양수로 표시)
    pub largest_loss: Decimal,

    /// 총 수익 (수익 거래 합계)
    pub gross_profit: Decimal,

    /// 총 손실 (손실 거래 합계, 양수로 표시)
    pub gross_loss: Decimal,

    /// 총손익 (손익 0 거래 포함 전체 합계, 수수료 개념이 없으므로 순손익과 같음)
    pub total_profit: Decimal,

    /// 프로핏 팩터 (총 수익 / 총 손실), 손실이 없거나 표현 범위를 넘으면 `None`
    pub profit_factor: Option<Decimal>,

    /// 시작 잔고
    pub starting_balance: Decimal,

    /// 현재 잔고 = 시작 잔고 + 총손익
    pub current_balance: Decimal,
}

impl Metrics {
    /// 손실 거래 비율 (%).
    pub fn loss_rate(&self) -> Decimal {
        if self.total_trades == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.losing_trades) / Decimal::from(self.total_trades) * dec!(100)
    }

    /// 손익 0 거래 수.
    pub fn breakeven_trades(&self) -> usize {
        self.total_trades - self.winning_trades - self.losing_trades
    }
}

/// 거래 목록과 시작 잔고로 요약 지표를 계산합니다.
///
/// 입력 순서와 무관합니다.
///
/// # 예시
///
/// ```rust,ignore
/// let metrics = calculate_metrics(&trades, dec!(1000));
/// println!("승률: {}%", metrics.win_rate);
/// ```
pub fn calculate_metrics<T: TradeRecord>(trades: &[T], starting_balance: Decimal) -> Metrics {
    let mut metrics = Metrics {
        total_trades: trades.len(),
        starting_balance,
        current_balance: starting_balance,
        ..Default::default()
    };

    for trade in trades {
        let profit = trade.profit();
        metrics.total_profit = metrics.total_profit.saturating_add(profit);

        if profit > Decimal::ZERO {
            metrics.winning_trades += 1;
            metrics.gross_profit = metrics.gross_profit.saturating_add(profit);
            metrics.largest_win = metrics.largest_win.max(profit);
        } else if profit < Decimal::ZERO {
            let loss = profit.abs();
            metrics.losing_trades += 1;
            metrics.gross_loss = metrics.gross_loss.saturating_add(loss);
            metrics.largest_loss = metrics.largest_loss.max(loss);
        }
    }

    if metrics.total_trades > 0 {
        metrics.win_rate = Decimal::from(metrics.winning_trades)
            / Decimal::from(metrics.total_trades)
            * dec!(100);
    }

    if metrics.winning_trades > 0 {
        metrics.avg_win = metrics.gross_profit / Decimal::from(metrics.winning_trades);
    }

    if metrics.losing_trades > 0 {
        metrics.avg_loss = metrics.gross_loss / Decimal::from(metrics.losing_trades);
        metrics.profit_factor = metrics.gross_profit.checked_div(metrics.gross_loss);
    }

    metrics.current_balance = starting_balance.saturating_add(metrics.total_profit);
    metrics
}

/// 사용자가 기록한 결과 표시 집계 (배지용)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTally {
    /// WIN으로 표시된 거래 수
    pub marked_wins: usize,
    /// LOSS로 표시된 거래 수
    pub marked_losses: usize,
    /// 표시가 없는 거래 수
    pub unmarked: usize,
}

/// 결과 표시(`TradeResult`)를 집계합니다.
///
/// `profit` 부호는 보지 않습니다.
pub fn tally_results<T: TradeRecord>(trades: &[T]) -> ResultTally {
    trades
        .iter()
        .fold(ResultTally::default(), |mut tally, trade| {
            match trade.result() {
                Some(TradeResult::Win) => tally.marked_wins += 1,
                Some(TradeResult::Loss) => tally.marked_losses += 1,
                None => tally.unmarked += 1,
            }
            tally
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_core::{PositionType, Trade};

    fn trade(id: i64, exit: &str, profit: Decimal) -> Trade {
        Trade::new(
            id,
            "SPY",
            PositionType::Call,
            dec!(1),
            dec!(1),
            1,
            exit,
            exit,
            100,
        )
        .with_profit(profit)
    }

    #[test]
    fn test_two_trade_scenario() {
        let trades = vec![
            trade(1, "2024-01-01", dec!(100)),
            trade(2, "2024-01-05", dec!(-40)),
        ];

        let metrics = calculate_metrics(&trades, dec!(1000));

        assert_eq!(metrics.total_trades, 2);
        assert_eq!(metrics.winning_trades, 1);
        assert_eq!(metrics.losing_trades, 1);
        assert_eq!(metrics.win_rate, dec!(50));
        assert_eq!(metrics.total_profit, dec!(60));
        assert_eq!(metrics.current_balance, dec!(1060));
        assert_eq!(metrics.avg_win, dec!(100));
        assert_eq!(metrics.avg_loss, dec!(40));
        assert_eq!(metrics.profit_factor, Some(dec!(2.5)));
    }

    #[test]
    fn test_empty_trades() {
        let trades: Vec<Trade> = vec![];
        let metrics = calculate_metrics(&trades, dec!(500));

        assert_eq!(metrics.total_trades, 0);
        assert_eq!(metrics.win_rate, Decimal::ZERO);
        assert_eq!(metrics.avg_win, Decimal::ZERO);
        assert_eq!(metrics.avg_loss, Decimal::ZERO);
        assert_eq!(metrics.current_balance, dec!(500));
        assert_eq!(metrics.profit_factor, None);
    }

    #[test]
    fn test_zero_profit_counted_in_neither_bucket() {
        let trades = vec![
            trade(1, "2024-01-01", dec!(0)),
            trade(2, "2024-01-02", dec!(25)),
            trade(3, "2024-01-03", dec!(0)),
        ];

        let metrics = calculate_metrics(&trades, Decimal::ZERO);

        assert_eq!(metrics.total_trades, 3);
        assert_eq!(metrics.winning_trades, 1);
        assert_eq!(metrics.losing_trades, 0);
        assert_eq!(metrics.breakeven_trades(), 2);
        // 1 / 3 × 100
        assert!(metrics.win_rate > dec!(33.33) && metrics.win_rate < dec!(33.34));
        assert_eq!(metrics.total_profit, dec!(25));
    }

    #[test]
    fn test_result_flag_does_not_affect_win_rate() {
        // 손실 거래지만 사용자가 WIN으로 표시
        let trades = vec![trade(1, "2024-01-01", dec!(-10)).with_result(TradeResult::Win)];

        let metrics = calculate_metrics(&trades, Decimal::ZERO);
        let tally = tally_results(&trades);

        assert_eq!(metrics.winning_trades, 0);
        assert_eq!(metrics.losing_trades, 1);
        assert_eq!(tally.marked_wins, 1);
        assert_eq!(tally.marked_losses, 0);
    }

    #[test]
    fn test_tally_counts_unmarked() {
        let trades = vec![
            trade(1, "2024-01-01", dec!(5)).with_result(TradeResult::Win),
            trade(2, "2024-01-02", dec!(5)).with_result(TradeResult::Loss),
            trade(3, "2024-01-03", dec!(5)),
        ];

        let tally = tally_results(&trades);

        assert_eq!(
            tally,
            ResultTally {
                marked_wins: 1,
                marked_losses: 1,
                unmarked: 1,
            }
        );
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let trades = vec![
            trade(1, "2024-01-01", Decimal::MAX),
            trade(2, "2024-01-02", Decimal::MAX),
        ];

        let metrics = calculate_metrics(&trades, Decimal::MAX);

        assert_eq!(metrics.gross_profit, Decimal::MAX);
        assert_eq!(metrics.total_profit, Decimal::MAX);
        assert_eq!(metrics.current_balance, Decimal::MAX);
        assert_eq!(metrics.largest_win, Decimal::MAX);
    }

    #[test]
    fn test_unrepresentable_profit_factor_is_none() {
        let trades = vec![
            trade(1, "2024-01-01", Decimal::MAX),
            trade(2, "2024-01-02", Decimal::new(-1, 28)),
        ];

        let metrics = calculate_metrics(&trades, Decimal::ZERO);

        assert_eq!(metrics.gross_loss, Decimal::new(1, 28));
        assert_eq!(metrics.profit_factor, None);
    }

    #[test]
    fn test_accepts_borrowed_trades() {
        let owned = vec![trade(1, "2024-01-01", dec!(10))];
        let borrowed: Vec<&Trade> = owned.iter().collect();

        assert_eq!(
            calculate_metrics(&borrowed, Decimal::ZERO),
            calculate_metrics(&owned, Decimal::ZERO)
        );
    }
}
