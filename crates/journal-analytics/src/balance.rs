//! 특정 시점 잔고 재구성.
//!
//! 날짜 필터의 시작일에 계좌 잔고가 얼마였는지 거래를 다시 재생해 계산합니다.

use journal_core::{DateInput, TradeRecord};
use rust_decimal::Decimal;

/// `target_date` 당일이 시작될 때의 잔고를 계산합니다.
///
/// 청산일이 `target_date`보다 **엄격히 이전**인 거래의 손익만 더합니다.
/// 당일 청산 거래는 제외되고, 청산일이 유효하지 않은 거래도 제외됩니다.
///
/// `target_date`가 없거나 정규화할 수 없으면 `starting_balance`를 그대로 반환합니다.
pub fn calculate_balance_at_date<T: TradeRecord>(
    trades: &[T],
    starting_balance: Decimal,
    target_date: Option<&DateInput>,
) -> Decimal {
    let Some(target) = target_date.and_then(DateInput::normalize) else {
        return starting_balance;
    };

    trades
        .iter()
        .filter(|trade| trade.exit_key().is_some_and(|exit| exit < target))
        .fold(starting_balance, |balance, trade| {
            balance.saturating_add(trade.profit())
        })
}
