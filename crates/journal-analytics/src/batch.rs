//! 배치 분할.
//!
//! 최신순으로 정렬된 거래 목록을 "현재" 배치와 "이전" 배치(각 최대 10건)로 나눕니다.
//!
//! # 경계 규칙
//!
//! | 거래 수 | 현재 배치 | 이전 배치 |
//! |---------|-----------|-----------|
//! | 0 | 빈 배치 | 빈 배치 |
//! | 1..=10 | 전체 목록 | 전체 목록 (기준선 표시) |
//! | 10의 배수 (≥ 20) | `[0, 9]` | `[10, 19]` |
//! | 나머지 `r` 있음 | `[0, r-1]` (미완성 묶음) | `[r, r+9]` |

use serde::Serialize;

/// 배치 하나의 최대 거래 수.
pub const BATCH_SIZE: usize = 10;

/// 현재/이전 배치.
///
/// 두 배치 모두 입력 슬라이스를 빌리며 입력과 같은 상대 순서를 유지합니다.
#[derive(Debug, Serialize)]
pub struct TradeBatches<'a, T> {
    /// 가장 최근 배치
    pub current: &'a [T],
    /// 그 직전 배치
    pub previous: &'a [T],
}

impl<T> Clone for TradeBatches<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TradeBatches<'_, T> {}

impl<'a, T> TradeBatches<'a, T> {
    /// 거래 수가 적어 두 배치가 같은 목록인지 (실제 비교가 아닌 기준선 표시).
    pub fn is_baseline(&self) -> bool {
        !self.current.is_empty() && std::ptr::eq(self.current, self.previous)
    }

    /// 두 배치 모두 비어 있는지.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.previous.is_empty()
    }
}

/// 최신순 거래 목록을 현재/이전 배치로 나눕니다.
///
/// 입력은 인덱스 0이 가장 최근 거래라고 가정합니다. 이 순서는 호출자 책임이며
/// 여기서 다시 정렬하지 않습니다 ([`journal_core::sort_newest_first`] 참고).
pub fn calculate_trade_batches<T>(trades: &[T]) -> TradeBatches<'_, T> {
    let total = trades.len();

    if total <= BATCH_SIZE {
        return TradeBatches {
            current: trades,
            previous: trades,
        };
    }

    let current_len = match total % BATCH_SIZE {
        0 => BATCH_SIZE,
        remainder => remainder,
    };
    let previous_end = (current_len + BATCH_SIZE).min(total);

    TradeBatches {
        current: &trades[..current_len],
        previous: &trades[current_len..previous_end],
    }
}
