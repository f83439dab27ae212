//! 분석 엔진이 거래에서 읽는 정보.

use rust_decimal::Decimal;
use std::cmp::Reverse;

use super::trade::{PositionType, TagId, Trade, TradeId, TradeResult};
use crate::date::{CanonicalDate, DateInput};

/// 거래 정보를 제공하는 trait.
///
/// 분석 함수는 모두 이 trait에 대해 제네릭입니다. 소유한 `Trade`와
/// 빌린 `&Trade` 모두 그대로 넘길 수 있습니다.
pub trait TradeRecord {
    /// 거래 ID.
    fn id(&self) -> TradeId;

    /// 종목 심볼.
    fn symbol(&self) -> &str;

    /// 포지션 종류.
    fn position_type(&self) -> PositionType;

    /// 실현 손익 (부호 있음).
    fn profit(&self) -> Decimal;

    /// 청산일 원본 입력.
    fn exit_date(&self) -> &DateInput;

    /// 사용자가 기록한 결과 표시.
    fn result(&self) -> Option<TradeResult>;

    /// 해당 태그가 붙어 있는지 확인합니다.
    fn has_tag(&self, tag: TagId) -> bool;

    /// 정규화된 청산일.
    fn exit_key(&self) -> Option<CanonicalDate> {
        self.exit_date().normalize()
    }
}

impl TradeRecord for Trade {
    fn id(&self) -> TradeId {
        self.id
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn position_type(&self) -> PositionType {
        self.position_type
    }

    fn profit(&self) -> Decimal {
        self.profit
    }

    fn exit_date(&self) -> &DateInput {
        &self.exit_date
    }

    fn result(&self) -> Option<TradeResult> {
        self.result
    }

    fn has_tag(&self, tag: TagId) -> bool {
        self.tags.iter().any(|t| t.id == tag)
    }
}

impl<T: TradeRecord + ?Sized> TradeRecord for &T {
    fn id(&self) -> TradeId {
        (**self).id()
    }

    fn symbol(&self) -> &str {
        (**self).symbol()
    }

    fn position_type(&self) -> PositionType {
        (**self).position_type()
    }

    fn profit(&self) -> Decimal {
        (**self).profit()
    }

    fn exit_date(&self) -> &DateInput {
        (**self).exit_date()
    }

    fn result(&self) -> Option<TradeResult> {
        (**self).result()
    }

    fn has_tag(&self, tag: TagId) -> bool {
        (**self).has_tag(tag)
    }

    fn exit_key(&self) -> Option<CanonicalDate> {
        (**self).exit_key()
    }
}

/// 거래를 최신순으로 정렬합니다.
///
/// 청산일 내림차순, 청산일이 없는 거래는 맨 뒤, 같은 날짜는 ID 내림차순.
/// 배치 분할기가 기대하는 입력 순서입니다.
pub fn sort_newest_first<T: TradeRecord>(trades: &mut [T]) {
    // `Option`은 None < Some이므로 뒤집으면 청산일 없는 거래가 맨 뒤로 감
    trades.sort_by_cached_key(|trade| Reverse((trade.exit_key(), trade.id())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// `exit_key` 호출 횟수를 세는 거래
    struct Counted<'a> {
        id: TradeId,
        exit: DateInput,
        calls: &'a Cell<usize>,
    }

    impl TradeRecord for Counted<'_> {
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
            Decimal::ZERO
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

        fn exit_key(&self) -> Option<CanonicalDate> {
            self.calls.set(self.calls.get() + 1);
            self.exit.normalize()
        }
    }

    #[test]
    fn test_sort_parses_each_exit_date_once() {
        let calls = Cell::new(0);
        let exits = [
            "2024-01-03",
            "",
            "Jan 5, 2024",
            "2024-01-05T09:30:00Z",
            "not a date",
            "2024-01-01",
        ];
        let mut trades: Vec<Counted> = exits
            .iter()
            .enumerate()
            .map(|(i, exit)| Counted {
                id: i as TradeId + 1,
                exit: DateInput::from(*exit),
                calls: &calls,
            })
            .collect();

        sort_newest_first(&mut trades);

        assert_eq!(calls.get(), exits.len());
        let ids: Vec<TradeId> = trades.iter().map(|t| t.id).collect();
        // 1월 5일 두 건은 ID 내림차순, 날짜 없는 두 건도 ID 내림차순으로 맨 뒤
        assert_eq!(ids, vec![4, 3, 1, 6, 5, 2]);
    }
}
