//! 거래 필터.
//!
//! 대시보드 상단의 태그/종목/포지션/기간 필터를 거래 목록에 적용합니다.

use journal_core::{CanonicalDate, PositionType, TagId, TradeRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 거래 필터 조건
///
/// 모든 조건은 AND로 결합됩니다. 비어 있는 조건은 무시합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeFilter {
    /// 태그 ID 목록 (하나라도 붙어 있으면 통과)
    #[serde(default)]
    pub tags: Vec<TagId>,

    /// 종목 심볼 (대소문자 무시)
    #[serde(default)]
    pub symbol: Option<String>,

    /// 포지션 종류
    #[serde(default)]
    pub position_type: Option<PositionType>,

    /// 청산일 하한 (포함)
    #[serde(default)]
    pub from: Option<CanonicalDate>,

    /// 청산일 상한 (포함)
    #[serde(default)]
    pub to: Option<CanonicalDate>,
}

impl TradeFilter {
    /// 빈 필터 (모든 거래 통과).
    pub fn new() -> Self {
        Self::default()
    }

    /// 태그 조건을 추가합니다.
    pub fn with_tag(mut self, tag: TagId) -> Self {
        self.tags.push(tag);
        self
    }

    /// 종목 조건을 설정합니다.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// 포지션 조건을 설정합니다.
    pub fn with_position_type(mut self, position_type: PositionType) -> Self {
        self.position_type = Some(position_type);
        self
    }

    /// 기간 조건을 설정합니다.
    pub fn with_range(mut self, from: Option<CanonicalDate>, to: Option<CanonicalDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// 조건이 하나도 없는지.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
            && self.symbol.is_none()
            && self.position_type.is_none()
            && self.from.is_none()
            && self.to.is_none()
    }

    /// 기간 조건이 있는지.
    pub fn has_date_range(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// 거래 하나가 조건을 만족하는지 확인합니다.
    ///
    /// 기간 조건이 있으면 청산일을 정규화할 수 없는 거래는 제외됩니다.
    pub fn matches<T: TradeRecord>(&self, trade: &T) -> bool {
        if !self.tags.is_empty() && !self.tags.iter().any(|tag| trade.has_tag(*tag)) {
            return false;
        }

        if let Some(symbol) = &self.symbol {
            if !trade.symbol().eq_ignore_ascii_case(symbol) {
                return false;
            }
        }

        if let Some(position_type) = self.position_type {
            if trade.position_type() != position_type {
                return false;
            }
        }

        if self.has_date_range() {
            let Some(exit) = trade.exit_key() else {
                return false;
            };
            if self.from.is_some_and(|from| exit < from) {
                return false;
            }
            if self.to.is_some_and(|to| exit > to) {
                return false;
            }
        }

        true
    }

    /// 조건을 만족하는 거래만 입력 순서대로 반환합니다.
    pub fn apply<'a, T: TradeRecord>(&self, trades: &'a [T]) -> Vec<&'a T> {
        let filtered: Vec<&T> = trades.iter().filter(|trade| self.matches(*trade)).collect();
        debug!(
            total = trades.len(),
            matched = filtered.len(),
            "거래 필터 적용"
        );
        filtered
    }
}
