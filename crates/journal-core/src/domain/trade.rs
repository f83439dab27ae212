//! 매매일지 거래 기록.
//!
//! 이 모듈은 백엔드 조회 결과 한 행에 대응하는 타입을 정의합니다:
//! - `Trade` - 단일 옵션/주식 거래
//! - `PositionType` - CALL/PUT
//! - `TradeResult` - 사용자가 기록한 WIN/LOSS 표시
//! - `Tag` - 거래에 붙은 태그

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::record::sort_newest_first;
use crate::date::{CanonicalDate, DateInput};

/// 거래 식별자.
pub type TradeId = i64;

/// 태그 식별자.
pub type TagId = i64;

/// 식별자 → 거래 매핑 (백엔드 조회 결과).
pub type TradeMap = HashMap<TradeId, Trade>;

/// 포지션 종류.
///
/// 백엔드에는 정수 코드로 저장됩니다 (1 = CALL, 2 = PUT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PositionType {
    /// 콜 옵션
    Call,
    /// 풋 옵션
    Put,
}

impl TryFrom<u8> for PositionType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(PositionType::Call),
            2 => Ok(PositionType::Put),
            _ => Err(format!("unknown position_type code: {}", code)),
        }
    }
}

impl From<PositionType> for u8 {
    fn from(position: PositionType) -> Self {
        match position {
            PositionType::Call => 1,
            PositionType::Put => 2,
        }
    }
}

impl fmt::Display for PositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionType::Call => write!(f, "CALL"),
            PositionType::Put => write!(f, "PUT"),
        }
    }
}

impl std::str::FromStr for PositionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CALL" | "1" => Ok(PositionType::Call),
            "PUT" | "2" => Ok(PositionType::Put),
            _ => Err(format!("Unknown position type: {}", s)),
        }
    }
}

/// 사용자가 직접 기록한 거래 결과.
///
/// `profit`의 부호와 독립적입니다. 수동으로 덮어쓴 값일 수 있으므로
/// 어느 한쪽에서 다른 쪽을 추론하지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TradeResult {
    /// 손실 (0)
    Loss,
    /// 수익 (1)
    Win,
}

impl TryFrom<u8> for TradeResult {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TradeResult::Loss),
            1 => Ok(TradeResult::Win),
            _ => Err(format!("unknown result code: {}", code)),
        }
    }
}

impl From<TradeResult> for u8 {
    fn from(result: TradeResult) -> Self {
        match result {
            TradeResult::Loss => 0,
            TradeResult::Win => 1,
        }
    }
}

/// 거래 태그.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// 태그 ID
    pub id: TagId,
    /// 태그 이름
    pub name: String,
    /// 표시 색상 (예: "#22c55e")
    #[serde(default)]
    pub color: Option<String>,
}

/// 단일 거래 기록.
///
/// 엔진은 읽기만 합니다. `profit`은 호출자가 미리 계산한 값이며
/// 엔진이 다시 계산하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// 거래 ID
    pub id: TradeId,
    /// 종목 심볼 (예: "SPY")
    pub symbol: String,
    /// 포지션 종류
    pub position_type: PositionType,
    /// 진입 가격
    pub entry_price: Decimal,
    /// 청산 가격
    pub exit_price: Decimal,
    /// 계약 수
    pub quantity: u32,
    /// 진입일
    #[serde(default)]
    pub entry_date: DateInput,
    /// 청산일 (모든 집계의 시간 축)
    #[serde(default)]
    pub exit_date: DateInput,
    /// 실현 손익 (부호 있음)
    pub profit: Decimal,
    /// 사용자가 기록한 결과 (선택)
    #[serde(default)]
    pub result: Option<TradeResult>,
    /// 메모
    #[serde(default)]
    pub notes: Option<String>,
    /// 진입 근거
    #[serde(default)]
    pub reasoning: Option<String>,
    /// 아이디어 출처
    #[serde(default)]
    pub source: Option<String>,
    /// 태그 목록
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Trade {
    /// 새 거래 기록을 생성합니다.
    ///
    /// `profit`은 [`Trade::gross_profit`]으로 계산합니다.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: TradeId,
        symbol: impl Into<String>,
        position_type: PositionType,
        entry_price: Decimal,
        exit_price: Decimal,
        quantity: u32,
        entry_date: impl Into<DateInput>,
        exit_date: impl Into<DateInput>,
        multiplier: u32,
    ) -> Self {
        let mut trade = Self {
            id,
            symbol: symbol.into(),
            position_type,
            entry_price,
            exit_price,
            quantity,
            entry_date: entry_date.into(),
            exit_date: exit_date.into(),
            profit: Decimal::ZERO,
            result: None,
            notes: None,
            reasoning: None,
            source: None,
            tags: Vec::new(),
        };
        trade.profit = trade.gross_profit(multiplier);
        trade
    }

    /// 손익을 직접 지정합니다.
    pub fn with_profit(mut self, profit: Decimal) -> Self {
        self.profit = profit;
        self
    }

    /// 결과 표시를 설정합니다.
    pub fn with_result(mut self, result: TradeResult) -> Self {
        self.result = Some(result);
        self
    }

    /// 태그를 추가합니다.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// 메모를 설정합니다.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// 가격 변화로부터 손익을 계산합니다.
    ///
    /// (청산가 - 진입가) × 승수 × 수량. `Decimal` 범위 끝에서 포화합니다.
    pub fn gross_profit(&self, multiplier: u32) -> Decimal {
        self.exit_price
            .saturating_sub(self.entry_price)
            .saturating_mul(Decimal::from(multiplier))
            .saturating_mul(Decimal::from(self.quantity))
    }

    /// 정규화된 청산일.
    pub fn exit_key(&self) -> Option<CanonicalDate> {
        self.exit_date.normalize()
    }

    /// 정규화된 진입일.
    pub fn entry_key(&self) -> Option<CanonicalDate> {
        self.entry_date.normalize()
    }
}

/// 매핑의 거래를 최신순으로 정렬해 반환합니다.
///
/// 정렬 규칙은 [`sort_newest_first`]를 따릅니다.
pub fn newest_first(trades: &TradeMap) -> Vec<&Trade> {
    let mut ordered: Vec<&Trade> = trades.values().collect();
    sort_newest_first(&mut ordered);
    ordered
}
