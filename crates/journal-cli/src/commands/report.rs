//! 분석 결과 렌더링.
//!
//! 필터를 먼저 적용한 뒤 요청한 리포트를 계산해 JSON 값으로 돌려줍니다.
//! 기간 필터가 있으면 시작 잔고는 기간 시작일 시점의 잔고로 대체됩니다.
//! `balance-at`은 계좌 전체 잔고이므로 필터와 무관하게 전체 거래를 재생합니다.

use journal_analytics::{
    calculate_balance_at_date, calculate_metrics, calculate_trade_batches,
    generate_account_balance_data, generate_cumulative_profit_data,
    generate_last_30_days_net_pnl_data, generate_monthly_net_pnl_data, BatchComparison,
    Dashboard, TradeBatches, TradeFilter,
};
use journal_core::{
    normalize_str, CanonicalDate, DateInput, JournalError, JournalResult, PositionType, TagId,
    Trade,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// 출력할 리포트 종류.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// 요약 지표
    Metrics,
    /// 누적 손익 곡선
    Cumulative,
    /// 계좌 잔고 곡선
    Balance,
    /// 월별 순손익
    Monthly,
    /// 최근 30일 일별 순손익
    Last30,
    /// 특정 날짜 시작 시점 잔고
    BalanceAt(DateInput),
    /// 현재/이전 배치 거래 목록
    Batches,
    /// 배치 비교 카드와 차트
    Compare,
    /// 대시보드 전체
    Dashboard,
}

/// 명령줄에서 받은 필터 인자 (검증 전).
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// 태그 ID 목록
    pub tags: Vec<TagId>,
    /// 종목 심볼
    pub symbol: Option<String>,
    /// 포지션 종류 (CALL/PUT 또는 1/2)
    pub position: Option<String>,
    /// 청산일 하한
    pub from: Option<String>,
    /// 청산일 상한
    pub to: Option<String>,
}

impl FilterOptions {
    /// 인자를 검증해 [`TradeFilter`]로 변환합니다.
    pub fn into_filter(self) -> JournalResult<TradeFilter> {
        let position_type = self
            .position
            .as_deref()
            .map(|raw| raw.parse::<PositionType>())
            .transpose()
            .map_err(JournalError::InvalidInput)?;

        let from = parse_bound("--from", self.from.as_deref())?;
        let to = parse_bound("--to", self.to.as_deref())?;

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(JournalError::InvalidInput(format!(
                    "시작일({})이 종료일({})보다 늦습니다",
                    from, to
                )));
            }
        }

        Ok(TradeFilter {
            tags: self.tags,
            symbol: self.symbol,
            position_type,
            from,
            to,
        })
    }
}

fn parse_bound(flag: &str, raw: Option<&str>) -> JournalResult<Option<CanonicalDate>> {
    raw.map(|value| {
        normalize_str(value).ok_or_else(|| {
            JournalError::InvalidInput(format!("{}: 날짜를 해석할 수 없습니다: {}", flag, value))
        })
    })
    .transpose()
}

#[derive(Serialize)]
struct BatchesOutput<'a> {
    is_baseline: bool,
    #[serde(flatten)]
    batches: TradeBatches<'a, &'a Trade>,
}

#[derive(Serialize)]
struct BalanceAtOutput {
    date: Option<CanonicalDate>,
    balance: Decimal,
}

/// 리포트를 계산해 JSON 값으로 반환합니다.
///
/// `trades`는 최신순이어야 합니다 ([`crate::load_trades`]가 정렬해 줌).
pub fn render(
    report: &Report,
    trades: &[Trade],
    starting_balance: Decimal,
    filter: &TradeFilter,
) -> JournalResult<Value> {
    let window_start = Dashboard::balance_at(trades, starting_balance, filter);
    let selected = filter.apply(trades);

    debug!(
        report = ?report,
        selected = selected.len(),
        %window_start,
        "리포트 계산"
    );

    let value = match report {
        Report::Metrics => serde_json::to_value(calculate_metrics(&selected, window_start))?,
        Report::Cumulative => serde_json::to_value(generate_cumulative_profit_data(&selected))?,
        Report::Balance => {
            serde_json::to_value(generate_account_balance_data(&selected, window_start))?
        }
        Report::Monthly => serde_json::to_value(generate_monthly_net_pnl_data(&selected))?,
        Report::Last30 => serde_json::to_value(generate_last_30_days_net_pnl_data(&selected))?,
        Report::BalanceAt(date) => {
            let normalized = date.normalize();
            if normalized.is_none() {
                warn!(date = ?date.as_raw(), "날짜를 해석할 수 없어 시작 잔고를 그대로 사용합니다");
            }
            serde_json::to_value(BalanceAtOutput {
                date: normalized,
                balance: calculate_balance_at_date(trades, starting_balance, Some(date)),
            })?
        }
        Report::Batches => {
            let batches = calculate_trade_batches(&selected);
            serde_json::to_value(BatchesOutput {
                is_baseline: batches.is_baseline(),
                batches,
            })?
        }
        Report::Compare => serde_json::to_value(BatchComparison::from_newest_first(&selected))?,
        Report::Dashboard => serde_json::to_value(Dashboard::build(&selected, window_start))?,
    };

    Ok(value)
}
