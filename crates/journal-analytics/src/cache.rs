//! 호출자 소유 대시보드 캐시.
//!
//! 거래 내용과 시작 잔고의 지문(fingerprint)이 바뀔 때만 다시 계산합니다.
//! 전역 상태가 없으므로 캐시를 쓰지 않는 호출은 순수 함수 그대로입니다.

use journal_core::TradeRecord;
use rust_decimal::Decimal;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

use crate::dashboard::Dashboard;

/// 거래 목록과 시작 잔고의 내용 지문을 계산합니다.
///
/// 집계에 영향을 주는 필드(ID, 손익, 정규화된 청산일, 결과 표시)와 순서를 해시합니다.
/// 같은 프로세스 안에서만 비교 가능한 값입니다.
pub fn fingerprint<T: TradeRecord>(trades: &[T], starting_balance: Decimal) -> u64 {
    let mut hasher = DefaultHasher::new();

    starting_balance.hash(&mut hasher);
    trades.len().hash(&mut hasher);
    for trade in trades {
        trade.id().hash(&mut hasher);
        trade.profit().hash(&mut hasher);
        trade.exit_key().hash(&mut hasher);
        trade.result().hash(&mut hasher);
    }

    hasher.finish()
}

/// 마지막 대시보드 하나를 기억하는 캐시
#[derive(Debug, Default)]
pub struct DashboardCache {
    entry: Option<(u64, Dashboard)>,
    hits: u64,
    misses: u64,
}

impl DashboardCache {
    /// 빈 캐시.
    pub fn new() -> Self {
        Self::default()
    }

    /// 지문이 같으면 캐시된 대시보드를, 아니면 새로 계산해 반환합니다.
    pub fn get_or_build<T: TradeRecord>(
        &mut self,
        trades: &[T],
        starting_balance: Decimal,
    ) -> &Dashboard {
        let key = fingerprint(trades, starting_balance);

        if matches!(&self.entry, Some((cached, _)) if *cached == key) {
            self.hits += 1;
            debug!(key, "대시보드 캐시 적중");
        } else {
            self.entry = None;
        }

        let misses = &mut self.misses;
        let (_, dashboard) = self.entry.get_or_insert_with(|| {
            *misses += 1;
            debug!(key, "대시보드 재계산");
            (key, Dashboard::build(trades, starting_balance))
        });
        dashboard
    }

    /// 캐시를 비웁니다.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// 캐시 적중 횟수.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// 재계산 횟수.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
