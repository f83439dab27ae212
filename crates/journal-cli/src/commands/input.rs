//! 거래 내보내기 파일 로드.
//!
//! 백엔드 조회 결과를 그대로 저장한 JSON을 읽습니다. 두 가지 형태를 받습니다:
//! - 거래 행의 배열
//! - ID → 거래 행 객체
//!
//! 행에 `profit`이 없거나 `null`이면 가격과 계약 승수로 계산합니다.

use journal_core::{sort_newest_first, JournalError, JournalResult, Trade};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

/// 파일에서 거래를 읽어 최신순으로 정렬해 반환합니다.
pub fn load_trades(path: &Path, multiplier: u32) -> JournalResult<Vec<Trade>> {
    let raw = std::fs::read_to_string(path)?;
    let trades = parse_trades(&raw, multiplier)?;

    info!(path = %path.display(), count = trades.len(), "거래 로드 완료");
    Ok(trades)
}

/// JSON 문자열에서 거래를 파싱해 최신순으로 정렬해 반환합니다.
pub fn parse_trades(raw: &str, multiplier: u32) -> JournalResult<Vec<Trade>> {
    let rows: Vec<(Option<String>, Value)> = match serde_json::from_str(raw)? {
        Value::Array(rows) => rows.into_iter().map(|row| (None, row)).collect(),
        Value::Object(map) => map.into_iter().map(|(key, row)| (Some(key), row)).collect(),
        _ => {
            return Err(JournalError::InvalidInput(
                "거래 배열 또는 ID → 거래 객체가 필요합니다".to_string(),
            ))
        }
    };

    let mut trades = rows
        .into_iter()
        .enumerate()
        .map(|(index, (key, row))| parse_row(index, key.as_deref(), row, multiplier))
        .collect::<JournalResult<Vec<_>>>()?;

    sort_newest_first(&mut trades);
    Ok(trades)
}

fn parse_row(
    index: usize,
    key: Option<&str>,
    mut row: Value,
    multiplier: u32,
) -> JournalResult<Trade> {
    let Some(fields) = row.as_object_mut() else {
        return Err(JournalError::InvalidInput(format!(
            "{}번째 행이 객체가 아닙니다",
            index
        )));
    };

    fill_id_from_key(fields, key);

    let derive_profit = fields.get("profit").map_or(true, Value::is_null);
    if derive_profit {
        fields.insert("profit".to_string(), Value::from(0));
    }

    let mut trade: Trade = serde_json::from_value(row)
        .map_err(|e| JournalError::Serialization(format!("{}번째 행: {}", index, e)))?;

    if derive_profit {
        trade.profit = trade.gross_profit(multiplier);
        debug!(id = trade.id, profit = %trade.profit, "가격으로 손익 계산");
    }

    Ok(trade)
}

/// 행에 `id`가 없으면 객체 키를 ID로 사용합니다.
fn fill_id_from_key(fields: &mut Map<String, Value>, key: Option<&str>) {
    if fields.contains_key("id") {
        return;
    }
    if let Some(id) = key.and_then(|k| k.parse::<i64>().ok()) {
        fields.insert("id".to_string(), Value::from(id));
    }
}
