//! 설정 관리.
//!
//! 기본값 → TOML 파일(선택) → 환경 변수(`JOURNAL__...`) 순서로 덮어씁니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::JournalResult;

/// 옵션 1계약당 기초자산 수량.
pub const DEFAULT_CONTRACT_MULTIPLIER: u32 = 100;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 매매일지 설정
    #[serde(default)]
    pub journal: JournalSettings,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 매매일지 계산 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JournalSettings {
    /// 계좌 시작 잔고
    #[serde(default)]
    pub starting_balance: Decimal,
    /// 계약 승수 (profit 계산용, 옵션 기본 100)
    #[serde(default = "default_contract_multiplier")]
    pub contract_multiplier: u32,
}

fn default_contract_multiplier() -> u32 {
    DEFAULT_CONTRACT_MULTIPLIER
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            starting_balance: Decimal::ZERO,
            contract_multiplier: DEFAULT_CONTRACT_MULTIPLIER,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 설정 파일(선택)과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 지정되지 않으면 기본값과 환경 변수만 사용합니다.
    pub fn load(path: Option<&Path>) -> JournalResult<Self> {
        let mut builder = config::Config::builder()
            .set_default("journal.starting_balance", "0")?
            .set_default(
                "journal.contract_multiplier",
                i64::from(DEFAULT_CONTRACT_MULTIPLIER),
            )?
            .set_default("logging.level", "warn")?
            .set_default("logging.format", "compact")?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("JOURNAL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.journal.starting_balance, Decimal::ZERO);
        assert_eq!(config.journal.contract_multiplier, 100);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = std::env::temp_dir().join(format!("journal-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("journal.toml");
        std::fs::write(
            &path,
            "[journal]\nstarting_balance = \"2500.50\"\ncontract_multiplier = 10\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.journal.starting_balance, dec!(2500.50));
        assert_eq!(config.journal.contract_multiplier, 10);
        assert_eq!(config.logging.format, "compact");

        std::fs::remove_dir_all(&dir).ok();
    }
}
