//! tracing 기반 로깅 초기화.
//!
//! 로그는 항상 stderr로 나갑니다. stdout은 CLI의 JSON 결과 전용입니다.
//!
//! 설정 우선순위는 환경 변수 > 설정 파일(`[logging]`) > 기본값입니다.
//! 레벨은 `RUST_LOG`, 형식은 `LOG_FORMAT`을 봅니다.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::config::LoggingConfig;

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 여러 줄, 색상 포함 (개발용)
    Pretty,
    /// 한 줄 JSON (로그 수집용)
    Json,
    /// 한 줄 요약
    #[default]
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 최종 결정된 로깅 설정.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` 지시문 (예: "warn", "journal_analytics=debug")
    pub level: String,
    /// 출력 형식
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    /// 설정 파일 값 위에 환경 변수 값을 덮어씁니다.
    ///
    /// 비어 있거나 해석할 수 없는 환경 변수 값은 무시합니다.
    pub fn resolve(
        section: &LoggingConfig,
        rust_log: Option<&str>,
        log_format: Option<&str>,
    ) -> Self {
        let base = Self::from(section);

        let level = rust_log
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .unwrap_or(base.level);
        let format = log_format
            .and_then(|value| value.parse().ok())
            .unwrap_or(base.format);

        Self { level, format }
    }

    /// 현재 프로세스의 `RUST_LOG`/`LOG_FORMAT`을 반영합니다.
    pub fn from_env_over(section: &LoggingConfig) -> Self {
        let rust_log = std::env::var("RUST_LOG").ok();
        let log_format = std::env::var("LOG_FORMAT").ok();
        Self::resolve(section, rust_log.as_deref(), log_format.as_deref())
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(section: &LoggingConfig) -> Self {
        Self {
            level: section.level.clone(),
            format: section.format.parse().unwrap_or_default(),
        }
    }
}

/// 전역 subscriber를 설치합니다. 프로세스당 한 번만 성공합니다.
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_new(&config.level)?;

    let base = fmt::layer().with_writer(std::io::stderr);
    let layer = match config.format {
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()?;

    tracing::debug!(format = ?config.format, level = %config.level, "Logging initialized");

    Ok(())
}
