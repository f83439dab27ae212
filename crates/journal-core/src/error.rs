//! 매매일지의 에러 타입.
//!
//! 분석 엔진 자체는 실패하지 않습니다 (잘못된 날짜는 `None`으로 흡수됨).
//! 이 에러 타입은 엔진 바깥의 설정 로드, 거래 내보내기 파일 파싱 등에서 사용됩니다.

use thiserror::Error;

/// 매매일지 에러.
#[derive(Debug, Error)]
pub enum JournalError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),
}

/// 매매일지 작업을 위한 Result 타입.
pub type JournalResult<T> = Result<T, JournalError>;

impl JournalError {
    /// 사용자 입력(파일 내용, 인자)이 원인인 에러인지 확인합니다.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            JournalError::InvalidInput(_) | JournalError::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for JournalError {
    fn from(err: config::ConfigError) -> Self {
        JournalError::Config(err.to_string())
    }
}

impl From<std::io::Error> for JournalError {
    fn from(err: std::io::Error) -> Self {
        JournalError::Io(err.to_string())
    }
}
