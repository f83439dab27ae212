//! 매매일지 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 거래 내보내기 파일(JSON) 로드
//! - 필터 인자 해석
//! - 분석 엔진 결과를 JSON으로 렌더링

pub mod commands;

pub use commands::*;
