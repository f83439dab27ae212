//! # Journal Core
//!
//! 매매일지의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 매매일지 전반에서 사용되는 기본 타입을 제공합니다:
//! - 거래 기록 (옵션/주식 단일 거래)
//! - 날짜 정규화 (이기종 날짜 표현 → `YYYY-MM-DD`)
//! - 설정 관리
//! - 로깅 인프라
//! - 에러 타입

pub mod config;
pub mod date;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use date::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
