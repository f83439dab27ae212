//! CLI 명령어 구현 모듈.

pub mod input;
pub mod report;

pub use input::{load_trades, parse_trades};
pub use report::{render, FilterOptions, Report};
