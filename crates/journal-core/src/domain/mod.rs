//! 매매일지 도메인 모델.

mod record;
mod trade;

pub use record::*;
pub use trade::*;
