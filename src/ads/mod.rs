//! 광고 관리
//!
//! 광고 목록과 전역 설정, 세션별 노출 기록은 각각 JSON 파일에 둡니다.

mod error;
mod session;
mod store;

pub use error::AdsError;
pub use session::{next_ad_for, SessionState, SessionTracker};
pub use store::{AdSettings, AdStats, AdStore, Advertisement, NewAdvertisement};
