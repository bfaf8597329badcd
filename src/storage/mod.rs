//! 업로드 저장소, 정리 작업, 변환 기록

mod history;
mod janitor;
mod uploads;

pub use history::{ConversionKind, ConversionLog, ConversionRecord, ConversionStats};
pub use janitor::{Janitor, JanitorHandle, SweepReport};
pub use uploads::{InProgressGuard, UploadStore, UploadedFile};
