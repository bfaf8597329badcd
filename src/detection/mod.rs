//! 문자 체계 자동 감지 모듈

mod classifier;

pub use classifier::{classify, Script, ScriptCounts};
