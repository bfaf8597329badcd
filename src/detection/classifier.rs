//! 라틴/키릴 문자 체계 판별
//!
//! 키릴 문자 수가 라틴 문자 수보다 많을 때만 키릴로 판정합니다.
//! 동률이거나 둘 다 0 이면 라틴으로 판정합니다.

use serde::{Deserialize, Serialize};

use crate::core::unicode::{is_latin_letter, is_uzbek_cyrillic};

/// 문자 체계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Latin,
    Cyrillic,
}

impl Script {
    pub fn as_str(&self) -> &'static str {
        match self {
            Script::Latin => "latin",
            Script::Cyrillic => "cyrillic",
        }
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 문자 체계별 글자 수
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptCounts {
    pub latin: usize,
    pub cyrillic: usize,
}

impl ScriptCounts {
    /// 텍스트의 라틴/키릴 글자 수 집계
    pub fn of(text: &str) -> Self {
        let mut counts = Self::default();
        for c in text.chars() {
            if is_uzbek_cyrillic(c) {
                counts.cyrillic += 1;
            } else if is_latin_letter(c) {
                counts.latin += 1;
            }
        }
        counts
    }

    /// 우세한 문자 체계 (동률이면 라틴)
    pub fn dominant(&self) -> Script {
        if self.cyrillic > self.latin {
            Script::Cyrillic
        } else {
            Script::Latin
        }
    }
}

/// 텍스트가 라틴인지 키릴인지 판별
pub fn classify(text: &str) -> Script {
    ScriptCounts::of(text).dominant()
}
