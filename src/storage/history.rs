//! 변환 기록
//!
//! 변환 한 건마다 JSON 한 줄을 파일 끝에 덧붙입니다 (JSON Lines).
//! 읽을 수 없는 줄은 경고만 남기고 건너뜁니다.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// 변환 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionKind {
    Text,
    Docx,
}

/// 변환 한 건
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRecord {
    #[serde(rename = "type")]
    pub conversion_type: ConversionKind,
    /// 입력 글자 수 (문서는 0)
    pub text_length: usize,
    pub file_name: Option<String>,
    /// 유닉스 초
    pub timestamp: u64,
}

impl ConversionRecord {
    pub fn text(text_length: usize) -> Self {
        Self {
            conversion_type: ConversionKind::Text,
            text_length,
            file_name: None,
            timestamp: unix_now(),
        }
    }

    pub fn docx(file_name: impl Into<String>) -> Self {
        Self {
            conversion_type: ConversionKind::Docx,
            text_length: 0,
            file_name: Some(file_name.into()),
            timestamp: unix_now(),
        }
    }
}

/// 변환 통계
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub total_conversions: usize,
    /// 최신순
    pub recent_conversions: Vec<ConversionRecord>,
}

/// 변환 기록 파일
#[derive(Debug, Clone)]
pub struct ConversionLog {
    path: PathBuf,
}

impl ConversionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 기록 한 건 추가
    pub fn record(&self, record: &ConversionRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// 전체 건수와 최근 `recent` 건
    pub fn stats(&self, recent: usize) -> io::Result<ConversionStats> {
        let records = self.read_all()?;
        let recent_conversions = records.iter().rev().take(recent).cloned().collect();
        Ok(ConversionStats {
            total_conversions: records.len(),
            recent_conversions,
        })
    }

    fn read_all(&self) -> io::Result<Vec<ConversionRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut records = Vec::new();
        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("변환 기록 {}행 무시: {}", number + 1, e),
            }
        }
        Ok(records)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
