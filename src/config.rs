//! 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Latinify 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LatinifyConfig {
    /// 업로드/변환 파일 디렉토리
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// 광고 데이터와 이미지 디렉토리
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// DOCX 업로드 최대 크기 (바이트)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// 광고 이미지 최대 크기 (바이트)
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
    /// 이 시간보다 오래된 업로드 파일은 삭제 (초)
    #[serde(default = "default_cleanup_max_age_secs")]
    pub cleanup_max_age_secs: u64,
    /// 정리 작업 주기 (초)
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
    /// 문서 변환 워커 스레드 수
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
    /// 광고 세션 유지 시간 (초)
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    /// 변환 기록 남기기
    #[serde(default = "default_conversion_logging")]
    pub conversion_logging: bool,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_max_upload_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_max_image_bytes() -> u64 {
    2 * 1024 * 1024
}

fn default_cleanup_max_age_secs() -> u64 {
    15
}

fn default_cleanup_interval_secs() -> u64 {
    10
}

fn default_worker_threads() -> usize {
    2
}

fn default_session_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_conversion_logging() -> bool {
    true
}

impl Default for LatinifyConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            data_dir: default_data_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            max_image_bytes: default_max_image_bytes(),
            cleanup_max_age_secs: default_cleanup_max_age_secs(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
            worker_threads: default_worker_threads(),
            session_ttl_secs: default_session_ttl_secs(),
            conversion_logging: default_conversion_logging(),
        }
    }
}

impl LatinifyConfig {
    pub fn cleanup_max_age(&self) -> Duration {
        Duration::from_secs(self.cleanup_max_age_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs.max(1))
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// 광고 이미지 디렉토리
    pub fn ads_image_dir(&self) -> PathBuf {
        self.data_dir.join("ads")
    }

    /// 광고 저장 파일
    pub fn ads_store_path(&self) -> PathBuf {
        self.data_dir.join("ads.json")
    }

    /// 광고 세션 기록 파일
    pub fn sessions_path(&self) -> PathBuf {
        self.data_dir.join("sessions.json")
    }

    /// 변환 기록 파일 (JSON Lines)
    pub fn conversion_log_path(&self) -> PathBuf {
        self.data_dir.join("conversions.jsonl")
    }
}

/// 설정 파일 경로: $XDG_CONFIG_HOME/latinify/config.json (없으면 ~/.config)
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(PathBuf::from)
                .filter(|p| p.is_absolute() && p.is_dir())
                .map(|home| home.join(".config"))
        })
        .unwrap_or_else(|| {
            // HOME 미설정이거나 유효하지 않으면 /var/tmp 폴백
            PathBuf::from("/var/tmp")
        });
    base.join("latinify").join("config.json")
}

/// 기본 경로에서 설정 로드
pub fn load_config() -> LatinifyConfig {
    load_config_from(&config_path())
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config_from(path: &Path) -> LatinifyConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("설정 파일 파싱 실패, 기본값 사용: {}", e);
            LatinifyConfig::default()
        }),
        Err(_) => LatinifyConfig::default(),
    }
}

/// 설정 파일 저장
pub fn save_config(config: &LatinifyConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("설정 디렉토리 생성 실패: {}", e))?;
    }
    let json = serde_json::to_string_pretty(config).map_err(|e| format!("직렬화 실패: {}", e))?;
    fs::write(path, json).map_err(|e| format!("설정 파일 저장 실패: {}", e))?;
    Ok(())
}
