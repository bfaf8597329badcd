//! 광고 저장소 (JSON 파일)
//!
//! `{ next_id, ads, settings }` 하나의 문서로 저장하며, 변경할 때마다 다시 씁니다.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::AdsError;

/// 허용하는 광고 이미지 확장자
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// 광고 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advertisement {
    pub id: u64,
    /// 저장된 이미지 경로
    pub image_path: PathBuf,
    /// 이미지 아래 문구
    pub title_text: String,
    /// 클릭 시 이동할 주소
    pub redirect_url: String,
    pub active: bool,
    /// 표시 전 대기 시간 (초)
    pub display_delay_seconds: u32,
    /// 생성 시각 (유닉스 초)
    pub created_at: u64,
}

/// 전역 광고 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdSettings {
    #[serde(default = "default_ads_enabled")]
    pub ads_enabled: bool,
    #[serde(default = "default_modal_delay_seconds")]
    pub modal_delay_seconds: u32,
}

fn default_ads_enabled() -> bool {
    true
}

fn default_modal_delay_seconds() -> u32 {
    5
}

impl Default for AdSettings {
    fn default() -> Self {
        Self {
            ads_enabled: default_ads_enabled(),
            modal_delay_seconds: default_modal_delay_seconds(),
        }
    }
}

/// 새 광고 입력
#[derive(Debug, Clone)]
pub struct NewAdvertisement {
    pub title_text: String,
    pub redirect_url: String,
    pub display_delay_seconds: u32,
    pub active: bool,
}

impl NewAdvertisement {
    pub fn new(title_text: impl Into<String>, redirect_url: impl Into<String>) -> Self {
        Self {
            title_text: title_text.into(),
            redirect_url: redirect_url.into(),
            display_delay_seconds: default_modal_delay_seconds(),
            active: true,
        }
    }
}

/// 광고 통계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdStats {
    pub total_ads: usize,
    pub active_ads: usize,
}

/// 파일에 저장되는 내용
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AdData {
    #[serde(default = "default_next_id")]
    next_id: u64,
    #[serde(default)]
    ads: Vec<Advertisement>,
    #[serde(default)]
    settings: AdSettings,
}

fn default_next_id() -> u64 {
    1
}

impl Default for AdData {
    fn default() -> Self {
        Self {
            next_id: default_next_id(),
            ads: Vec::new(),
            settings: AdSettings::default(),
        }
    }
}

/// 광고 저장소
#[derive(Debug)]
pub struct AdStore {
    path: PathBuf,
    image_dir: PathBuf,
    max_image_bytes: u64,
    data: AdData,
}

impl AdStore {
    /// 저장 파일 열기 (없으면 빈 저장소)
    pub fn open(
        path: impl Into<PathBuf>,
        image_dir: impl Into<PathBuf>,
        max_image_bytes: u64,
    ) -> Result<Self, AdsError> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AdData::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            image_dir: image_dir.into(),
            max_image_bytes,
            data,
        })
    }

    /// 최신순 광고 목록
    pub fn list(&self) -> Vec<&Advertisement> {
        let mut ads: Vec<_> = self.data.ads.iter().collect();
        ads.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        ads
    }

    pub fn get(&self, id: u64) -> Option<&Advertisement> {
        self.data.ads.iter().find(|ad| ad.id == id)
    }

    /// 이미지 저장 후 광고 생성
    pub fn create(
        &mut self,
        new: NewAdvertisement,
        image: &[u8],
        image_name: &str,
    ) -> Result<Advertisement, AdsError> {
        let image_path = self.save_image(image, image_name)?;

        let ad = Advertisement {
            id: self.data.next_id,
            image_path,
            title_text: new.title_text,
            redirect_url: new.redirect_url,
            active: new.active,
            display_delay_seconds: new.display_delay_seconds,
            created_at: unix_now(),
        };
        self.data.next_id += 1;
        self.data.ads.push(ad.clone());

        if let Err(e) = self.persist() {
            // 저장 실패 시 메모리 상태와 이미지 되돌림
            self.data.ads.pop();
            self.data.next_id -= 1;
            remove_image(&ad.image_path);
            return Err(e);
        }

        log::info!("광고 생성: #{} {}", ad.id, ad.title_text);
        Ok(ad)
    }

    /// 활성 상태 반전, 새 상태 반환
    pub fn toggle(&mut self, id: u64) -> Result<bool, AdsError> {
        let ad = self
            .data
            .ads
            .iter_mut()
            .find(|ad| ad.id == id)
            .ok_or(AdsError::NotFound(id))?;
        ad.active = !ad.active;
        let active = ad.active;
        self.persist()?;
        Ok(active)
    }

    /// 광고와 이미지 삭제
    pub fn delete(&mut self, id: u64) -> Result<(), AdsError> {
        let index = self
            .data
            .ads
            .iter()
            .position(|ad| ad.id == id)
            .ok_or(AdsError::NotFound(id))?;
        let ad = self.data.ads.remove(index);
        self.persist()?;

        // 이미지 디렉토리 밖의 파일은 건드리지 않음
        if ad.image_path.starts_with(&self.image_dir) {
            remove_image(&ad.image_path);
        }
        log::info!("광고 삭제: #{}", id);
        Ok(())
    }

    pub fn settings(&self) -> AdSettings {
        self.data.settings
    }

    pub fn update_settings(&mut self, settings: AdSettings) -> Result<(), AdsError> {
        self.data.settings = settings;
        self.persist()
    }

    /// 활성 광고 목록
    pub fn active_ads(&self) -> Vec<&Advertisement> {
        self.data.ads.iter().filter(|ad| ad.active).collect()
    }

    pub fn stats(&self) -> AdStats {
        AdStats {
            total_ads: self.data.ads.len(),
            active_ads: self.data.ads.iter().filter(|ad| ad.active).count(),
        }
    }

    fn save_image(&self, image: &[u8], image_name: &str) -> Result<PathBuf, AdsError> {
        let extension = Path::new(image_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .filter(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
            .ok_or_else(|| AdsError::InvalidInput("Faqat rasm fayllari".into()))?;

        if image.is_empty() {
            return Err(AdsError::InvalidInput("Rasm bo'sh".into()));
        }
        if image.len() as u64 > self.max_image_bytes {
            return Err(AdsError::InvalidInput(format!(
                "Rasm hajmi {}MB dan oshmasligi kerak",
                self.max_image_bytes / (1024 * 1024)
            )));
        }

        fs::create_dir_all(&self.image_dir)?;
        let path = self
            .image_dir
            .join(format!("ad_{}.{}", Uuid::new_v4(), extension));
        fs::write(&path, image)?;
        Ok(path)
    }

    /// 임시 파일에 쓴 뒤 교체
    fn persist(&self) -> Result<(), AdsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn remove_image(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            log::warn!("광고 이미지 삭제 실패 {}: {}", path.display(), e);
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn open(dir: &Path) -> AdStore {
        AdStore::open(dir.join("ads.json"), dir.join("ads"), 1024).unwrap()
    }

    #[test]
    fn test_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(dir.path());
        assert!(store.list().is_empty());
        assert_eq!(store.settings(), AdSettings::default());
        assert!(store.settings().ads_enabled);
        assert_eq!(store.settings().modal_delay_seconds, 5);
    }

    #[test]
    fn test_create_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(dir.path());
        let ad = store
            .create(NewAdvertisement::new("Kitoblar", "https://example.uz"), PNG, "banner.PNG")
            .unwrap();
        assert_eq!(ad.id, 1);
        assert!(ad.image_path.starts_with(dir.path().join("ads")));
        assert_eq!(fs::read(&ad.image_path).unwrap(), PNG);

        let second = store
            .create(NewAdvertisement::new("Kurslar", "https://example.uz/k"), PNG, "b.jpg")
            .unwrap();
        assert_eq!(second.id, 2);

        let reopened = open(dir.path());
        assert_eq!(reopened.list().len(), 2);
        // 최신순
        assert_eq!(reopened.list()[0].id, 2);
        assert_eq!(reopened.get(1), Some(&ad));
    }

    #[test]
    fn test_create_rejects_bad_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(dir.path());
        let new = NewAdvertisement::new("A", "https://example.uz");

        let err = store.create(new.clone(), PNG, "hujjat.docx").unwrap_err();
        assert_eq!(err.to_string(), "Faqat rasm fayllari");

        let big = vec![0u8; 2048];
        assert!(matches!(
            store.create(new, &big, "a.png"),
            Err(AdsError::InvalidInput(_))
        ));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_toggle_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(dir.path());
        let ad = store
            .create(NewAdvertisement::new("A", "https://example.uz"), PNG, "a.png")
            .unwrap();

        assert_eq!(store.stats(), AdStats { total_ads: 1, active_ads: 1 });
        assert!(!store.toggle(ad.id).unwrap());
        assert!(store.active_ads().is_empty());
        assert_eq!(store.stats(), AdStats { total_ads: 1, active_ads: 0 });
        assert!(store.toggle(ad.id).unwrap());

        assert!(matches!(store.toggle(99), Err(AdsError::NotFound(99))));
    }

    #[test]
    fn test_delete_removes_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(dir.path());
        let ad = store
            .create(NewAdvertisement::new("A", "https://example.uz"), PNG, "a.webp")
            .unwrap();

        store.delete(ad.id).unwrap();
        assert!(!ad.image_path.exists());
        assert!(store.get(ad.id).is_none());
        assert!(store.delete(ad.id).is_err());
    }

    #[test]
    fn test_update_settings_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(dir.path());
        let settings = AdSettings {
            ads_enabled: false,
            modal_delay_seconds: 10,
        };
        store.update_settings(settings).unwrap();
        assert_eq!(open(dir.path()).settings(), settings);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ads.json"), "{ not json").unwrap();
        let result = AdStore::open(dir.path().join("ads.json"), dir.path().join("ads"), 1024);
        assert!(matches!(result, Err(AdsError::ParseError(_))));
    }
}
