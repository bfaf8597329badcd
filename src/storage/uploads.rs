//! 업로드 파일 저장소
//!
//! 업로드된 DOCX는 `<uuid>.docx`, 변환 결과는 `converted_<uuid>.docx` 로 저장됩니다.
//! 변환 중인 파일 옆에는 `<이름>.lock` 표시 파일을 두어, 다른 프로세스의 정리 작업도
//! 그 파일을 지우지 않게 합니다.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::document::{partial_path, DocumentError};

/// 허용하는 업로드 확장자
const DOCX_EXTENSION: &str = "docx";

/// 변환 결과 파일 이름 접두사
const CONVERTED_PREFIX: &str = "converted_";

/// 진행 중 표시 파일 확장자
pub const LOCK_EXTENSION: &str = "lock";

/// 저장된 업로드 파일
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// 파일 식별자 (uuid)
    pub id: String,
    /// 저장 경로
    pub path: PathBuf,
}

/// 업로드 디렉토리 관리자
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_bytes: u64,
}

impl UploadStore {
    /// 디렉토리를 만들고 저장소 생성
    pub fn new(dir: impl Into<PathBuf>, max_bytes: u64) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, max_bytes })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 업로드 검증 후 저장
    ///
    /// 확장자가 .docx 가 아니거나 크기 제한을 넘으면 `InvalidInput`
    pub fn save_upload(&self, bytes: &[u8], filename: &str) -> Result<UploadedFile, DocumentError> {
        if !has_docx_extension(filename) {
            return Err(DocumentError::invalid_input("Faqat .docx fayllarni yuklash mumkin"));
        }
        if bytes.is_empty() {
            return Err(DocumentError::invalid_input("Fayl bo'sh"));
        }
        if bytes.len() as u64 > self.max_bytes {
            return Err(DocumentError::invalid_input(format!(
                "Fayl hajmi {}MB dan oshmasligi kerak",
                self.max_bytes / (1024 * 1024)
            )));
        }

        let id = Uuid::new_v4().to_string();
        let path = self.dir.join(format!("{}.{}", id, DOCX_EXTENSION));
        fs::write(&path, bytes)?;
        log::debug!("업로드 저장: {} ({} bytes)", path.display(), bytes.len());

        Ok(UploadedFile { id, path })
    }

    /// 변환 결과 파일 경로
    pub fn converted_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}{}.{}", CONVERTED_PREFIX, id, DOCX_EXTENSION))
    }

    /// 변환 결과 파일 찾기 (정리되었거나 없는 경우 `InvalidInput`)
    pub fn find_converted(&self, id: &str) -> Result<PathBuf, DocumentError> {
        if !is_valid_id(id) {
            return Err(DocumentError::invalid_input("Fayl topilmadi"));
        }
        let path = self.converted_path(id);
        if path.is_file() {
            Ok(path)
        } else {
            Err(DocumentError::invalid_input("Fayl topilmadi"))
        }
    }

    /// 경로들에 진행 중 표시 파일을 만들고, 반환된 가드가 해제될 때 지움
    ///
    /// 출력 파일의 쓰기 중 경로(.part)도 함께 표시합니다.
    /// 표시 파일은 같은 디렉토리를 보는 모든 프로세스의 정리 작업이 확인합니다.
    pub fn begin(&self, paths: &[&Path]) -> io::Result<InProgressGuard> {
        let mut guard = InProgressGuard {
            locks: Vec::with_capacity(paths.len() * 2),
        };
        let pid = std::process::id().to_string();

        for path in paths {
            for target in [path.to_path_buf(), partial_path(path)] {
                let lock = lock_path(&target);
                // 실패하면 지금까지 만든 표시 파일은 가드가 지움
                fs::write(&lock, &pid)?;
                guard.locks.push(lock);
            }
        }

        Ok(guard)
    }

    /// 파일 삭제 (없으면 무시)
    pub fn remove(&self, path: &Path) {
        remove_quietly(path);
    }
}

/// 진행 중 표시 가드
#[derive(Debug)]
pub struct InProgressGuard {
    locks: Vec<PathBuf>,
}

impl Drop for InProgressGuard {
    fn drop(&mut self) {
        for lock in &self.locks {
            remove_quietly(lock);
        }
    }
}

/// `a.docx` → `a.docx.lock`
pub fn lock_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".");
    name.push(LOCK_EXTENSION);
    path.with_file_name(name)
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            log::warn!("파일 삭제 실패 {}: {}", path.display(), e);
        }
    }
}

fn has_docx_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(DOCX_EXTENSION))
}

/// 경로 조작을 막기 위해 uuid 형식만 허용
fn is_valid_id(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}
