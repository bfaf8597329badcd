//! 업로드 디렉토리 정리 작업
//!
//! 오래된 업로드/변환 파일을 주기적으로 삭제합니다. 옆에 `.lock` 표시 파일이 있는
//! 파일은 어느 프로세스가 만든 것이든 건너뛰고, 다른 작업이 먼저 지운 파일(NotFound)은
//! 조용히 무시합니다. 표시 파일 자체는 오래 남아 있을 때만(비정상 종료) 지웁니다.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};

use super::uploads::{lock_path, LOCK_EXTENSION};

/// 이보다 오래된 표시 파일은 비정상 종료로 남은 것으로 봄
const STALE_LOCK_AGE: Duration = Duration::from_secs(60 * 60);

/// 정리 한 번의 결과
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    /// 삭제한 파일
    pub removed: Vec<PathBuf>,
    /// 변환 중이라 건너뛴 파일 수
    pub skipped: usize,
}

/// 업로드 디렉토리 정리기
#[derive(Debug, Clone)]
pub struct Janitor {
    dir: PathBuf,
    max_age: Duration,
}

impl Janitor {
    pub fn new(dir: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            dir: dir.into(),
            max_age,
        }
    }

    /// `now` 기준으로 max_age 보다 오래된 파일 삭제
    pub fn sweep(&self, now: SystemTime) -> SweepReport {
        let mut report = SweepReport::default();

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("정리 디렉토리 읽기 실패 {}: {}", self.dir.display(), e);
                }
                return report;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            let max_age = if is_lock_file(&path) {
                STALE_LOCK_AGE.max(self.max_age)
            } else {
                self.max_age
            };
            if !metadata.is_file() || !is_expired(&metadata, max_age, now) {
                continue;
            }
            if lock_path(&path).exists() {
                report.skipped += 1;
                continue;
            }

            match fs::remove_file(&path) {
                Ok(()) => {
                    log::debug!("오래된 파일 삭제: {}", path.display());
                    report.removed.push(path);
                }
                // 다른 작업이 이미 삭제
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => log::warn!("파일 삭제 실패 {}: {}", path.display(), e),
            }
        }

        if !report.removed.is_empty() {
            log::info!("정리: {}개 파일 삭제", report.removed.len());
        }
        report
    }

    /// 백그라운드 스레드에서 주기적으로 정리
    ///
    /// 반환된 핸들이 drop 되면 스레드가 종료됩니다.
    pub fn spawn(self, interval: Duration) -> std::io::Result<JanitorHandle> {
        let (stop, stopped) = mpsc::channel::<()>();
        let thread = thread::Builder::new()
            .name("latinify-janitor".into())
            .spawn(move || loop {
                self.sweep(SystemTime::now());
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    _ => break,
                }
            })?;

        Ok(JanitorHandle {
            stop: Some(stop),
            thread: Some(thread),
        })
    }
}

fn is_expired(metadata: &fs::Metadata, max_age: Duration, now: SystemTime) -> bool {
    metadata
        .modified()
        .ok()
        .and_then(|modified| now.duration_since(modified).ok())
        .is_some_and(|age| age > max_age)
}

fn is_lock_file(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == LOCK_EXTENSION)
}

/// 실행 중인 정리 스레드 핸들
#[derive(Debug)]
pub struct JanitorHandle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl Drop for JanitorHandle {
    fn drop(&mut self) {
        self.stop.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("정리 스레드 패닉");
            }
        }
    }
}
