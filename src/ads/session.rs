//! 세션별 광고 노출 기록
//!
//! 세션마다 이미 본 광고 id를 기억하여 같은 광고를 두 번 띄우지 않습니다.
//! 기록은 JSON 파일로 저장하여 CLI 호출 사이에도 유지되고,
//! 오래된 세션은 `evict_expired` 로 정리합니다.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use super::error::AdsError;
use super::store::{AdStore, Advertisement};

/// 세션 토큰 길이
const TOKEN_LEN: usize = 22;

/// 세션 하나의 상태
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    shown_ads: HashSet<u64>,
    last_seen: SystemTime,
}

impl SessionState {
    fn new(now: SystemTime) -> Self {
        Self {
            shown_ads: HashSet::new(),
            last_seen: now,
        }
    }
}

/// 세션 저장소
#[derive(Debug)]
pub struct SessionTracker {
    sessions: Mutex<HashMap<String, SessionState>>,
    ttl: Duration,
}

impl SessionTracker {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// 파일에서 세션 기록 로드 (파일이 없으면 빈 기록)
    pub fn load(path: &Path, ttl: Duration) -> Result<Self, AdsError> {
        let sessions = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            sessions: Mutex::new(sessions),
            ttl,
        })
    }

    /// 세션 기록 저장 (임시 파일에 쓴 뒤 교체)
    pub fn save(&self, path: &Path) -> Result<(), AdsError> {
        let json = {
            let sessions = self
                .sessions
                .lock()
                .map_err(|_| AdsError::InvalidInput("세션 잠금 오염".into()))?;
            serde_json::to_string(&*sessions)?
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        log::debug!("세션 기록 저장: {}", path.display());
        Ok(())
    }

    /// 알려진 세션이면 그 id를, 아니면 새 토큰 발급
    pub fn open(&self, session_id: Option<&str>) -> String {
        let now = SystemTime::now();
        let Ok(mut sessions) = self.sessions.lock() else {
            return new_token();
        };

        if let Some(id) = session_id {
            if let Some(state) = sessions.get_mut(id) {
                state.last_seen = now;
                return id.to_string();
            }
        }

        let id = new_token();
        sessions.insert(id.clone(), SessionState::new(now));
        id
    }

    pub fn mark_shown(&self, session_id: &str, ad_id: u64) {
        if let Ok(mut sessions) = self.sessions.lock() {
            let state = sessions
                .entry(session_id.to_string())
                .or_insert_with(|| SessionState::new(SystemTime::now()));
            state.shown_ads.insert(ad_id);
            state.last_seen = SystemTime::now();
        }
    }

    pub fn has_seen(&self, session_id: &str, ad_id: u64) -> bool {
        self.sessions
            .lock()
            .map(|sessions| {
                sessions
                    .get(session_id)
                    .is_some_and(|state| state.shown_ads.contains(&ad_id))
            })
            .unwrap_or(false)
    }

    /// `now` 기준 TTL 이 지난 세션 삭제, 삭제한 수 반환
    pub fn evict_expired(&self, now: SystemTime) -> usize {
        let Ok(mut sessions) = self.sessions.lock() else {
            return 0;
        };
        let before = sessions.len();
        sessions.retain(|_, state| {
            now.duration_since(state.last_seen)
                .map(|age| age <= self.ttl)
                .unwrap_or(true)
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            log::debug!("만료 세션 {}개 정리", evicted);
        }
        evicted
    }

    /// 기록 중인 세션 수
    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }
}

fn new_token() -> String {
    (0..TOKEN_LEN).map(|_| fastrand::alphanumeric()).collect()
}

/// 세션에 보여줄 다음 광고
///
/// 광고가 꺼져 있거나 활성 광고가 없으면 None. 무작위로 고른 광고를
/// 이 세션이 이미 봤어도 None (다른 광고를 다시 고르지 않음).
pub fn next_ad_for(
    session_id: &str,
    store: &AdStore,
    tracker: &SessionTracker,
) -> Option<Advertisement> {
    if !store.settings().ads_enabled {
        return None;
    }

    let active = store.active_ads();
    if active.is_empty() {
        return None;
    }

    let ad = active[fastrand::usize(..active.len())];
    if tracker.has_seen(session_id, ad.id) {
        return None;
    }

    tracker.mark_shown(session_id, ad.id);
    Some(ad.clone())
}
