//! 会话活动时间戳
//!
//! 每次登录生成一个会话 ID（写入 JWT 的 `sid`），缓存中保存
//! `session:{sid}` → 最近一次活动的 Unix 秒。超过无操作时限的会话视为过期。

use super::{CacheResult, ObjectCache};

/// 会话检查结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Expired,
    /// 缓存后端不可用，无法判断
    Unknown,
}

fn session_key(sid: &str) -> String {
    format!("session:{sid}")
}

/// 距上次活动是否已超过无操作时限
pub fn is_idle_expired(last_seen: i64, now: i64, idle_seconds: i64) -> bool {
    now - last_seen > idle_seconds
}

/// 登录时写入首个活动时间戳
pub async fn start_session(cache: &dyn ObjectCache, sid: &str, now: i64, idle_seconds: i64) {
    cache
        .insert_raw(session_key(sid), now.to_string(), idle_seconds.max(1) as u64)
        .await;
}

/// 检查会话并在仍有效时刷新时间戳
pub async fn touch_session(
    cache: &dyn ObjectCache,
    sid: &str,
    now: i64,
    idle_seconds: i64,
) -> SessionState {
    let last_seen = match cache.get_raw(&session_key(sid)).await {
        CacheResult::Found(raw) => raw.parse::<i64>().ok(),
        CacheResult::NotFound => None,
        CacheResult::ExistsButNoValue => return SessionState::Unknown,
    };

    match last_seen {
        Some(ts) if !is_idle_expired(ts, now, idle_seconds) => {
            start_session(cache, sid, now, idle_seconds).await;
            SessionState::Active
        }
        Some(_) => {
            end_session(cache, sid).await;
            SessionState::Expired
        }
        None => SessionState::Expired,
    }
}

/// 注销时删除时间戳
pub async fn end_session(cache: &dyn ObjectCache, sid: &str) {
    cache.remove(&session_key(sid)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapCache(Mutex<HashMap<String, String>>);

    #[async_trait]
    impl ObjectCache for MapCache {
        async fn get_raw(&self, key: &str) -> CacheResult<String> {
            match self.0.lock().unwrap().get(key) {
                Some(v) => CacheResult::Found(v.clone()),
                None => CacheResult::NotFound,
            }
        }

        async fn insert_raw(&self, key: String, value: String, _ttl: u64) {
            self.0.lock().unwrap().insert(key, value);
        }

        async fn remove(&self, key: &str) {
            self.0.lock().unwrap().remove(key);
        }

        async fn invalidate_all(&self) {
            self.0.lock().unwrap().clear();
        }
    }

    #[test]
    fn test_idle_boundary() {
        assert!(!is_idle_expired(1_000, 2_800, 1_800));
        assert!(is_idle_expired(1_000, 2_801, 1_800));
    }

    #[tokio::test]
    async fn test_activity_slides_window() {
        let cache = MapCache::default();
        start_session(&cache, "abc", 1_000, 1_800).await;

        assert_eq!(touch_session(&cache, "abc", 2_500, 1_800).await, SessionState::Active);
        // 上次活动刷新为 2500，4000 仍在窗口内
        assert_eq!(touch_session(&cache, "abc", 4_000, 1_800).await, SessionState::Active);
        assert_eq!(touch_session(&cache, "abc", 6_000, 1_800).await, SessionState::Expired);
        // 过期后时间戳被删除
        assert_eq!(touch_session(&cache, "abc", 6_001, 1_800).await, SessionState::Expired);
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let cache = MapCache::default();
        start_session(&cache, "s1", 10, 60).await;
        end_session(&cache, "s1").await;
        assert_eq!(touch_session(&cache, "s1", 11, 60).await, SessionState::Expired);
    }
}
