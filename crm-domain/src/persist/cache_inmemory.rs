//! 内存版 TTL 缓存（InMemoryCacheStore）
//!
//! 基于 `DashMap` 的进程内缓存：写入时记录过期时刻，读取时惰性
//! 清理已过期条目。适合测试与单进程部署。

use crate::error::DomainResult;
use crate::persist::CacheStore;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::time::{Duration, Instant};

#[derive(Default)]
pub struct InMemoryCacheStore {
    entries: DashMap<String, (Value, Instant)>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前存活条目数（含尚未惰性清理的过期条目）
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> DomainResult<Option<Value>> {
        if let Some(entry) = self.entries.get(key) {
            let (value, deadline) = entry.value();
            if Instant::now() < *deadline {
                return Ok(Some(value.clone()));
            }
        }
        // 过期条目在读取时移除
        self.entries.remove(key);
        Ok(None)
    }

    async fn put(&self, key: &str, value: Value, ttl: Duration) -> DomainResult<()> {
        self.entries
            .insert(key.to_string(), (value, Instant::now() + ttl));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn get_returns_what_was_put_within_ttl() {
        let cache = InMemoryCacheStore::new();
        cache
            .put("k", json!({"total": 3}), Duration::from_secs(300))
            .await
            .unwrap();

        assert_eq!(cache.get("k").await.unwrap(), Some(json!({"total": 3})));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn expired_entries_are_gone() {
        let cache = InMemoryCacheStore::new();
        cache
            .put("k", json!(1), Duration::from_millis(20))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn missing_key_is_none() {
        let cache = InMemoryCacheStore::new();
        assert_eq!(cache.get("nope").await.unwrap(), None);
    }
}
