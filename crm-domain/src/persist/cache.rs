//! 缓存端口（CacheStore）
//!
//! 仅暴露 `get`/`put` 两个操作：读路径的页缓存与校验备忘都依赖
//! TTL 过期达成最终一致，不提供写路径失效钩子（陈旧窗口即 TTL）。
//!
use crate::error::DomainResult;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// TTL 缓存端口
///
/// 实现可以是进程内的（见 [`InMemoryCacheStore`]）或集群级的。
/// 同一键上的并发写互相覆盖是可接受的：写入方都是从同一过滤器
/// 集合计算出相同的值（幂等覆盖）。
///
/// [`InMemoryCacheStore`]: crate::persist::InMemoryCacheStore
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> DomainResult<Option<Value>>;

    async fn put(&self, key: &str, value: Value, ttl: Duration) -> DomainResult<()>;
}

/// 由任意可序列化内容派生确定性缓存键
///
/// 键形如 `{namespace}:{hex(sha256(canonical_json))}`。同一内容在
/// 任何进程中得到同一键；内容的规范化由 serde 的字段声明顺序保证。
pub fn cache_key<T: Serialize>(namespace: &str, content: &T) -> DomainResult<String> {
    let canonical = serde_json::to_string(content)?;
    let digest = Sha256::digest(canonical.as_bytes());
    Ok(format!("{namespace}:{}", hex::encode(digest)))
}
