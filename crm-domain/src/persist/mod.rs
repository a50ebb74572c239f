//! 持久化端口（Persist）
//!
//! 定义仓储与缓存的领域层接口：`Repository` 是各模块实体仓储的
//! 统一形状，`CacheStore` 是读路径与校验备忘共用的 TTL 缓存端口。

mod cache;
mod cache_inmemory;
mod repository;

pub use cache::{CacheStore, cache_key};
pub use cache_inmemory::InMemoryCacheStore;
pub use repository::Repository;
