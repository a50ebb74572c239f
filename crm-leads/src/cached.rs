//! 缓存感知的线索读路径
//!
//! 装饰任意 [`LeadRepository`]，按查询形状决定读缓存还是直达存储：
//! 1. 由过滤器规范化内容 + 分页参数派生确定性键；
//! 2. 过滤器不含易变集合 {search, status, segment_id} 时先查缓存，
//!    命中即返回，不触达存储；
//! 3. 未命中（或查询易变）时走内层仓储，缓存可用的读在返回前
//!    以固定 TTL 回填。
//!
//! 写路径不做缓存失效：陈旧窗口由 300 秒 TTL 界定。
//! 同键并发回填互相覆盖是幂等的。
//!
use crate::filters::{LeadFilters, LeadSortField};
use crate::lead::Lead;
use crate::repository::LeadRepository;
use crm_domain::error::DomainResult;
use crm_domain::pagination::{PageRequest, PageResult};
use crm_domain::persist::{CacheStore, Repository, cache_key};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// 页缓存的固定 TTL
pub const LEAD_PAGE_TTL: Duration = Duration::from_secs(300);

pub struct CachedLeadRepository<R> {
    inner: R,
    cache: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl<R: LeadRepository> CachedLeadRepository<R> {
    pub fn new(inner: R, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            inner,
            cache,
            ttl: LEAD_PAGE_TTL,
        }
    }

    /// 覆盖默认 TTL（测试用）
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// 键内容：过滤器 + 分页参数的规范化 JSON
#[derive(Serialize)]
struct PageKey<'a> {
    filters: &'a LeadFilters,
    page: &'a PageRequest<LeadSortField>,
}

fn page_cache_key(
    filters: &LeadFilters,
    page: &PageRequest<LeadSortField>,
) -> DomainResult<String> {
    cache_key("leads:list", &PageKey { filters, page })
}

#[async_trait]
impl<R: LeadRepository> Repository<Lead> for CachedLeadRepository<R> {
    type Id = u64;
    type Filters = LeadFilters;
    type Sort = LeadSortField;

    async fn find(&self, id: &u64) -> DomainResult<Option<Lead>> {
        self.inner.find(id).await
    }

    async fn save(&self, entity: &Lead) -> DomainResult<()> {
        // 写路径不失效页缓存；见模块注释的 TTL 一致性说明
        self.inner.save(entity).await
    }

    async fn delete(&self, id: &u64) -> DomainResult<()> {
        self.inner.delete(id).await
    }

    async fn paginate(
        &self,
        filters: &LeadFilters,
        page: &PageRequest<LeadSortField>,
    ) -> DomainResult<PageResult<Lead>> {
        if !filters.is_cache_eligible() {
            debug!("volatile lead filters, bypassing page cache");
            return self.inner.paginate(filters, page).await;
        }

        let key = page_cache_key(filters, page)?;

        // 缓存故障不拦截读：降级为直达存储
        match self.cache.get(&key).await {
            Ok(Some(value)) => match serde_json::from_value::<PageResult<Lead>>(value) {
                Ok(cached) => {
                    debug!(key, "lead page cache hit");
                    return Ok(cached);
                }
                Err(err) => warn!(key, error = %err, "discarding undecodable cached page"),
            },
            Ok(None) => {}
            Err(err) => warn!(key, error = %err, "lead page cache read failed"),
        }

        let result = self.inner.paginate(filters, page).await?;

        if let Err(err) = self
            .cache
            .put(&key, serde_json::to_value(&result)?, self.ttl)
            .await
        {
            warn!(key, error = %err, "lead page cache write failed");
        }

        Ok(result)
    }
}
