//! 通用仓储接口
//!
//! 各模块实体仓储的统一形状：按 id 读写删，外加按过滤器分页读取。
//! 过滤器与排序字段类型由实现方以具名结构/封闭枚举提供。
//!
use crate::error::DomainResult;
use crate::pagination::{PageRequest, PageResult};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait Repository<T>: Send + Sync {
    type Id: Send + Sync;
    type Filters: Send + Sync;
    type Sort: Send + Sync;

    async fn find(&self, id: &Self::Id) -> DomainResult<Option<T>>;

    async fn save(&self, entity: &T) -> DomainResult<()>;

    async fn delete(&self, id: &Self::Id) -> DomainResult<()>;

    /// 按过滤器分页读取；无中间写入时重复调用必须返回逐字节一致的页
    async fn paginate(
        &self,
        filters: &Self::Filters,
        page: &PageRequest<Self::Sort>,
    ) -> DomainResult<PageResult<T>>;
}

#[async_trait]
impl<T, R> Repository<T> for Arc<R>
where
    T: Send + Sync + 'static,
    R: Repository<T> + ?Sized,
{
    type Id = R::Id;
    type Filters = R::Filters;
    type Sort = R::Sort;

    async fn find(&self, id: &Self::Id) -> DomainResult<Option<T>> {
        (**self).find(id).await
    }

    async fn save(&self, entity: &T) -> DomainResult<()> {
        (**self).save(entity).await
    }

    async fn delete(&self, id: &Self::Id) -> DomainResult<()> {
        (**self).delete(id).await
    }

    async fn paginate(
        &self,
        filters: &Self::Filters,
        page: &PageRequest<Self::Sort>,
    ) -> DomainResult<PageResult<T>> {
        (**self).paginate(filters, page).await
    }
}
