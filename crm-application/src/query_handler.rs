use crate::{context::AppContext, error::AppError, query::Query};
use async_trait::async_trait;
use crm_domain::pagination::PageResult;

/// 查询处理器：执行一个只读分页操作
#[async_trait]
pub trait QueryHandler<Q>: Send + Sync
where
    Q: Query,
{
    async fn handle(&self, ctx: &AppContext, query: Q) -> Result<PageResult<Q::Item>, AppError>;
}
