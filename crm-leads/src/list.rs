//! 线索列表（lead.list，只读）
//!
use crate::filters::{LeadFilters, LeadSortField};
use crate::lead::Lead;
use crate::repository::LeadRepository;
use async_trait::async_trait;
use crm_application::context::AppContext;
use crm_application::error::AppError;
use crm_application::query::Query;
use crm_application::query_handler::QueryHandler;
use crm_domain::pagination::{PageRequest, PageResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLeadsQuery {
    #[serde(default)]
    pub filters: LeadFilters,
    #[serde(default)]
    pub page: PageRequest<LeadSortField>,
}

impl Query for ListLeadsQuery {
    const NAME: &'static str = "lead.list";
    type Item = Lead;
}

/// 列表查询直达仓储；缓存决策在仓储装饰器内完成
pub struct ListLeadsHandler<R> {
    leads: R,
}

impl<R: LeadRepository> ListLeadsHandler<R> {
    pub fn new(leads: R) -> Self {
        Self { leads }
    }
}

#[async_trait]
impl<R: LeadRepository> QueryHandler<ListLeadsQuery> for ListLeadsHandler<R> {
    async fn handle(
        &self,
        _ctx: &AppContext,
        query: ListLeadsQuery,
    ) -> Result<PageResult<Lead>, AppError> {
        Ok(self.leads.paginate(&query.filters, &query.page).await?)
    }
}
