//! 线索仓储端口与内存实现
//!
//! `LeadRepository` 是对通用 [`Repository`] 的类型固化；
//! `InMemoryLeadRepository` 按规约的选择性顺序构建过滤查询：
//! 租户/项目范围 → 外键 → 状态 → `search` 子串匹配 → 排序 → 分页。
//!
use crate::filters::{LeadFilters, LeadSortField};
use crate::lead::Lead;
use crm_domain::error::{DomainError, DomainResult};
use crm_domain::pagination::{PageRequest, PageResult, SortDirection};
use async_trait::async_trait;
use dashmap::DashMap;

/// 线索仓储端口
pub trait LeadRepository:
    crm_domain::persist::Repository<Lead, Id = u64, Filters = LeadFilters, Sort = LeadSortField>
{
}

impl<R> LeadRepository for R where
    R: crm_domain::persist::Repository<Lead, Id = u64, Filters = LeadFilters, Sort = LeadSortField>
        + ?Sized
{
}

/// 内存线索仓储（测试与单进程部署）
#[derive(Default)]
pub struct InMemoryLeadRepository {
    leads: DashMap<u64, Lead>,
}

impl InMemoryLeadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leads(leads: impl IntoIterator<Item = Lead>) -> Self {
        let repo = Self::new();
        for lead in leads {
            repo.leads.insert(lead.id, lead);
        }
        repo
    }

    fn matches(lead: &Lead, filters: &LeadFilters) -> bool {
        // 选择性顺序：项目范围 → 负责人 → 分群 → 状态 → 全文子串
        if let Some(project_id) = filters.project_id {
            if lead.project_id != project_id {
                return false;
            }
        }
        if let Some(assigned_to) = filters.assigned_to {
            if lead.assigned_to != Some(assigned_to) {
                return false;
            }
        }
        if let Some(segment_id) = filters.segment_id {
            if lead.segment_id != Some(segment_id) {
                return false;
            }
        }
        if let Some(status) = filters.status {
            if lead.status != status {
                return false;
            }
        }
        if let Some(search) = &filters.search {
            let needle = search.to_lowercase();
            let hit = lead.name.to_lowercase().contains(&needle)
                || lead.email.to_lowercase().contains(&needle)
                || lead.phone.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }

    fn sort(items: &mut [Lead], page: &PageRequest<LeadSortField>) {
        items.sort_by(|a, b| {
            let ordering = match page.sort_field() {
                LeadSortField::CreatedAt => a.created_at.cmp(&b.created_at),
                LeadSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                LeadSortField::Name => a.name.cmp(&b.name),
                LeadSortField::Email => a.email.cmp(&b.email),
                LeadSortField::Status => a.status.cmp(&b.status),
            };
            // id 作为决胜键保证页内容逐字节可复现
            let ordering = ordering.then(a.id.cmp(&b.id));
            match page.sort_direction() {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
}

#[async_trait]
impl crm_domain::persist::Repository<Lead> for InMemoryLeadRepository {
    type Id = u64;
    type Filters = LeadFilters;
    type Sort = LeadSortField;

    async fn find(&self, id: &u64) -> DomainResult<Option<Lead>> {
        Ok(self.leads.get(id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, entity: &Lead) -> DomainResult<()> {
        self.leads.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn delete(&self, id: &u64) -> DomainResult<()> {
        match self.leads.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(format!("lead {id} does not exist"))),
        }
    }

    async fn paginate(
        &self,
        filters: &LeadFilters,
        page: &PageRequest<LeadSortField>,
    ) -> DomainResult<PageResult<Lead>> {
        let mut matched: Vec<Lead> = self
            .leads
            .iter()
            .filter(|entry| Self::matches(entry.value(), filters))
            .map(|entry| entry.value().clone())
            .collect();

        Self::sort(&mut matched, page);

        let total = matched.len() as u64;
        let items: Vec<Lead> = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.page_size() as usize)
            .collect();

        Ok(PageResult::new(items, page, total))
    }
}
