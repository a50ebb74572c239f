//! 线索模块（crm-leads）
//!
//! 编排流水线的参考实例化：`Lead` 实体、具名过滤器、仓储端口与
//! 内存实现、缓存感知读路径（`CachedLeadRepository`）、指派/创建/
//! 删除命令与列表查询，以及跨模块指派规则。
//!
//! 其他业务模块（产品、用户、邮件营销等）按同样的形状实例化
//! 各自的命令、Handler 与规则。
//!
pub mod assign;
pub mod cached;
pub mod create;
pub mod delete;
pub mod filters;
pub mod lead;
pub mod list;
pub mod repository;
pub mod validation;

pub use cached::CachedLeadRepository;
pub use filters::{LeadFilters, LeadSortField};
pub use lead::{Lead, LeadStatus};
pub use repository::{InMemoryLeadRepository, LeadRepository};
