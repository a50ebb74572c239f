//! 线索查询过滤器
//!
//! 具名可选字段代替任意键值映射：未知字段在编译期就不存在，
//! 未知排序字段在解析期被拒绝，不会原样透传到查询层。
//!
use crate::lead::LeadStatus;
use bon::Builder;
use crm_domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 线索列表的合法排序字段（封闭枚举）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Name,
    Email,
    Status,
}

impl FromStr for LeadSortField {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "status" => Ok(Self::Status),
            other => Err(DomainError::invalid_value(format!(
                "unknown lead sort field: {other}"
            ))),
        }
    }
}

/// 线索过滤器
///
/// 易变集合 = {`search`, `status`, `segment_id`}：这三个过滤器
/// 高频变化、基数高，出现任意一个时读路径必须绕过缓存。
#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadFilters {
    /// 租户/项目范围（选择性最高，最先应用）
    pub project_id: Option<u64>,
    pub assigned_to: Option<u64>,
    pub segment_id: Option<u64>,
    pub status: Option<LeadStatus>,
    /// 在 name/email/phone 上做子串匹配
    #[builder(into)]
    pub search: Option<String>,
}

impl LeadFilters {
    /// 是否允许走页缓存（不含任何易变过滤器）
    pub fn is_cache_eligible(&self) -> bool {
        self.search.is_none() && self.status.is_none() && self.segment_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sort_field_is_rejected_at_parse_time() {
        assert!("created_at".parse::<LeadSortField>().is_ok());
        let err = "'; DROP TABLE leads;--".parse::<LeadSortField>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue { .. }));
    }

    #[test]
    fn volatile_filters_disable_caching() {
        assert!(LeadFilters::default().is_cache_eligible());
        assert!(
            LeadFilters::builder()
                .project_id(1)
                .assigned_to(7)
                .build()
                .is_cache_eligible()
        );
        assert!(!LeadFilters::builder().search("ana").build().is_cache_eligible());
        assert!(
            !LeadFilters::builder()
                .status(LeadStatus::Qualified)
                .build()
                .is_cache_eligible()
        );
        assert!(!LeadFilters::builder().segment_id(9).build().is_cache_eligible());
    }
}
