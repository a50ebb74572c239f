use chrono::{DateTime, Utc};
use crm_application::dto::Dto;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 线索状态（封闭枚举，顺序即漏斗推进顺序）
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Converted => "converted",
            Self::Lost => "lost",
        };
        f.write_str(s)
    }
}

/// 线索实体
///
/// `activity_count` 记录关联活动数：有活动的线索不允许在没有
/// `force` 标记时删除。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: u64,
    pub project_id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: LeadStatus,
    pub segment_id: Option<u64>,
    pub assigned_to: Option<u64>,
    pub activity_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// 便捷构造：新线索进入漏斗顶端
    pub fn new(
        id: u64,
        project_id: u64,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            project_id,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            status: LeadStatus::New,
            segment_id: None,
            assigned_to: None,
            activity_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Dto for Lead {}
