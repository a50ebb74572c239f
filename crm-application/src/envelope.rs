//! 结果信封（Result Envelope）
//!
//! 每次用例调用返回的统一值：`{success, data?, pagination?, errors?, message}`。
//! 不变量由构造函数保证：`success=false` 时 `data` 必然缺席，
//! `message` 是对用户安全的描述，绝不含原始错误类型或堆栈。
//!
use crm_domain::pagination::PageInfo;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
    /// 逐条违规原因（仅校验失败时出现）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    pub message: String,
}

impl ResultEnvelope {
    pub fn ok(data: Value, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: None,
            errors: None,
            message: message.into(),
        }
    }

    pub fn ok_paginated(data: Value, pagination: PageInfo, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: Some(pagination),
            errors: None,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            pagination: None,
            errors: None,
            message: message.into(),
        }
    }

    pub fn fail_with_errors(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            pagination: None,
            errors: Some(errors),
            message: message.into(),
        }
    }
}
