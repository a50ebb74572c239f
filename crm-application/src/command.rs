use crate::dto::Dto;
use crm_domain::error::{DomainError, DomainResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// 应用层命令（Command）
///
/// 表达“意图”的写操作请求，构造后不可变，字段在构造时即已齐全
/// （没有部分命令）。命令只承载已通过形状校验的请求数据，业务
/// 校验发生在 Handler 与跨模块校验服务中。
///
/// 关联常量：
/// - `NAME`：命令的稳定操作名（点分命名空间，如 `lead.assign`），
///   用于日志、跨模块校验路由与追踪。避免依赖 `type_name::<T>()`。
pub trait Command: Serialize + Send + Sync + 'static {
    /// 命令的稳定操作名（建议常量字符串，不随重构变化）
    const NAME: &'static str;

    /// 命令执行成功后的输出载体
    type Output: Dto;

    /// 命令的字段映射（交给跨模块校验服务与事件载荷使用）
    fn fields(&self) -> DomainResult<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(DomainError::Parse {
                reason: format!("command must serialize to an object, got {other}"),
            }),
        }
    }
}
