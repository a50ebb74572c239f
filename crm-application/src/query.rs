use crate::dto::Dto;
use crm_domain::error::{DomainError, DomainResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// 应用层查询（Query）
///
/// 表达只读意图，不改变领域状态，自带分页参数。
/// - 结果为一页 [`Dto`](crate::dto::Dto)；
/// - 与 [`Command`](crate::command::Command) 相对，`Query` 应避免副作用；
/// - 读路径可以经过缓存感知仓储直连读模型。
pub trait Query: Serialize + Send + Sync + 'static {
    /// 查询的稳定操作名（点分命名空间，如 `lead.list`）
    const NAME: &'static str;

    /// 结果页中的单条数据载体
    type Item: Dto;

    /// 查询的字段映射（含过滤器与分页，交给跨模块校验服务）
    fn fields(&self) -> DomainResult<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(DomainError::Parse {
                reason: format!("query must serialize to an object, got {other}"),
            }),
        }
    }
}
