//! 领域事件（Domain Event）
//!
//! 一次成功的写操作对外发布的命名通知。事件名采用点分命名空间
//! （如 `lead.assigned`），载荷为扁平的字段映射，发布方不关心订阅方。
//!
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// 领域事件值对象
///
/// - `name`：点分命名空间的事件名，作为订阅匹配的键；
/// - `payload`：事件载荷（字段名 → 值），来自用例执行结果；
/// - `occurred_at`：事件发生时间，构造时固定。
///
/// 同一次用例执行至多发布一次；失败路径永不发布。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    event_id: Uuid,
    name: String,
    payload: Map<String, Value>,
    occurred_at: DateTime<Utc>,
}

impl DomainEvent {
    pub fn new(name: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            name: name.into(),
            payload,
            occurred_at: Utc::now(),
        }
    }

    /// 事件唯一标识（用于审计与投递去重）
    pub fn event_id(&self) -> &Uuid {
        &self.event_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn carries_name_payload_and_timestamp() {
        let mut payload = Map::new();
        payload.insert("lead_id".into(), json!(42));

        let before = Utc::now();
        let event = DomainEvent::new("lead.assigned", payload.clone());

        assert_eq!(event.name(), "lead.assigned");
        assert_eq!(event.payload(), &payload);
        assert!(event.occurred_at() >= before);
    }

    #[test]
    fn each_event_gets_a_fresh_id() {
        let a = DomainEvent::new("lead.created", Map::new());
        let b = DomainEvent::new("lead.created", Map::new());
        assert_ne!(a.event_id(), b.event_id());
    }
}
