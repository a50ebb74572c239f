//! 事件订阅者（EventSubscriber）
//!
//! 定义消费某类/多类/全部事件的处理逻辑与元信息（名称、订阅集合）。
//!
use crate::domain_event::DomainEvent;
use async_trait::async_trait;

/// 订阅的事件集合
#[derive(Clone, Debug)]
pub enum SubscribedEvents {
    One(String),
    Many(Vec<String>),
    All,
}

impl SubscribedEvents {
    /// 判断事件名是否命中该订阅集合
    pub fn matches(&self, event_name: &str) -> bool {
        match self {
            Self::One(name) => name == event_name,
            Self::Many(names) => names.iter().any(|n| n == event_name),
            Self::All => true,
        }
    }
}

/// 事件订阅者：处理某一类型的事件
#[async_trait]
pub trait EventSubscriber: Send + Sync {
    /// 订阅者名称（用于失败标记与审计）
    fn name(&self) -> &str;

    /// 返回该订阅者关心的事件集合
    fn subscribed_events(&self) -> SubscribedEvents;

    /// 处理事件；错误由派发方记录，不会传播给发布方
    async fn on_event(&self, event: &DomainEvent) -> anyhow::Result<()>;
}
