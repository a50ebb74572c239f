//! 跨模块事件派发（Cross-Module Event Dispatcher）
//!
//! 用例执行成功后的事件出口：对发布方是“发后即忘”的——订阅者
//! 的异常被派发方隔离并记录，永不回传；对已注册订阅者保证
//! 至少一次投递。实现可以同步进程内投递，也可以入队异步投递。
//!
use async_trait::async_trait;
use crm_domain::domain_event::DomainEvent;
use crm_domain::error::DomainResult;
use crm_domain::eventing::{EventBus, EventSubscriber};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

#[async_trait]
pub trait CrossModuleEventDispatcher: Send + Sync {
    /// 派发一个领域事件给所有命中的订阅者
    async fn dispatch(&self, event: DomainEvent) -> DomainResult<()>;
}

/// 进程内派发实现
///
/// - 同步遍历命中的订阅者逐个投递；
/// - 订阅者失败只记 warn，不影响其余订阅者，也不影响派发方；
/// - 可选地把事件转发到 [`EventBus`]，供异步消费方
///   （通知、分析、搜索索引）在总线上自行订阅。
#[derive(Default)]
pub struct InProcessEventDispatcher {
    subscribers: RwLock<Vec<Arc<dyn EventSubscriber>>>,
    bus: Option<Arc<dyn EventBus>>,
}

impl InProcessEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 同时把每个事件转发到总线
    pub fn with_bus(mut self, bus: Arc<dyn EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn subscribe(&self, subscriber: Arc<dyn EventSubscriber>) {
        self.subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(subscriber);
    }
}

#[async_trait]
impl CrossModuleEventDispatcher for InProcessEventDispatcher {
    async fn dispatch(&self, event: DomainEvent) -> DomainResult<()> {
        // 先快照命中的订阅者，避免跨 await 持锁
        let matched: Vec<Arc<dyn EventSubscriber>> = {
            let registry = self
                .subscribers
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            registry
                .iter()
                .filter(|s| s.subscribed_events().matches(event.name()))
                .cloned()
                .collect()
        };

        let mut delivered = 0usize;
        for subscriber in &matched {
            match subscriber.on_event(&event).await {
                Ok(()) => delivered += 1,
                Err(err) => warn!(
                    event = event.name(),
                    subscriber = subscriber.name(),
                    error = %err,
                    "event subscriber failed"
                ),
            }
        }

        if let Some(bus) = &self.bus {
            if let Err(err) = bus.publish(&event).await {
                warn!(event = event.name(), error = %err, "event bus publish failed");
            }
        }

        debug!(
            event = event.name(),
            matched = matched.len(),
            delivered,
            "domain event dispatched"
        );
        Ok(())
    }
}
