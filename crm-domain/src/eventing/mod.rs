//! 事件系统（Eventing）
//!
//! 定义事件发布与订阅的统一抽象：`EventBus` 面向异步消费方
//! （通知、分析、索引等），`EventSubscriber` 描述单个订阅者的
//! 匹配规则与处理逻辑。

mod bus;
mod bus_inmemory;
mod subscriber;

pub use bus::EventBus;
pub use bus_inmemory::InMemoryEventBus;
pub use subscriber::{EventSubscriber, SubscribedEvents};
