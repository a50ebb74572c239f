//! CRM 领域层基础库（crm-domain）
//!
//! 提供编排层与各业务模块共用的领域构件：
//! - 领域事件（`domain_event`）：带命名空间的事件值对象
//! - 事件系统（`eventing`）：事件总线抽象、内存实现与订阅者协议
//! - 持久化端口（`persist`）：通用仓储接口、缓存端口与内存 TTL 缓存
//! - 分页（`pagination`）：分页请求/结果与排序方向
//!
//! 本 crate 不依赖任何具体存储或传输实现，仅定义领域层接口与
//! 最小必要的错误类型，便于在不同基础设施上进行适配。
//!
pub mod domain_event;
pub mod error;
pub mod eventing;
pub mod pagination;
pub mod persist;
