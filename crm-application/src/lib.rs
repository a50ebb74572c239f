//! CRM 应用层（crm-application）
//!
//! 位于传输适配器（控制器/CLI/队列消费者）与各模块 Handler 之间的
//! 编排层：
//! - `Command`/`Query`/`Dto`：输入输出契约；
//! - `UseCase`/`QueryUseCase`：校验 → 执行 → 发布 → 封装结果 的
//!   固定流水线，控制器只与它对话；
//! - `CrossModuleValidation`：执行前的跨模块授权/业务规则检查；
//! - `CrossModuleEventDispatcher`：执行成功后的领域事件派发；
//! - `ResultEnvelope`：统一的成功/失败信封，调用方永远拿到
//!   结构良好的结果，看不到内部错误类型与堆栈。
//!
pub mod command;
pub mod command_handler;
pub mod context;
pub mod dispatcher;
pub mod dto;
pub mod envelope;
pub mod error;
pub mod query;
pub mod query_handler;
pub mod use_case;
pub mod validation;

pub use dispatcher::{CrossModuleEventDispatcher, InProcessEventDispatcher};
pub use envelope::ResultEnvelope;
pub use use_case::{QueryUseCase, UseCase};
pub use validation::{CrossModuleValidation, InProcessValidationService, ValidationRule};
