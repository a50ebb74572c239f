//! 用例编排（UseCase）
//!
//! 控制器唯一的对话对象。每次执行严格按
//! 校验 → 执行 → 发布 → 封装结果 推进：
//! 1. 跨模块校验拒绝或失败时立即中止，Handler 绝不运行；
//! 2. Handler 的任何失败在这里被分类吸收，不会向上抛出；
//! 3. 成功后恰好发布一次领域事件，且在返回前同步完成；
//!    派发失败只记日志，不影响已落地的执行结果；
//! 4. 调用方永远拿到结构良好的 [`ResultEnvelope`]。
//!
use crate::{
    command::Command, command_handler::CommandHandler, context::AppContext,
    dispatcher::CrossModuleEventDispatcher, envelope::ResultEnvelope, error::AppError,
    query::Query, query_handler::QueryHandler, validation::CrossModuleValidation,
};
use bon::Builder;
use crm_domain::domain_event::DomainEvent;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

/// 降级文案：不可安全暴露的失败统一呈现为内部错误
const INTERNAL_ERROR: &str = "erro interno";

/// 写操作用例
///
/// 通过 builder 组装一个 Handler 与两个横切服务，并声明该操作的
/// 事件名与用户文案：
///
/// ```rust,ignore
/// let assign = UseCase::builder()
///     .handler(handler)
///     .validation(validation)
///     .dispatcher(dispatcher)
///     .event_name("lead.assigned")
///     .success_message("Lead atribuído com sucesso")
///     .failure_label("Erro ao atribuir lead")
///     .build();
/// ```
#[derive(Builder)]
pub struct UseCase<C: Command> {
    handler: Arc<dyn CommandHandler<C>>,
    validation: Arc<dyn CrossModuleValidation>,
    dispatcher: Arc<dyn CrossModuleEventDispatcher>,
    event_name: &'static str,
    success_message: &'static str,
    failure_label: &'static str,
}

impl<C: Command> UseCase<C> {
    pub async fn execute(&self, ctx: &AppContext, cmd: C) -> ResultEnvelope {
        let operation = C::NAME;

        let fields = match cmd.fields() {
            Ok(fields) => fields,
            Err(err) => {
                error!(operation, error = %err, "command serialization failed");
                return self.internal_failure();
            }
        };

        // 1. 跨模块校验：拒绝或失败都在 Handler 之前中止
        match self.validation.validate(ctx, operation, &fields).await {
            Ok(violations) if violations.is_empty() => {}
            Ok(violations) => {
                warn!(
                    operation,
                    actor_id = ctx.actor_id.as_deref(),
                    ?violations,
                    "cross-module validation rejected operation"
                );
                let message = format!("{}: {}", self.failure_label, violations.join("; "));
                return ResultEnvelope::fail_with_errors(message, violations);
            }
            Err(err) => {
                error!(operation, error = %err, "cross-module validation failed");
                return self.internal_failure();
            }
        }

        // 2. 执行：失败在这里被分类吸收
        let output = match self.handler.handle(ctx, cmd).await {
            Ok(output) => output,
            Err(err) => return self.classify_failure(operation, ctx, &err),
        };

        let data = match serde_json::to_value(&output) {
            Ok(data) => data,
            Err(err) => {
                error!(operation, error = %err, "handler output serialization failed");
                return self.internal_failure();
            }
        };

        // 3. 发布：恰好一次，且必须在 Handler 效果落地之后；
        //    派发失败不回滚也不上抛
        let event = DomainEvent::new(self.event_name, event_payload(&data));
        if let Err(err) = self.dispatcher.dispatch(event).await {
            warn!(
                operation,
                event = self.event_name,
                error = %err,
                "event dispatch failed after successful execution"
            );
        }

        info!(
            operation,
            event = self.event_name,
            entity_id = %data.get("id").unwrap_or(&serde_json::Value::Null),
            actor_type = ctx.actor_type.as_deref(),
            actor_id = ctx.actor_id.as_deref(),
            correlation_id = ctx.correlation_id.as_deref(),
            idempotency_key = ctx.idempotency_key.as_deref(),
            "use case executed"
        );

        ResultEnvelope::ok(data, self.success_message)
    }

    fn classify_failure(&self, operation: &str, ctx: &AppContext, err: &AppError) -> ResultEnvelope {
        error!(
            operation,
            actor_type = ctx.actor_type.as_deref(),
            actor_id = ctx.actor_id.as_deref(),
            correlation_id = ctx.correlation_id.as_deref(),
            idempotency_key = ctx.idempotency_key.as_deref(),
            error = %err,
            "use case failed"
        );
        match err.safe_reason() {
            Some(reason) => ResultEnvelope::fail(format!("{}: {reason}", self.failure_label)),
            None => self.internal_failure(),
        }
    }

    fn internal_failure(&self) -> ResultEnvelope {
        ResultEnvelope::fail(format!("{}: {INTERNAL_ERROR}", self.failure_label))
    }
}

/// 读操作用例
///
/// 与写用例同一条流水线，但只读：跨模块校验照常前置，
/// 成功路径不发布事件，信封额外携带分页元信息。
#[derive(Builder)]
pub struct QueryUseCase<Q: Query> {
    handler: Arc<dyn QueryHandler<Q>>,
    validation: Arc<dyn CrossModuleValidation>,
    success_message: &'static str,
    failure_label: &'static str,
}

impl<Q: Query> QueryUseCase<Q> {
    pub async fn execute(&self, ctx: &AppContext, query: Q) -> ResultEnvelope {
        let operation = Q::NAME;

        let fields = match query.fields() {
            Ok(fields) => fields,
            Err(err) => {
                error!(operation, error = %err, "query serialization failed");
                return self.internal_failure();
            }
        };

        match self.validation.validate(ctx, operation, &fields).await {
            Ok(violations) if violations.is_empty() => {}
            Ok(violations) => {
                warn!(operation, ?violations, "cross-module validation rejected query");
                let message = format!("{}: {}", self.failure_label, violations.join("; "));
                return ResultEnvelope::fail_with_errors(message, violations);
            }
            Err(err) => {
                error!(operation, error = %err, "cross-module validation failed");
                return self.internal_failure();
            }
        }

        let page = match self.handler.handle(ctx, query).await {
            Ok(page) => page,
            Err(err) => {
                error!(
                    operation,
                    actor_type = ctx.actor_type.as_deref(),
                    actor_id = ctx.actor_id.as_deref(),
                    correlation_id = ctx.correlation_id.as_deref(),
                    error = %err,
                    "query failed"
                );
                return match err.safe_reason() {
                    Some(reason) => {
                        ResultEnvelope::fail(format!("{}: {reason}", self.failure_label))
                    }
                    None => self.internal_failure(),
                };
            }
        };

        let info = page.info();
        let data = match serde_json::to_value(&page.items) {
            Ok(data) => data,
            Err(err) => {
                error!(operation, error = %err, "page serialization failed");
                return self.internal_failure();
            }
        };

        info!(
            operation,
            page = info.page,
            total = info.total,
            actor_type = ctx.actor_type.as_deref(),
            actor_id = ctx.actor_id.as_deref(),
            correlation_id = ctx.correlation_id.as_deref(),
            "query executed"
        );

        ResultEnvelope::ok_paginated(data, info, self.success_message)
    }

    fn internal_failure(&self) -> ResultEnvelope {
        ResultEnvelope::fail(format!("{}: {INTERNAL_ERROR}", self.failure_label))
    }
}

/// 事件载荷取自 Handler 输出的对象形式；标量输出降级为 `value` 单字段
fn event_payload(data: &Value) -> Map<String, Value> {
    match data {
        Value::Object(map) => map.clone(),
        other => {
            let mut map = Map::new();
            map.insert("value".into(), other.clone());
            map
        }
    }
}
