//! 跨模块校验（Cross-Module Validation）
//!
//! 执行前的授权与跨域不变量检查——单个模块自己无法验证的约束
//! （如“该用户能否在项目 X 中被指派线索”）。实现可以查询其他
//! 模块的只读仓储，但绝不允许改变状态。
//!
use crate::context::AppContext;
use async_trait::async_trait;
use crm_domain::error::DomainResult;
use crm_domain::persist::{CacheStore, cache_key};
use dashmap::DashMap;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// 校验结果的备忘 TTL（与读路径页缓存一致的 5 分钟窗口）
pub const VALIDATION_MEMO_TTL: Duration = Duration::from_secs(300);

/// 跨模块校验服务
///
/// `validate` 返回违规原因列表：空列表表示放行；非空表示操作被
/// 拒绝，用例必须立即中止（Handler 绝不能运行）。`Err` 表示校验
/// 本身失败（依赖的只读仓储不可用等），同样中止执行。
#[async_trait]
pub trait CrossModuleValidation: Send + Sync {
    async fn validate(
        &self,
        ctx: &AppContext,
        operation: &str,
        payload: &Map<String, Value>,
    ) -> DomainResult<Vec<String>>;
}

/// 单条跨模块规则
///
/// 规则只关心自己的不变量；命令形状问题（字段缺失、类型不符）
/// 放行给 Handler 的形状校验处理，避免两层重复报错。
#[async_trait]
pub trait ValidationRule: Send + Sync {
    /// 规则名称（用于日志与审计）
    fn rule_name(&self) -> &str;

    /// 返回违规原因列表；空列表 = 通过
    async fn check(&self, payload: &Map<String, Value>) -> DomainResult<Vec<String>>;
}

/// 进程内校验服务：按操作名注册规则
///
/// - 未注册规则的操作默认放行；
/// - 可选地通过 [`CacheStore`] 对规则结论按
///   操作名 + 载荷哈希做 TTL 备忘，避免热点操作重复查库。
pub struct InProcessValidationService {
    rules: DashMap<String, Vec<Arc<dyn ValidationRule>>>,
    memo: Option<Arc<dyn CacheStore>>,
    memo_ttl: Duration,
}

impl Default for InProcessValidationService {
    fn default() -> Self {
        Self {
            rules: DashMap::new(),
            memo: None,
            memo_ttl: VALIDATION_MEMO_TTL,
        }
    }
}

impl InProcessValidationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// 启用结论备忘
    pub fn with_memo(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.memo = Some(cache);
        self
    }

    /// 注册一条规则到指定操作名（同一操作可挂多条规则）
    pub fn register(&self, operation: impl Into<String>, rule: Arc<dyn ValidationRule>) {
        self.rules.entry(operation.into()).or_default().push(rule);
    }
}

#[async_trait]
impl CrossModuleValidation for InProcessValidationService {
    async fn validate(
        &self,
        _ctx: &AppContext,
        operation: &str,
        payload: &Map<String, Value>,
    ) -> DomainResult<Vec<String>> {
        let Some(rules) = self.rules.get(operation).map(|r| r.value().clone()) else {
            return Ok(Vec::new());
        };

        let memo_key = match &self.memo {
            Some(_) => Some(cache_key(&format!("validation:{operation}"), payload)?),
            None => None,
        };

        if let (Some(cache), Some(key)) = (&self.memo, &memo_key) {
            match cache.get(key).await {
                Ok(Some(value)) => {
                    if let Ok(violations) = serde_json::from_value::<Vec<String>>(value) {
                        debug!(operation, "validation memo hit");
                        return Ok(violations);
                    }
                }
                Ok(None) => {}
                // 备忘不可用不阻断校验，退回逐规则评估
                Err(err) => debug!(operation, error = %err, "validation memo read failed"),
            }
        }

        let mut violations = Vec::new();
        for rule in rules {
            match rule.check(payload).await {
                Ok(mut found) => violations.append(&mut found),
                Err(err) => {
                    error!(
                        operation,
                        rule = rule.rule_name(),
                        error = %err,
                        "validation rule evaluation failed"
                    );
                    return Err(err);
                }
            }
        }

        if let (Some(cache), Some(key)) = (&self.memo, &memo_key) {
            if let Err(err) = cache
                .put(key, serde_json::to_value(&violations)?, self.memo_ttl)
                .await
            {
                debug!(operation, error = %err, "validation memo write failed");
            }
        }

        Ok(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_domain::persist::InMemoryCacheStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRule {
        calls: Arc<AtomicUsize>,
        violations: Vec<String>,
    }

    #[async_trait]
    impl ValidationRule for CountingRule {
        fn rule_name(&self) -> &str {
            "counting"
        }

        async fn check(&self, _payload: &Map<String, Value>) -> DomainResult<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.violations.clone())
        }
    }

    fn payload() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("lead_id".into(), serde_json::json!(42));
        map
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn unregistered_operations_pass() {
        let service = InProcessValidationService::new();
        let ctx = AppContext::default();
        let violations = service
            .validate(&ctx, "lead.assign", &payload())
            .await
            .unwrap();
        assert!(violations.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn violations_from_all_rules_are_collected() {
        let service = InProcessValidationService::new();
        let calls = Arc::new(AtomicUsize::new(0));
        service.register(
            "lead.assign",
            Arc::new(CountingRule {
                calls: calls.clone(),
                violations: vec!["primeira".into()],
            }),
        );
        service.register(
            "lead.assign",
            Arc::new(CountingRule {
                calls: calls.clone(),
                violations: vec!["segunda".into()],
            }),
        );

        let ctx = AppContext::default();
        let violations = service
            .validate(&ctx, "lead.assign", &payload())
            .await
            .unwrap();
        assert_eq!(violations, vec!["primeira".to_string(), "segunda".into()]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn memo_skips_reevaluation_within_ttl() {
        let cache = Arc::new(InMemoryCacheStore::new());
        let service = InProcessValidationService::new().with_memo(cache);
        let calls = Arc::new(AtomicUsize::new(0));
        service.register(
            "lead.assign",
            Arc::new(CountingRule {
                calls: calls.clone(),
                violations: Vec::new(),
            }),
        );

        let ctx = AppContext::default();
        for _ in 0..3 {
            let violations = service
                .validate(&ctx, "lead.assign", &payload())
                .await
                .unwrap();
            assert!(violations.is_empty());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
