use bon::Builder;

/// 应用层上下文（Application Context）
///
/// 承载一次应用层调用（命令/查询）所需的横切信息：
/// - 链路追踪（`correlation_id`）；
/// - 执行者类型/ID（`actor_type`/`actor_id`），随成功与失败日志一并记录；
/// - 幂等键（`idempotency_key`）：用于在基础设施层实现请求幂等。
///
/// 典型用法：
/// ```rust
/// use crm_application::context::AppContext;
///
/// let ctx = AppContext::builder()
///     .correlation_id("cor-123")
///     .actor_type("user")
///     .actor_id("u-1")
///     .build();
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct AppContext {
    /// 关联ID（链路追踪）
    #[builder(into)]
    pub correlation_id: Option<String>,
    /// 执行者类型（如用户、系统）
    #[builder(into)]
    pub actor_type: Option<String>,
    /// 执行者ID
    #[builder(into)]
    pub actor_id: Option<String>,
    /// 幂等键（可选）：为空则由上层或基础设施决定是否参与幂等
    #[builder(into)]
    pub idempotency_key: Option<String>,
}
