use crate::{command::Command, context::AppContext, error::AppError};
use async_trait::async_trait;

/// 命令处理器：执行一个业务写操作
///
/// Handler 自行完成命令的形状校验（必填字段等）——这与用例层的
/// 跨模块校验是两类关注点：前者回答“命令是否结构良好”，后者回答
/// “在系统整体约束下该操作是否被允许”。目标实体缺失时返回
/// [`AppError::NotFound`]；Handler 不吞错误，记录后原样上抛，
/// 由用例的兜底分类构造信封。
#[async_trait]
pub trait CommandHandler<C>: Send + Sync
where
    C: Command,
{
    async fn handle(&self, ctx: &AppContext, cmd: C) -> Result<C::Output, AppError>;
}
