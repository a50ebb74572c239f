use serde::Serialize;

/// 数据传输对象（DTO）
///
/// 用例执行成功后的输出载体：序列化后进入 [`ResultEnvelope`] 的
/// `data` 字段，其对象形式同时充当领域事件的载荷。实现方应暴露
/// 调用方可见的字段（如 `id`、`assigned_to`），而不是整个领域
/// 模型——信封之外不泄露内部结构。
///
/// [`ResultEnvelope`]: crate::envelope::ResultEnvelope
pub trait Dto: Serialize + Send + Sync + 'static {}
