use crm_domain::error::DomainError;

/// 应用层错误分类
///
/// `Validation`/`NotFound`/`Conflict` 携带可直达调用方的安全文案；
/// 其余一律只对外呈现通用的“erro interno”，完整细节仅进服务端日志。
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("infra: {0}")]
    Infra(String),
}

impl AppError {
    /// 可安全暴露给调用方的原因；`None` 表示必须降级为通用文案
    pub fn safe_reason(&self) -> Option<&str> {
        match self {
            Self::Validation(reason) | Self::NotFound(reason) | Self::Conflict(reason) => {
                Some(reason)
            }
            Self::Domain(_) | Self::Infra(_) => None,
        }
    }
}
