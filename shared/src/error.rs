//! 错误类型模块
//!
//! 客户端与后端交互时的统一错误分类。每个错误都只影响触发它的
//! 操作本身，由用户重试或离开页面恢复，没有进程级致命错误。

use std::fmt;

/// API 调用错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401：令牌缺失、无效或过期。不自动刷新、不自动重试。
    Unauthorized,
    /// 非 2xx 应答；message 取自服务端 JSON `{ message }`（如有）
    Server { status: u16, message: String },
    /// 网络层失败（连接、超时、跨域）
    Network(String),
    /// 应答体无法解析为预期形状
    Decode(String),
}

impl ApiError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        ApiError::Server {
            status,
            message: message.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "会话无效或已过期，请重新登录"),
            ApiError::Server { status, message } if message.is_empty() => {
                write!(f, "服务端错误 ({})", status)
            }
            ApiError::Server { status, message } => write!(f, "{} ({})", message, status),
            ApiError::Network(msg) => write!(f, "网络错误: {}", msg),
            ApiError::Decode(msg) => write!(f, "应答解析失败: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;
