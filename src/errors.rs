//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及界面展示位置。

use std::fmt;

/// 错误在界面上的展示位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSurface {
    /// 页面内联错误横幅（网络/HTTP 失败）
    Banner,
    /// 阻塞式提示（校验失败等，请求未发出）
    Alert,
    /// 预览弹窗内的错误状态，附带下载兜底
    PreviewFallback,
    /// 不展示（过期响应被丢弃）
    Silent,
}

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - surface() 方法 - 返回展示位置
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portal_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $surface:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum PortalError {
            $($variant(String),)*
        }

        impl PortalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取展示位置
            pub fn surface(&self) -> ErrorSurface {
                match self {
                    $(PortalError::$variant(_) => ErrorSurface::$surface,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortalError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portal_errors! {
    Network("E001", "Network Error", Banner),
    HttpStatus("E002", "HTTP Status Error", Banner),
    ShapeMismatch("E003", "Response Shape Mismatch", Banner),
    Validation("E004", "Validation Error", Alert),
    NotFound("E005", "Resource Not Found", Banner),
    FilePreview("E006", "File Preview Error", PreviewFallback),
    Session("E007", "Session Error", Alert),
    Configuration("E008", "Configuration Error", Banner),
    Serialization("E009", "Serialization Error", Banner),
    DateParse("E010", "Date Parse Error", Alert),
    StaleResponse("E011", "Stale Response", Silent),
    ActionInFlight("E012", "Action In Flight", Alert),
    InvalidTransition("E013", "Invalid State Transition", Alert),
}

impl PortalError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为过期响应（调用方应静默忽略）
    pub fn is_stale(&self) -> bool {
        matches!(self, PortalError::StaleResponse(_))
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

// 为常见的错误类型实现 From trait
impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PortalError::ShapeMismatch(err.to_string())
        } else if let Some(status) = err.status() {
            PortalError::HttpStatus(format!("{status}: {err}"))
        } else {
            PortalError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::ShapeMismatch(err.to_string())
    }
}

impl From<chrono::ParseError> for PortalError {
    fn from(err: chrono::ParseError) -> Self {
        PortalError::DateParse(err.to_string())
    }
}

impl From<config::ConfigError> for PortalError {
    fn from(err: config::ConfigError) -> Self {
        PortalError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
