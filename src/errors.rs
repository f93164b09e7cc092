//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_archive_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ArchiveError {
            $($variant(String),)*
        }

        impl ArchiveError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ArchiveError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ArchiveError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ArchiveError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ArchiveError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ArchiveError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_archive_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    DriveApi("E006", "Drive API Error"),
    TransientStore("E007", "Transient Store Error"),
    Watermark("E008", "Watermark Error"),
    Validation("E009", "Validation Error"),
    NotFound("E010", "Resource Not Found"),
    Serialization("E011", "Serialization Error"),
}

impl ArchiveError {
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
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ArchiveError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ArchiveError {
    fn from(err: sea_orm::DbErr) -> Self {
        ArchiveError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ArchiveError {
    fn from(err: std::io::Error) -> Self {
        ArchiveError::TransientStore(err.to_string())
    }
}

impl From<serde_json::Error> for ArchiveError {
    fn from(err: serde_json::Error) -> Self {
        ArchiveError::Serialization(err.to_string())
    }
}

impl From<lopdf::Error> for ArchiveError {
    fn from(err: lopdf::Error) -> Self {
        ArchiveError::Watermark(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ArchiveError::cache_connection("test").code(), "E001");
        assert_eq!(ArchiveError::drive_api("test").code(), "E006");
        assert_eq!(ArchiveError::validation("test").code(), "E009");
        assert_eq!(ArchiveError::not_found("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ArchiveError::drive_api("test").error_type(),
            "Drive API Error"
        );
        assert_eq!(
            ArchiveError::watermark("test").error_type(),
            "Watermark Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = ArchiveError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = ArchiveError::transient_store("delete failed");
        let formatted = err.format_simple();
        assert!(formatted.contains("Transient Store Error"));
        assert!(formatted.contains("delete failed"));
    }
}
