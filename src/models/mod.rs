pub mod common;
pub mod drive;
pub mod submissions;

pub use common::pagination::PaginationInfo;
pub use common::response::ApiResponse;

/// 程序启动时间（用于运行时长统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
