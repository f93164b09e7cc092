//! 云盘访问层
//!
//! `DriveStore` 抽象出目录扫描与发布流水线需要的全部云盘操作，
//! 生产实现为 Google Drive v3（`google` 模块），测试中用内存实现替代。

pub mod classify;
pub mod google;
pub mod scanner;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::drive::entities::{DriveItem, DriveUpload};

/// 云盘操作抽象
#[async_trait]
pub trait DriveStore: Send + Sync {
    /// 列出目录下全部未删除条目（文件与子目录）
    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveItem>>;

    /// 仅列出目录下的子目录
    async fn list_subfolders(&self, folder_id: &str) -> Result<Vec<DriveItem>>;

    /// 上传文件到指定目录，返回新文件的 ID 与浏览链接
    async fn create_file(
        &self,
        folder_id: &str,
        file_name: &str,
        mime_type: &str,
        content: Vec<u8>,
    ) -> Result<DriveUpload>;

    /// 删除云盘文件
    async fn delete_file(&self, file_id: &str) -> Result<()>;

    /// 下载文件内容
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>>;
}

/// 根据配置创建云盘实例
pub async fn create_drive_store(config: &AppConfig) -> Result<Arc<dyn DriveStore>> {
    let store = google::GoogleDriveStore::new(&config.drive)?;
    Ok(Arc::new(store))
}
