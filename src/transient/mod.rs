//! 临时文件存储
//!
//! 投稿时文件先落在临时存储（UploadThing 兼容服务），发布或删除后清理。
//! `TransientStore` 只暴露流水线需要的两个操作：按 URL 拉取内容、按 key 删除。

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::errors::{ArchiveError, Result};

/// 临时存储抽象
#[async_trait]
pub trait TransientStore: Send + Sync {
    /// 按公开 URL 拉取文件内容
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;

    /// 按文件 key 删除
    async fn delete(&self, file_key: &str) -> Result<()>;
}

#[derive(Serialize)]
struct DeleteFilesRequest<'a> {
    #[serde(rename = "fileKeys")]
    file_keys: Vec<&'a str>,
}

/// UploadThing REST 客户端
pub struct UploadThingStore {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl UploadThingStore {
    pub fn new(api_base: &str, api_key: &str, timeout: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .map_err(|e| {
                ArchiveError::transient_store(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(UploadThingStore {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl TransientStore for UploadThingStore {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await.map_err(|e| {
            ArchiveError::transient_store(format!("Fetch request failed: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(ArchiveError::transient_store(format!(
                "Fetch returned {} for {}",
                response.status(),
                url
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            ArchiveError::transient_store(format!("Fetch body read failed: {e}"))
        })?;
        Ok(bytes.to_vec())
    }

    async fn delete(&self, file_key: &str) -> Result<()> {
        let url = format!("{}/v6/deleteFiles", self.api_base);
        let response = self
            .client
            .post(&url)
            .header("x-uploadthing-api-key", &self.api_key)
            .json(&DeleteFilesRequest {
                file_keys: vec![file_key],
            })
            .send()
            .await
            .map_err(|e| ArchiveError::transient_store(format!("Delete request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ArchiveError::transient_store(format!(
                "Delete returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// 根据配置创建临时存储实例
pub async fn create_transient_store(config: &AppConfig) -> Result<Arc<dyn TransientStore>> {
    let store = UploadThingStore::new(
        &config.transient.api_base,
        &config.transient.api_key,
        config.transient.timeout,
    )?;
    Ok(Arc::new(store))
}
