//! Google Drive v3 客户端
//!
//! 元数据读取、内容下载与 multipart 上传。访问令牌通过 OAuth2
//! refresh token 换取，并在进程内缓存到临近过期。

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::DriveConfig;
use crate::drive::DriveStore;
use crate::errors::{ArchiveError, Result};
use crate::models::drive::entities::{DriveItem, DriveUpload, FOLDER_MIME};

/// 令牌过期前的安全余量（秒）
const TOKEN_LEEWAY: i64 = 60;

const LIST_FIELDS: &str = "files(id,name,mimeType,createdTime,webViewLink)";
const PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveItem>,
}

pub struct GoogleDriveStore {
    client: reqwest::Client,
    config: DriveConfig,
    token: RwLock<Option<CachedToken>>,
}

impl GoogleDriveStore {
    pub fn new(config: &DriveConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| ArchiveError::drive_api(format!("Failed to build HTTP client: {e}")))?;

        Ok(GoogleDriveStore {
            client,
            config: config.clone(),
            token: RwLock::new(None),
        })
    }

    /// 取可用的访问令牌，过期则用 refresh token 重新换取
    async fn access_token(&self) -> Result<String> {
        let now = chrono::Utc::now().timestamp();

        if let Some(cached) = self.token.read().await.as_ref() {
            if cached.expires_at > now + TOKEN_LEEWAY {
                return Ok(cached.access_token.clone());
            }
        }

        let mut guard = self.token.write().await;
        // 等写锁期间可能已有人刷新过
        if let Some(cached) = guard.as_ref() {
            if cached.expires_at > now + TOKEN_LEEWAY {
                return Ok(cached.access_token.clone());
            }
        }

        debug!("Refreshing Drive access token");
        let response = self
            .client
            .post(&self.config.token_uri)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("refresh_token", self.config.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| ArchiveError::drive_api(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ArchiveError::drive_api(format!(
                "Token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ArchiveError::drive_api(format!("Invalid token response: {e}")))?;

        let access_token = token.access_token.clone();
        *guard = Some(CachedToken {
            access_token: token.access_token,
            expires_at: now + token.expires_in,
        });
        Ok(access_token)
    }

    async fn list_with_query(&self, query: &str) -> Result<Vec<DriveItem>> {
        let token = self.access_token().await?;
        let url = format!("{}/files", self.config.api_base);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("q", query),
                ("fields", LIST_FIELDS),
                ("pageSize", &PAGE_SIZE.to_string()),
            ])
            .send()
            .await
            .map_err(|e| ArchiveError::drive_api(format!("List request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ArchiveError::drive_api(format!(
                "Drive list returned {}",
                response.status()
            )));
        }

        let list: FileList = response
            .json()
            .await
            .map_err(|e| ArchiveError::drive_api(format!("Invalid list response: {e}")))?;
        Ok(list.files)
    }
}

#[async_trait]
impl DriveStore for GoogleDriveStore {
    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveItem>> {
        let query = format!("'{folder_id}' in parents and trashed = false");
        self.list_with_query(&query).await
    }

    async fn list_subfolders(&self, folder_id: &str) -> Result<Vec<DriveItem>> {
        let query = format!(
            "'{folder_id}' in parents and mimeType = '{FOLDER_MIME}' and trashed = false"
        );
        self.list_with_query(&query).await
    }

    async fn create_file(
        &self,
        folder_id: &str,
        file_name: &str,
        mime_type: &str,
        content: Vec<u8>,
    ) -> Result<DriveUpload> {
        let token = self.access_token().await?;
        let metadata = serde_json::json!({
            "name": file_name,
            "parents": [folder_id],
        });

        // Drive 的 multipart 上传要求 multipart/related，手工拼装报文体
        let boundary = "datasea_upload_boundary";
        let mut body = Vec::with_capacity(content.len() + 512);
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!("--{boundary}\r\nContent-Type: {mime_type}\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(&content);
        body.extend_from_slice(format!("\r\n--{boundary}--").as_bytes());

        let url = format!(
            "{}/files?uploadType=multipart&fields=id,webViewLink",
            self.config.upload_base
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header(
                CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| ArchiveError::drive_api(format!("Upload request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ArchiveError::drive_api(format!(
                "Drive upload returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ArchiveError::drive_api(format!("Invalid upload response: {e}")))
    }

    async fn delete_file(&self, file_id: &str) -> Result<()> {
        let token = self.access_token().await?;
        let url = format!("{}/files/{}", self.config.api_base, file_id);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ArchiveError::drive_api(format!("Delete request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ArchiveError::drive_api(format!(
                "Drive delete returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        let token = self.access_token().await?;
        let url = format!("{}/files/{}", self.config.api_base, file_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(|e| ArchiveError::drive_api(format!("Download request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ArchiveError::drive_api(format!(
                "Drive download returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ArchiveError::drive_api(format!("Download body read failed: {e}")))?;
        Ok(bytes.to_vec())
    }
}
