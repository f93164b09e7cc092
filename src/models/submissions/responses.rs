use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{Submission, SubmissionStatus};
use crate::models::PaginationInfo;

/// 投稿详情响应（时间戳格式化为 RFC3339）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionResponse {
    pub id: i64,
    pub nama: String,
    pub nim: String,
    pub judul: String,
    pub abstrak: String,
    pub email: String,
    #[serde(rename = "fileURL")]
    #[ts(rename = "fileURL")]
    pub file_url: String,
    pub file_key: Option<String>,
    pub file_name: Option<String>,
    pub status: SubmissionStatus,
    pub download_link: Option<String>,
    pub drive_file_id: Option<String>,
    pub original_file_deleted: bool,
    pub submitted_at: String,
    pub published_at: Option<String>,
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        let fmt_ts = |ts: i64| {
            chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default()
        };

        Self {
            id: s.id,
            nama: s.nama,
            nim: s.nim,
            judul: s.judul,
            abstrak: s.abstrak,
            email: s.email,
            file_url: s.file_url,
            file_key: s.file_key,
            file_name: s.file_name,
            status: s.status,
            download_link: s.download_link,
            drive_file_id: s.drive_file_id,
            original_file_deleted: s.original_file_deleted,
            submitted_at: fmt_ts(s.submitted_at),
            published_at: s.published_at.map(fmt_ts),
        }
    }
}

/// 投稿列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionResponse>,
    pub pagination: PaginationInfo,
}

/// 发布结果响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct PublishResponse {
    pub drive_link: String,
}
