//! 投稿实体模型
//!
//! 状态流转：`PENDING_CHECK` →（审核通过）`BIODATA_OK` →（发布流水线）`PUBLISHED`；
//! 任一阶段均可被删除。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// 投稿状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    #[serde(rename = "PENDING_CHECK")]
    PendingCheck,
    #[serde(rename = "BIODATA_OK")]
    BiodataOk,
    #[serde(rename = "PUBLISHED")]
    Published,
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmissionStatus::PendingCheck => "PENDING_CHECK",
            SubmissionStatus::BiodataOk => "BIODATA_OK",
            SubmissionStatus::Published => "PUBLISHED",
        };
        f.write_str(s)
    }
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING_CHECK" => Ok(SubmissionStatus::PendingCheck),
            "BIODATA_OK" => Ok(SubmissionStatus::BiodataOk),
            // 历史数据中存在的别名，仪表盘将其与 BIODATA_OK 同等对待，
            // 系统从不写入该值
            "WATERMARK_READY" => Ok(SubmissionStatus::BiodataOk),
            "PUBLISHED" => Ok(SubmissionStatus::Published),
            other => Err(format!("unknown submission status: {other}")),
        }
    }
}

/// 投稿记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub nama: String,
    pub nim: String,
    pub judul: String,
    pub abstrak: String,
    pub email: String,
    pub file_url: String,
    pub file_key: Option<String>,
    pub file_name: Option<String>,
    pub status: SubmissionStatus,
    pub download_link: Option<String>,
    pub drive_file_id: Option<String>,
    pub original_file_deleted: bool,
    pub submitted_at: i64,
    pub published_at: Option<i64>,
}

impl crate::entity::submissions::Model {
    /// 数据库模型转换为领域模型
    pub fn into_submission(self) -> Submission {
        let status = self
            .status
            .parse::<SubmissionStatus>()
            .unwrap_or(SubmissionStatus::PendingCheck);

        Submission {
            id: self.id,
            nama: self.nama,
            nim: self.nim,
            judul: self.judul,
            abstrak: self.abstrak,
            email: self.email,
            file_url: self.file_url,
            file_key: self.file_key,
            file_name: self.file_name,
            status,
            download_link: self.download_link,
            drive_file_id: self.drive_file_id,
            original_file_deleted: self.original_file_deleted,
            submitted_at: self.submitted_at,
            published_at: self.published_at,
        }
    }
}
