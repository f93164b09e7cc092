use serde::Deserialize;
use ts_rs::TS;

use super::entities::SubmissionStatus;

/// 学生投稿请求（文件已由前端直传临时存储，这里只记录 URL/Key）
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub nama: String,
    pub nim: String,
    pub email: String,
    pub judul: String,
    pub abstrak: String,
    #[serde(rename = "fileURL")]
    #[ts(rename = "fileURL")]
    pub file_url: String,
    pub file_key: Option<String>,
    pub file_name: Option<String>,
}

/// 管理端审核编辑请求（仅更新给定的字段）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct UpdateSubmissionRequest {
    pub nama: Option<String>,
    pub nim: Option<String>,
    pub judul: Option<String>,
    pub abstrak: Option<String>,
}

impl UpdateSubmissionRequest {
    pub fn is_empty(&self) -> bool {
        self.nama.is_none() && self.nim.is_none() && self.judul.is_none() && self.abstrak.is_none()
    }
}

/// 投稿列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListQuery {
    pub status: Option<SubmissionStatus>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// 发布/删除流水线请求体（与原有前端契约一致，id 放在 JSON body 中）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionIdRequest {
    pub id: i64,
}
