use std::sync::Arc;

use crate::models::submissions::{
    entities::{Submission, SubmissionStatus},
    requests::{CreateSubmissionRequest, SubmissionListQuery, UpdateSubmissionRequest},
    responses::SubmissionListResponse,
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 发布流水线成功后写入的落库字段
#[derive(Debug, Clone)]
pub struct PublishRecord {
    pub download_link: String,
    pub drive_file_id: String,
    pub original_file_deleted: bool,
    pub published_at: i64,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 投稿管理方法
    // 创建投稿
    async fn create_submission(&self, submission: CreateSubmissionRequest) -> Result<Submission>;
    // 通过ID获取投稿
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 分页列出投稿
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 审核编辑投稿字段
    async fn update_submission_fields(
        &self,
        id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>>;
    // 更新投稿状态
    async fn update_submission_status(
        &self,
        id: i64,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>>;
    // 发布成功后一次性落库全部发布字段
    async fn mark_submission_published(
        &self,
        id: i64,
        record: PublishRecord,
    ) -> Result<Option<Submission>>;
    // 删除投稿
    async fn delete_submission(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
