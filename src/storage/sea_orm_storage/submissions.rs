use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{ArchiveError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::{CreateSubmissionRequest, SubmissionListQuery, UpdateSubmissionRequest},
        responses::{SubmissionListResponse, SubmissionResponse},
    },
};
use crate::storage::PublishRecord;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建投稿，初始状态为待审核
    pub async fn create_submission_impl(
        &self,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            nama: Set(req.nama),
            nim: Set(req.nim),
            judul: Set(req.judul),
            abstrak: Set(req.abstrak),
            email: Set(req.email),
            file_url: Set(req.file_url),
            file_key: Set(req.file_key),
            file_name: Set(req.file_name),
            status: Set(SubmissionStatus::PendingCheck.to_string()),
            original_file_deleted: Set(false),
            submitted_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ArchiveError::database_operation(format!("创建投稿失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取投稿
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ArchiveError::database_operation(format!("查询投稿失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 分页列出投稿，按提交时间倒序
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find();

        // 状态筛选：BIODATA_OK 同时覆盖历史别名 WATERMARK_READY
        if let Some(status) = query.status {
            if status == SubmissionStatus::BiodataOk {
                select = select.filter(
                    Condition::any()
                        .add(Column::Status.eq(status.to_string()))
                        .add(Column::Status.eq("WATERMARK_READY")),
                );
            } else {
                select = select.filter(Column::Status.eq(status.to_string()));
            }
        }

        let paginator = select
            .order_by_desc(Column::SubmittedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ArchiveError::database_operation(format!("统计投稿数失败: {e}")))?
            as i64;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ArchiveError::database_operation(format!("查询投稿列表失败: {e}")))?;

        let items: Vec<SubmissionResponse> = models
            .into_iter()
            .map(|m| m.into_submission().into())
            .collect();

        let total_pages = if total == 0 {
            0
        } else {
            (total + size as i64 - 1) / size as i64
        };

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total,
                total_pages,
            },
        })
    }

    /// 审核编辑投稿字段，只更新请求中给定的字段
    pub async fn update_submission_fields_impl(
        &self,
        id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>> {
        let Some(existing) = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ArchiveError::database_operation(format!("查询投稿失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(nama) = update.nama {
            model.nama = Set(nama);
        }
        if let Some(nim) = update.nim {
            model.nim = Set(nim);
        }
        if let Some(judul) = update.judul {
            model.judul = Set(judul);
        }
        if let Some(abstrak) = update.abstrak {
            model.abstrak = Set(abstrak);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ArchiveError::database_operation(format!("更新投稿失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }

    /// 更新投稿状态
    pub async fn update_submission_status_impl(
        &self,
        id: i64,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>> {
        let Some(existing) = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ArchiveError::database_operation(format!("查询投稿失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.status = Set(status.to_string());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ArchiveError::database_operation(format!("更新投稿状态失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }

    /// 发布成功后一次性落库：状态、下载链接、云盘文件 ID、清理结果与发布时间
    pub async fn mark_submission_published_impl(
        &self,
        id: i64,
        record: PublishRecord,
    ) -> Result<Option<Submission>> {
        let Some(existing) = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ArchiveError::database_operation(format!("查询投稿失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.status = Set(SubmissionStatus::Published.to_string());
        model.download_link = Set(Some(record.download_link));
        model.drive_file_id = Set(Some(record.drive_file_id));
        model.original_file_deleted = Set(record.original_file_deleted);
        model.published_at = Set(Some(record.published_at));

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ArchiveError::database_operation(format!("落库发布结果失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }

    /// 删除投稿
    pub async fn delete_submission_impl(&self, id: i64) -> Result<bool> {
        let result = Submissions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ArchiveError::database_operation(format!("删除投稿失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn memory_storage() -> SeaOrmStorage {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        SeaOrmStorage { db }
    }

    fn intake(nama: &str) -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            nama: nama.to_string(),
            nim: "5220411001".to_string(),
            email: "budi@students.uty.ac.id".to_string(),
            judul: "Analisis Jaringan".to_string(),
            abstrak: "Ringkasan singkat.".to_string(),
            file_url: "https://utfs.io/f/abc".to_string(),
            file_key: None,
            file_name: None,
        }
    }

    /// 直接写状态列，模拟历史数据中的原始字符串
    async fn set_status_raw(storage: &SeaOrmStorage, id: i64, status: &str) {
        let model = Submissions::find_by_id(id)
            .one(&storage.db)
            .await
            .unwrap()
            .unwrap();
        let mut active: ActiveModel = model.into();
        active.status = Set(status.to_string());
        active.update(&storage.db).await.unwrap();
    }

    #[tokio::test]
    async fn test_status_filter_covers_legacy_alias() {
        let storage = memory_storage().await;
        let a = storage.create_submission_impl(intake("Budi")).await.unwrap();
        let b = storage.create_submission_impl(intake("Siti")).await.unwrap();
        let c = storage.create_submission_impl(intake("Dewi")).await.unwrap();
        set_status_raw(&storage, a.id, "BIODATA_OK").await;
        set_status_raw(&storage, b.id, "WATERMARK_READY").await;

        let page = storage
            .list_submissions_with_pagination_impl(SubmissionListQuery {
                status: Some(SubmissionStatus::BiodataOk),
                page: None,
                size: None,
            })
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 2);
        let ids: Vec<i64> = page.items.iter().map(|s| s.id).collect();
        assert!(ids.contains(&a.id));
        assert!(ids.contains(&b.id));
        assert!(!ids.contains(&c.id));
    }

    #[tokio::test]
    async fn test_status_filter_exact_match_for_other_statuses() {
        let storage = memory_storage().await;
        let a = storage.create_submission_impl(intake("Budi")).await.unwrap();
        let b = storage.create_submission_impl(intake("Siti")).await.unwrap();
        set_status_raw(&storage, b.id, "WATERMARK_READY").await;

        let page = storage
            .list_submissions_with_pagination_impl(SubmissionListQuery {
                status: Some(SubmissionStatus::PendingCheck),
                page: None,
                size: None,
            })
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.items[0].id, a.id);
    }
}
