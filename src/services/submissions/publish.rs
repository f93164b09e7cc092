use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::SubmissionService;
use crate::config::{AppConfig, WatermarkConfig};
use crate::drive::DriveStore;
use crate::errors::{ArchiveError, Result};
use crate::models::ApiResponse;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::submissions::responses::PublishResponse;
use crate::storage::{PublishRecord, Storage};
use crate::transient::TransientStore;
use crate::utils::publish_file_name;
use crate::utils::watermark::watermark_pdf;

pub async fn publish_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let drive = service.get_drive(request);
    let transient = service.get_transient(request);
    let config = AppConfig::get();

    match run_pipeline(
        &storage,
        &drive,
        &transient,
        &config.watermark,
        &config.drive.publish_folder_id,
        submission_id,
    )
    .await
    {
        Ok(drive_link) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PublishResponse { drive_link },
            "发布成功",
        ))),
        Err(e) => {
            error!("Publish pipeline failed for {}: {}", submission_id, e);
            let mut builder = match e {
                ArchiveError::NotFound(_) => HttpResponse::NotFound(),
                ArchiveError::Validation(_) => HttpResponse::BadRequest(),
                _ => HttpResponse::InternalServerError(),
            };
            Ok(builder.json(ApiResponse::<()>::error_empty(e.message())))
        }
    }
}

/// 发布流水线主体
///
/// 顺序：取记录、拉原文件、加水印、上云盘、清理临时文件、落库。
/// 上云盘之前的任何失败都不会留下外部副作用；上云盘成功后
/// 若落库失败，云盘文件成为孤儿，依赖日志中的文件 ID 人工清理。
pub(crate) async fn run_pipeline(
    storage: &Arc<dyn Storage>,
    drive: &Arc<dyn DriveStore>,
    transient: &Arc<dyn TransientStore>,
    watermark: &WatermarkConfig,
    publish_folder_id: &str,
    submission_id: i64,
) -> Result<String> {
    if submission_id <= 0 {
        return Err(ArchiveError::validation("无效的投稿 ID"));
    }

    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| ArchiveError::not_found("投稿不存在"))?;

    if submission.status == SubmissionStatus::Published {
        return Err(ArchiveError::validation("投稿已发布，不能重复发布"));
    }

    let original = transient.fetch(&submission.file_url).await?;
    let stamped = watermark_pdf(&original, &watermark.footer_text, &watermark.stamp_text)?;

    let file_name = publish_file_name(&submission.nama, &submission.judul);
    let upload = drive
        .create_file(publish_folder_id, &file_name, "application/pdf", stamped)
        .await?;
    // 落库前先记录云盘文件 ID，后续步骤失败时靠它人工对账
    info!(
        "Submission {} uploaded to drive file {}",
        submission_id, upload.id
    );

    // 临时文件清理尽力而为，失败不阻断发布
    let mut original_file_deleted = false;
    if let Some(key) = &submission.file_key {
        match transient.delete(key).await {
            Ok(()) => original_file_deleted = true,
            Err(e) => warn!("Transient cleanup failed for {}: {}", key, e),
        }
    }

    let drive_link = upload
        .web_view_link
        .clone()
        .unwrap_or_else(|| format!("https://drive.google.com/file/d/{}/view", upload.id));

    let record = PublishRecord {
        download_link: drive_link.clone(),
        drive_file_id: upload.id.clone(),
        original_file_deleted,
        published_at: chrono::Utc::now().timestamp(),
    };

    match storage.mark_submission_published(submission_id, record).await {
        Ok(Some(_)) => Ok(drive_link),
        Ok(None) => {
            error!(
                "Submission {} vanished before commit, drive file {} orphaned",
                submission_id, upload.id
            );
            Err(ArchiveError::not_found("投稿不存在"))
        }
        Err(e) => {
            error!(
                "Publish commit failed for {}, drive file {} orphaned: {}",
                submission_id, upload.id, e
            );
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testkit::{FakeDrive, FakeStorage, FakeTransient, pending_submission};
    use super::*;
    use crate::utils::watermark::pdf_fixture::minimal_pdf;

    fn watermark_config() -> WatermarkConfig {
        WatermarkConfig {
            footer_text: "Archived by DATASEA UTY".to_string(),
            stamp_text: "DATASEA ARCHIVE".to_string(),
        }
    }

    #[tokio::test]
    async fn test_publish_success() {
        let storage: Arc<dyn Storage> = Arc::new(FakeStorage::with_submission(
            pending_submission(1, SubmissionStatus::BiodataOk),
        ));
        let drive_fake = Arc::new(FakeDrive::new());
        let drive: Arc<dyn DriveStore> = drive_fake.clone();
        let transient: Arc<dyn TransientStore> = Arc::new(FakeTransient::serving(minimal_pdf()));

        let link = run_pipeline(&storage, &drive, &transient, &watermark_config(), "pub-folder", 1)
            .await
            .unwrap();
        assert_eq!(link, "https://drive.example/uploaded-1");

        // 云盘收到按规则命名、已加水印的 PDF
        let uploads = drive_fake.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].folder_id, "pub-folder");
        assert_eq!(uploads[0].file_name, "Budi - Analisis Jaringan 5G.pdf");
        assert!(uploads[0].content.starts_with(b"%PDF"));

        // 落库：状态、链接、清理结果、发布时间一次写入
        let stored = storage.get_submission_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.status, SubmissionStatus::Published);
        assert_eq!(stored.download_link.as_deref(), Some("https://drive.example/uploaded-1"));
        assert_eq!(stored.drive_file_id.as_deref(), Some("uploaded-1"));
        assert!(stored.original_file_deleted);
        assert!(stored.published_at.is_some());
    }

    #[tokio::test]
    async fn test_upload_failure_leaves_no_partial_state() {
        let storage: Arc<dyn Storage> = Arc::new(FakeStorage::with_submission(
            pending_submission(7, SubmissionStatus::BiodataOk),
        ));
        let drive: Arc<dyn DriveStore> = Arc::new(FakeDrive::failing_upload());
        let transient: Arc<dyn TransientStore> = Arc::new(FakeTransient::serving(minimal_pdf()));

        let result =
            run_pipeline(&storage, &drive, &transient, &watermark_config(), "pub-folder", 7).await;
        assert!(result.is_err());

        // 数据库保持原样
        let stored = storage.get_submission_by_id(7).await.unwrap().unwrap();
        assert_eq!(stored.status, SubmissionStatus::BiodataOk);
        assert!(stored.download_link.is_none());
        assert!(stored.drive_file_id.is_none());
        assert!(!stored.original_file_deleted);
    }

    #[tokio::test]
    async fn test_transient_cleanup_failure_does_not_block_publish() {
        let storage: Arc<dyn Storage> = Arc::new(FakeStorage::with_submission(
            pending_submission(3, SubmissionStatus::BiodataOk),
        ));
        let drive: Arc<dyn DriveStore> = Arc::new(FakeDrive::new());
        let transient: Arc<dyn TransientStore> =
            Arc::new(FakeTransient::serving(minimal_pdf()).with_failing_delete());

        run_pipeline(&storage, &drive, &transient, &watermark_config(), "pub-folder", 3)
            .await
            .unwrap();

        // 发布成功，但清理结果如实记录
        let stored = storage.get_submission_by_id(3).await.unwrap().unwrap();
        assert_eq!(stored.status, SubmissionStatus::Published);
        assert!(!stored.original_file_deleted);
    }

    #[tokio::test]
    async fn test_publish_rejects_already_published() {
        let mut submission = pending_submission(5, SubmissionStatus::Published);
        submission.drive_file_id = Some("existing".to_string());
        let storage: Arc<dyn Storage> = Arc::new(FakeStorage::with_submission(submission));
        let drive: Arc<dyn DriveStore> = Arc::new(FakeDrive::new());
        let transient: Arc<dyn TransientStore> = Arc::new(FakeTransient::serving(minimal_pdf()));

        let result =
            run_pipeline(&storage, &drive, &transient, &watermark_config(), "pub-folder", 5).await;
        assert!(matches!(result, Err(ArchiveError::Validation(_))));
    }

    #[tokio::test]
    async fn test_publish_rejects_nonpositive_id() {
        let storage: Arc<dyn Storage> = Arc::new(FakeStorage::empty());
        let drive: Arc<dyn DriveStore> = Arc::new(FakeDrive::new());
        let transient: Arc<dyn TransientStore> = Arc::new(FakeTransient::serving(Vec::new()));

        let result =
            run_pipeline(&storage, &drive, &transient, &watermark_config(), "pub-folder", 0).await;
        assert!(matches!(result, Err(ArchiveError::Validation(_))));
    }

    #[tokio::test]
    async fn test_publish_missing_submission() {
        let storage: Arc<dyn Storage> = Arc::new(FakeStorage::empty());
        let drive: Arc<dyn DriveStore> = Arc::new(FakeDrive::new());
        let transient: Arc<dyn TransientStore> = Arc::new(FakeTransient::serving(Vec::new()));

        let result =
            run_pipeline(&storage, &drive, &transient, &watermark_config(), "pub-folder", 42).await;
        assert!(matches!(result, Err(ArchiveError::NotFound(_))));
    }
}
