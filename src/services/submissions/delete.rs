use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::SubmissionService;
use crate::drive::DriveStore;
use crate::errors::{ArchiveError, Result};
use crate::models::ApiResponse;
use crate::storage::Storage;
use crate::transient::TransientStore;

pub async fn delete_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let drive = service.get_drive(request);
    let transient = service.get_transient(request);

    match run_delete_pipeline(&storage, &drive, &transient, submission_id).await {
        Ok(()) => {
            info!("Submission {} deleted", submission_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("投稿已删除")))
        }
        Err(e) => {
            error!("Delete pipeline failed for {}: {}", submission_id, e);
            let mut builder = match e {
                ArchiveError::NotFound(_) => HttpResponse::NotFound(),
                _ => HttpResponse::InternalServerError(),
            };
            Ok(builder.json(ApiResponse::<()>::error_empty(e.message())))
        }
    }
}

/// 删除流水线
///
/// 外部存储（云盘、临时存储）的清理尽力而为，失败只告警；
/// 数据库删除失败才视为整体失败。
pub(crate) async fn run_delete_pipeline(
    storage: &Arc<dyn Storage>,
    drive: &Arc<dyn DriveStore>,
    transient: &Arc<dyn TransientStore>,
    submission_id: i64,
) -> Result<()> {
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| ArchiveError::not_found("投稿不存在"))?;

    if let Some(file_id) = &submission.drive_file_id {
        if let Err(e) = drive.delete_file(file_id).await {
            warn!("Drive cleanup failed for {}: {}", file_id, e);
        }
    }

    if !submission.original_file_deleted {
        if let Some(key) = &submission.file_key {
            if let Err(e) = transient.delete(key).await {
                warn!("Transient cleanup failed for {}: {}", key, e);
            }
        }
    }

    if storage.delete_submission(submission_id).await? {
        Ok(())
    } else {
        Err(ArchiveError::not_found("投稿不存在"))
    }
}
