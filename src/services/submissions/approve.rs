use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::models::ApiResponse;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::submissions::responses::SubmissionResponse;

/// 审核通过，投稿进入待发布状态
pub async fn approve_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(sub)) => sub,
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().json(ApiResponse::<()>::error_empty("投稿不存在"))
            );
        }
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error_empty(format!("查询投稿失败: {e}"))));
        }
    };

    // 已发布的投稿不允许回到审核流程
    if submission.status == SubmissionStatus::Published {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("投稿已发布，无法再审核"))
        );
    }

    match storage
        .update_submission_status(submission_id, SubmissionStatus::BiodataOk)
        .await
    {
        Ok(Some(updated)) => {
            info!("Submission {} approved", submission_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmissionResponse::from(updated),
                "审核通过，可以发布",
            )))
        }
        Ok(None) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty("投稿不存在")))
        }
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::<()>::error_empty(format!("更新投稿状态失败: {e}")))),
    }
}
