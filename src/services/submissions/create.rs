use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::models::ApiResponse;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::submissions::responses::SubmissionResponse;
use crate::utils::validate::validate_submission_fields;

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    // 字段校验
    if let Err(msg) = validate_submission_fields(
        &req.nama,
        &req.nim,
        &req.email,
        &req.judul,
        &req.abstrak,
        &req.file_url,
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(msg)));
    }

    let storage = service.get_storage(request);
    match storage.create_submission(req).await {
        Ok(submission) => {
            info!("Submission {} created by {}", submission.id, submission.nim);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmissionResponse::from(submission),
                "投稿已提交，等待审核",
            )))
        }
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::<()>::error_empty(format!("创建投稿失败: {e}")))),
    }
}
