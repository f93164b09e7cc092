use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::ApiResponse;
use crate::models::submissions::requests::UpdateSubmissionRequest;
use crate::models::submissions::responses::SubmissionResponse;

pub async fn update_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    update: UpdateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    if update.is_empty() {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("没有需要更新的字段"))
        );
    }

    let storage = service.get_storage(request);
    match storage
        .update_submission_fields(submission_id, update)
        .await
    {
        Ok(Some(submission)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionResponse::from(submission),
            "投稿已更新",
        ))),
        Ok(None) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty("投稿不存在")))
        }
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::<()>::error_empty(format!("更新投稿失败: {e}")))),
    }
}
