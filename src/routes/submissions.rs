use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, SubmissionListQuery, UpdateSubmissionRequest,
};
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 创建投稿（公开入口）
pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, body.into_inner())
        .await
}

// 列出投稿
pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, query.into_inner())
        .await
}

// 获取投稿详情
pub async fn get_submission(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(&req, path.into_inner())
        .await
}

// 审核编辑投稿
pub async fn update_submission(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .update_submission(&req, path.into_inner(), body.into_inner())
        .await
}

// 审核通过
pub async fn approve_submission(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .approve_submission(&req, path.into_inner())
        .await
}

/// 配置投稿路由
///
/// 投稿入口公开，审核相关接口要求管理令牌。
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    // 公开投稿入口；guard 不命中时继续匹配后面的管理端 scope
    cfg.service(
        web::resource("/api/v1/submissions")
            .guard(guard::Post())
            .route(web::post().to(create_submission)),
    );

    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireAdminToken)
            .route("", web::get().to(list_submissions))
            .route("/{id}", web::get().to(get_submission))
            .route("/{id}", web::put().to(update_submission))
            .route("/{id}/approve", web::post().to(approve_submission)),
    );
}
