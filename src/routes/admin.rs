use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::drive::entities::Source;
use crate::models::submissions::requests::SubmissionIdRequest;
use crate::services::{CatalogService, SubmissionService};

static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);
static CATALOG_SERVICE: Lazy<CatalogService> = Lazy::new(CatalogService::new_lazy);

// 发布流水线
pub async fn publish_submission(
    req: HttpRequest,
    body: web::Json<SubmissionIdRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .publish_submission(&req, body.into_inner().id)
        .await
}

// 删除流水线
pub async fn delete_submission(
    req: HttpRequest,
    body: web::Json<SubmissionIdRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .delete_submission(&req, body.into_inner().id)
        .await
}

// 手动刷新目录缓存
pub async fn refresh_catalog(req: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    let source = match path.into_inner().parse::<Source>() {
        Ok(source) => source,
        Err(()) => {
            return Ok(
                HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("未知的目录来源"))
            );
        }
    };

    CATALOG_SERVICE.refresh_catalog(&req, source).await
}

/// 配置管理端路由（全部要求管理令牌）
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            .wrap(middlewares::RequireAdminToken)
            .route("/publish", web::post().to(publish_submission))
            .route("/delete", web::post().to(delete_submission))
            .route("/catalog/{source}/refresh", web::post().to(refresh_catalog)),
    );
}
