use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::ApiResponse;
use crate::models::drive::entities::Source;
use crate::services::CatalogService;

// 懒加载的全局 CatalogService 实例
static CATALOG_SERVICE: Lazy<CatalogService> = Lazy::new(CatalogService::new_lazy);

// 获取来源目录
pub async fn list_catalog(req: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    let source = match path.into_inner().parse::<Source>() {
        Ok(source) => source,
        Err(()) => {
            return Ok(
                HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("未知的目录来源"))
            );
        }
    };

    CATALOG_SERVICE.list_catalog(&req, source).await
}

// 代理下载云盘 PDF
pub async fn proxy_pdf(req: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.proxy_pdf(&req, &path.into_inner()).await
}

/// 配置目录路由
pub fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/catalog")
            // pdf 路径要先于 {source} 注册
            .route("/pdf/{file_id}", web::get().to(proxy_pdf))
            .route("/{source}", web::get().to(list_catalog)),
    );
}
