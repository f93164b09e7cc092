use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::CatalogService;
use crate::models::ApiResponse;

/// 从云盘代理下载 PDF，前端查看器同源加载，规避云盘的跨域限制
pub async fn proxy_pdf(
    service: &CatalogService,
    request: &HttpRequest,
    file_id: &str,
) -> ActixResult<HttpResponse> {
    if file_id.is_empty() {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("缺少文件 ID"))
        );
    }

    let drive = service.get_drive(request);
    match drive.download_file(file_id).await {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                "Content-Disposition",
                format!("inline; filename=\"{file_id}.pdf\""),
            ))
            .insert_header(("Cache-Control", "public, max-age=3600"))
            .body(bytes)),
        Err(e) => {
            warn!("PDF proxy failed for {}: {}", file_id, e);
            Ok(HttpResponse::BadGateway()
                .json(ApiResponse::<()>::error_empty(format!("文件下载失败: {e}"))))
        }
    }
}
