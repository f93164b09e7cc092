use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CatalogService;
use crate::models::ApiResponse;
use crate::models::drive::entities::Source;

/// 清掉来源的缓存条目，下一次目录请求将触发重新扫描
pub async fn refresh_catalog(
    service: &CatalogService,
    request: &HttpRequest,
    source: Source,
) -> ActixResult<HttpResponse> {
    let cache = service.get_cache(request);
    cache.remove(&source.cache_key()).await;
    info!("Catalog cache for {} invalidated by admin", source);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("缓存已刷新，下次请求将重新扫描")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::test::TestRequest;

    use super::refresh_catalog;
    use crate::models::drive::entities::Source;
    use crate::services::catalog::testkit::{FakeCache, service_with_cache};

    #[tokio::test]
    async fn test_refresh_removes_source_entry() {
        let key = Source::Materi.cache_key();
        let cache = Arc::new(FakeCache::with_entry(&key, "[]"));
        let service = service_with_cache(cache.clone());
        let request = TestRequest::default().to_http_request();

        let response = refresh_catalog(&service, &request, Source::Materi)
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert!(!cache.contains(&key));
    }

    #[tokio::test]
    async fn test_refresh_only_touches_requested_source() {
        let materi = Source::Materi.cache_key();
        let jurnal = Source::Jurnal.cache_key();
        let cache = Arc::new(FakeCache::with_entry(&jurnal, "[]"));
        let service = service_with_cache(cache.clone());
        let request = TestRequest::default().to_http_request();

        refresh_catalog(&service, &request, Source::Materi)
            .await
            .unwrap();

        assert!(!cache.contains(&materi));
        assert!(cache.contains(&jurnal));
    }
}
