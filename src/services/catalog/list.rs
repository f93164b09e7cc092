use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::CatalogService;
use crate::cache::CacheResult;
use crate::config::AppConfig;
use crate::drive::scanner;
use crate::models::ApiResponse;
use crate::models::drive::entities::{DriveFile, Source};

pub async fn list_catalog(
    service: &CatalogService,
    request: &HttpRequest,
    source: Source,
) -> ActixResult<HttpResponse> {
    let cache = service.get_cache(request);
    let key = source.cache_key();

    // 缓存命中直接返回
    if let Some(files) = read_cached(&cache, &key).await {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(files, "目录获取成功")));
    }

    // 未命中时按来源加锁，同一来源只允许一次扫描在途
    let lock = service.scan_lock(source);
    let _guard = lock.lock().await;

    // 等锁期间可能已有并发请求完成了扫描
    if let Some(files) = read_cached(&cache, &key).await {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(files, "目录获取成功")));
    }

    let config = AppConfig::get();
    let drive = service.get_drive(request);
    let files = scanner::scan_source(&drive, source, config.drive.root_folder_id(source)).await;
    info!("Scanned {} catalog: {} files", source, files.len());

    match serde_json::to_string(&files) {
        Ok(raw) => cache.insert_raw(key, raw, config.catalog_ttl()).await,
        Err(e) => warn!("Failed to serialize {} catalog for cache: {}", source, e),
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(files, "目录扫描完成")))
}

/// 读取并反序列化缓存值，损坏的条目按未命中处理并移除
async fn read_cached(
    cache: &std::sync::Arc<dyn crate::cache::ObjectCache>,
    key: &str,
) -> Option<Vec<DriveFile>> {
    if let CacheResult::Found(raw) = cache.get_raw(key).await {
        match serde_json::from_str::<Vec<DriveFile>>(&raw) {
            Ok(files) => return Some(files),
            Err(e) => {
                warn!("Corrupted catalog cache entry {}: {}", key, e);
                cache.remove(key).await;
            }
        }
    }
    None
}
