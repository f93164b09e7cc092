pub mod list;
pub mod pdf;
pub mod refresh;
#[cfg(test)]
pub(crate) mod testkit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::cache::ObjectCache;
use crate::drive::DriveStore;
use crate::models::drive::entities::Source;

pub struct CatalogService {
    cache: Option<Arc<dyn ObjectCache>>,
    drive: Option<Arc<dyn DriveStore>>,
    // 每个来源一把扫描锁，避免缓存失效时并发触发多次全量扫描
    scan_locks: DashMap<Source, Arc<Mutex<()>>>,
}

impl CatalogService {
    pub fn new_lazy() -> Self {
        Self {
            cache: None,
            drive: None,
            scan_locks: DashMap::new(),
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        if let Some(cache) = &self.cache {
            cache.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
                .expect("Cache not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_drive(&self, request: &HttpRequest) -> Arc<dyn DriveStore> {
        if let Some(drive) = &self.drive {
            drive.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn DriveStore>>>()
                .expect("Drive store not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn scan_lock(&self, source: Source) -> Arc<Mutex<()>> {
        self.scan_locks
            .entry(source)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// 获取来源目录（缓存优先，未命中则触发扫描）
    pub async fn list_catalog(
        &self,
        request: &HttpRequest,
        source: Source,
    ) -> ActixResult<HttpResponse> {
        list::list_catalog(self, request, source).await
    }

    /// 手动刷新来源目录缓存
    pub async fn refresh_catalog(
        &self,
        request: &HttpRequest,
        source: Source,
    ) -> ActixResult<HttpResponse> {
        refresh::refresh_catalog(self, request, source).await
    }

    /// 代理下载云盘 PDF
    pub async fn proxy_pdf(
        &self,
        request: &HttpRequest,
        file_id: &str,
    ) -> ActixResult<HttpResponse> {
        pdf::proxy_pdf(self, request, file_id).await
    }
}
