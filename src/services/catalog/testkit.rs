//! 目录服务测试用的内存缓存假实现

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::CatalogService;
use crate::cache::{CacheResult, ObjectCache};
use dashmap::DashMap;

pub struct FakeCache {
    entries: Mutex<HashMap<String, String>>,
}

impl FakeCache {
    pub fn empty() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let cache = Self::empty();
        cache
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        cache
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl ObjectCache for FakeCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.entries.lock().unwrap().get(key) {
            Some(value) => CacheResult::Found(value.clone()),
            None => CacheResult::NotFound,
        }
    }

    async fn insert_raw(&self, key: String, value: String, _ttl: u64) {
        self.entries.lock().unwrap().insert(key, value);
    }

    async fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    async fn invalidate_all(&self) {
        self.entries.lock().unwrap().clear();
    }
}

pub fn service_with_cache(cache: Arc<FakeCache>) -> CatalogService {
    CatalogService {
        cache: Some(cache),
        drive: None,
        scan_locks: DashMap::new(),
    }
}
