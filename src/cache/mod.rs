//! 缓存层
//!
//! 以插件形式注册的对象缓存后端（Moka 内存缓存 / Redis），
//! 目录扫描结果按来源以 JSON 字符串形式缓存于此。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;

/// 缓存读取结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

/// 对象缓存统一接口
#[async_trait]
pub trait ObjectCache: Send + Sync {
    /// 读取原始字符串值
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// 写入原始字符串值，ttl 为秒，0 表示使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    /// 删除指定键
    async fn remove(&self, key: &str);
    /// 清空所有缓存
    async fn invalidate_all(&self);
}

/// 声明并注册一个对象缓存插件
///
/// 在模块加载时（ctor）将构造函数注册进全局插件表。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $cache_type:ty) => {
        #[ctor::ctor]
        fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$cache_type>::new()
                            .map_err($crate::errors::ArchiveError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    })
                        as $crate::cache::register::BoxedObjectCacheFuture
                }),
            );
        }
    };
}
