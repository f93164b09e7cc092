use serde::{Deserialize, Serialize};

use crate::models::drive::entities::Source;

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    pub drive: DriveConfig,
    pub transient: TransientConfig,
    pub watermark: WatermarkConfig,
    pub admin: AdminConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(rename = "type")]
    pub cache_type: String,
    pub default_ttl: u64,
    pub catalog_ttl: u64, // 目录扫描结果缓存时长（秒），生产环境约一天
    pub redis: RedisConfig,
    pub memory: MemoryConfig,
}

/// Redis 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub key_prefix: String,
    pub pool_size: u64,
}

/// 内存缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

/// 云盘配置（Google Drive v3 兼容）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    pub api_base: String,    // 元数据/下载 API 根地址
    pub upload_base: String, // 上传 API 根地址
    pub token_uri: String,   // OAuth2 token 端点
    pub client_id: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub client_secret: String,
    #[serde(skip_serializing, default)]
    pub refresh_token: String,
    pub materi_folder_id: String,
    pub jurnal_folder_id: String,
    pub peralatan_folder_id: String,
    pub publish_folder_id: String, // 发布流水线的上传目标目录
    pub timeout: u64,              // HTTP 请求超时 (秒)
}

impl DriveConfig {
    /// 按来源取对应的根目录 ID
    pub fn root_folder_id(&self, source: Source) -> &str {
        match source {
            Source::Materi => &self.materi_folder_id,
            Source::Jurnal => &self.jurnal_folder_id,
            Source::Peralatan => &self.peralatan_folder_id,
        }
    }
}

/// 临时文件存储配置（UploadThing 兼容）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransientConfig {
    pub api_base: String,
    #[serde(skip_serializing, default)]
    pub api_key: String,
    pub timeout: u64, // HTTP 请求超时 (秒)
}

/// 水印配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatermarkConfig {
    pub footer_text: String, // 每页页脚的署名行
    pub stamp_text: String,  // 每页居中的大号斜向印章
}

/// 管理端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(skip_serializing, default)]
    pub api_token: String,
}
