//! DATASEA Archive - 学生社区归档门户后端服务
//!
//! 基于 Actix Web 构建的课程资料 / 学生期刊归档系统后端：
//! 扫描云盘目录树并按 年份/学期/课程/类别 分类，管理学生投稿的
//! 审核、水印与发布流程。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis），目录扫描结果按来源缓存
//! - `config`: 配置管理
//! - `drive`: 云盘客户端与递归目录扫描器
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 管理端鉴权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（目录服务、投稿与发布流水线）
//! - `storage`: 数据存储层（SeaORM）
//! - `transient`: 临时文件存储客户端（投稿原始文件）
//! - `utils`: 工具函数（PDF 水印、文件名清洗等）

pub mod cache;
pub mod config;
pub mod drive;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod transient;
pub mod utils;
