//! # 用户 CRUD 服务
//!
//! 基于 Axum 的内存用户管理服务，分层结构：
//! - `app`：路由注册、处理器、用户模型与内存存储
//! - `core`：统一错误响应与请求日志中间件
//! - `infrastructure`：日志初始化
//! - `config`：TOML 配置加载

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{build_app, router, AppState};
pub use config::{Config, ConfigError};
