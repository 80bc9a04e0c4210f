//! 服务配置
//!
//! 配置来源优先级：命令行第一个参数 > `USERS_API_CONFIG` 环境变量 >
//! 默认位置的 `config.toml` > 内置默认值。文件中缺失的键使用默认值。

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV: &str = "USERS_API_CONFIG";

/// 未显式指定时依次尝试的配置文件
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 服务配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址（IP）
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒），0 表示不限制
    pub timeout_seconds: u64,
    /// 是否开启跨域
    pub cors: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)，`RUST_LOG` 优先
    pub level: String,
    /// 是否启用控制台输出
    pub console_output: bool,
    /// 日志文件目录，不设置则不写文件
    pub log_dir: Option<PathBuf>,
    /// 日志文件名前缀
    pub file_prefix: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            timeout_seconds: 30,
            cors: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console_output: true,
            log_dir: None,
            file_prefix: "users-api".to_string(),
        }
    }
}

impl Config {
    /// 确定配置文件路径，找不到时返回 `None`
    pub fn locate(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(|| {
                DEFAULT_CONFIG_PATHS
                    .iter()
                    .map(PathBuf::from)
                    .find(|path| path.exists())
            })
    }

    /// 加载并校验配置，`path` 为 `None` 时使用默认配置
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        self.socket_addr()?;

        if !VALID_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, VALID_LEVELS
            )));
        }
        if self.logging.log_dir.is_some() && self.logging.file_prefix.is_empty() {
            return Err(ConfigError::Validation("日志文件名前缀不能为空".to_string()));
        }

        Ok(())
    }

    /// 监听地址
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.http.bind_address, self.http.port)
            .parse()
            .map_err(|e| {
                ConfigError::Validation(format!(
                    "无效的监听地址 {}:{}: {}",
                    self.http.bind_address, self.http.port, e
                ))
            })
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.log_dir.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.http.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.http.bind_address = "not an ip".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[http]\nport = 9090\n\n[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.http.port, 9090);
        assert_eq!(config.http.bind_address, "127.0.0.1");
        assert!(config.http.cors);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file_prefix, "users-api");
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[http\nport = ").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(ConfigError::Parse(_))));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(Some(&missing)), Err(ConfigError::FileRead(_))));
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = PathBuf::from("/tmp/explicit.toml");
        assert_eq!(Config::locate(Some(explicit.clone())), Some(explicit));
    }
}
