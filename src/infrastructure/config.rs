//! 配置加载
//!
//! 先读 `config.toml`（或 `./config/config.toml`），找不到则用默认值；
//! 再用 `.env` 和环境变量覆盖。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];

/// 面板配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub server: ServerConfig,
    /// 存储配置
    pub store: StoreConfig,
    /// 库存规则配置
    pub inventory: InventoryConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// 连接串；未设置时从凭据文件读取
    pub database_url: Option<String>,
    /// 服务账号凭据文件，默认位于进程工作目录
    pub credentials_file: PathBuf,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

/// 库存规则配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// 全局低库存阈值
    pub low_stock_threshold: i64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志文件目录
    pub log_dir: PathBuf,
    /// 日志文件名前缀
    pub file_prefix: String,
    /// 是否启用控制台输出
    pub console_output: bool,
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 服务账号凭据文件内容
#[derive(Debug, Deserialize)]
struct ServiceAccount {
    database_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 5000,
            timeout_seconds: 30,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Postgres,
            database_url: None,
            credentials_file: PathBuf::from("serviceAccountKey.json"),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_seconds: 8,
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./logs"),
            file_prefix: "gestio".to_string(),
            console_output: true,
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：文件 -> `.env` -> 环境变量，最后校验
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = match CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
            Some(path) => Config::load_from_file(path)?,
            None => Config::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 用环境变量覆盖配置项
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.bind_address = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_var("PORT", &port)?;
        }
        if let Some(backend) = lookup("STORE_BACKEND") {
            self.store.backend = match backend.trim().to_lowercase().as_str() {
                "postgres" => StoreBackend::Postgres,
                "memory" => StoreBackend::Memory,
                other => {
                    return Err(ConfigError::Validation(format!(
                        "unknown STORE_BACKEND: {}",
                        other
                    )))
                }
            };
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.store.database_url = Some(url);
        }
        if let Some(path) = lookup("SERVICE_ACCOUNT_FILE") {
            self.store.credentials_file = PathBuf::from(path);
        }
        if let Some(threshold) = lookup("STOCK_THRESHOLD") {
            self.inventory.low_stock_threshold = parse_var("STOCK_THRESHOLD", &threshold)?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_address.is_empty() {
            return Err(ConfigError::Validation("bind address must not be empty".to_string()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be greater than 0".to_string()));
        }
        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if self.inventory.low_stock_threshold < 0 {
            return Err(ConfigError::Validation(
                "low_stock_threshold cannot be negative".to_string(),
            ));
        }
        if self.store.max_connections == 0 || self.store.min_connections > self.store.max_connections
        {
            return Err(ConfigError::Validation(
                "store connection limits are inconsistent".to_string(),
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "invalid log level: {}, expected one of {:?}",
                self.logging.level, valid_levels
            )));
        }

        if self.store.backend == StoreBackend::Postgres {
            self.store.resolve_database_url()?;
        }

        Ok(())
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}

impl StoreConfig {
    /// 优先使用显式连接串，否则读取凭据文件
    pub fn resolve_database_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = self.database_url.as_ref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.clone());
        }

        let content = fs::read_to_string(&self.credentials_file).map_err(|e| {
            ConfigError::Credentials(format!(
                "DATABASE_URL is not set and {} could not be read: {}",
                self.credentials_file.display(),
                e
            ))
        })?;
        let account: ServiceAccount = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Credentials(e.to_string()))?;

        Ok(account.database_url)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Validation(format!("invalid {} value: {}", key, value)))
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(String),
    #[error("failed to parse config file: {0}")]
    Parse(String),
    #[error("invalid credentials file: {0}")]
    Credentials(String),
    #[error("invalid configuration: {0}")]
    Validation(String),
}
