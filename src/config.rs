//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，缺省时使用内置默认值

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 上游数据源（东方财富）配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// 行情列表接口
    #[serde(default = "default_quote_url")]
    pub quote_url: String,
    /// 日K线接口
    #[serde(default = "default_history_url")]
    pub history_url: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// 连板计算配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// 涨停判定阈值（百分比）
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// 参与连板计算的涨停股上限
    #[serde(default = "default_candidate_cap")]
    pub candidate_cap: usize,
    /// 返回结果上限
    #[serde(default = "default_result_cap")]
    pub result_cap: usize,
    /// 每只股票拉取的日K线条数
    #[serde(default = "default_history_days")]
    pub history_days: usize,
    /// 并发拉取K线的数量
    #[serde(default = "default_history_concurrency")]
    pub history_concurrency: usize,
    /// 趋势接口允许的最大天数
    #[serde(default = "default_max_trend_days")]
    pub max_trend_days: u32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// 配置来源，日志系统初始化之后再输出
#[derive(Debug)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
    Invalid { path: PathBuf, error: String },
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }
fn default_quote_url() -> String { "https://push2.eastmoney.com/api/qt/clist/get".to_string() }
fn default_history_url() -> String { "https://push2his.eastmoney.com/api/qt/stock/kline/get".to_string() }
fn default_timeout() -> u64 { 10 }
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}
fn default_threshold() -> f64 { 9.9 }
fn default_candidate_cap() -> usize { 50 }
fn default_result_cap() -> usize { 30 }
fn default_history_days() -> usize { 30 }
fn default_history_concurrency() -> usize { 5 }
fn default_max_trend_days() -> u32 { 365 }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            quote_url: default_quote_url(),
            history_url: default_history_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            candidate_cap: default_candidate_cap(),
            result_cap: default_result_cap(),
            history_days: default_history_days(),
            history_concurrency: default_history_concurrency(),
            max_trend_days: default_max_trend_days(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值
    ///
    /// 此时日志系统尚未初始化，加载结果通过 [`ConfigSource`] 交给调用方记录
    pub fn load() -> (Self, ConfigSource) {
        let config_paths = ["config.json", "config/config.json"];

        for path in config_paths {
            if Path::new(path).exists() {
                return match Self::from_file(path) {
                    Ok(config) => (config, ConfigSource::File(PathBuf::from(path))),
                    Err(e) => (
                        Self::default(),
                        ConfigSource::Invalid {
                            path: PathBuf::from(path),
                            error: e.to_string(),
                        },
                    ),
                };
            }
        }

        (Self::default(), ConfigSource::Default)
    }

    /// 校验上游地址与各项上限
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("upstream.quote_url", &self.upstream.quote_url),
            ("upstream.history_url", &self.upstream.history_url),
        ] {
            Url::parse(value).map_err(|e| anyhow!("{} 不是合法的 URL: {}", name, e))?;
        }

        if self.upstream.timeout_secs == 0 {
            return Err(anyhow!("upstream.timeout_secs 必须大于 0"));
        }
        if self.board.candidate_cap == 0 || self.board.result_cap == 0 {
            return Err(anyhow!("board.candidate_cap 与 board.result_cap 必须大于 0"));
        }
        if self.board.history_days < 2 {
            return Err(anyhow!("board.history_days 至少为 2 才能计算涨幅"));
        }
        Ok(())
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
