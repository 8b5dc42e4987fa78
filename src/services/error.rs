//! 上游数据抓取错误

use thiserror::Error;

/// 抓取行情或K线时可能出现的错误
///
/// 抓取层只负责如实返回错误，由聚合层决定降级为空结果
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("serde_json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed kline: {0}")]
    MalformedBar(String),
}
