//! 东方财富数据源
//!
//! ## 数据来源
//! - push2.eastmoney.com：沪深 A 股实时行情列表
//! - push2his.eastmoney.com：个股日K线
//!
//! 所有请求共用一个带超时的 HTTP 客户端，不做重试

mod common;
pub mod kline;
pub mod quotes;

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;

use crate::config::UpstreamConfig;
use crate::models::{DailyBar, LimitUpRecord, QuoteRecord};
use crate::services::error::FetchError;
use crate::services::MarketDataSource;

pub use common::beijing_today;

/// 东方财富行情客户端
pub struct EastMoneyClient {
    /// HTTP 客户端
    client: Client,
    quote_url: String,
    history_url: String,
}

impl EastMoneyClient {
    /// 按配置创建客户端
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            quote_url: config.quote_url.clone(),
            history_url: config.history_url.clone(),
        })
    }
}

impl MarketDataSource for EastMoneyClient {
    async fn fetch_limit_up(&self, threshold: f64) -> Result<Vec<LimitUpRecord>, FetchError> {
        quotes::fetch_limit_up(&self.client, &self.quote_url, threshold).await
    }

    async fn fetch_all(&self) -> Result<Vec<QuoteRecord>, FetchError> {
        quotes::fetch_all(&self.client, &self.quote_url).await
    }

    async fn fetch_history(
        &self,
        full_code: &str,
        window_days: usize,
    ) -> Result<Vec<DailyBar>, FetchError> {
        kline::fetch_history(
            &self.client,
            &self.history_url,
            full_code,
            window_days,
            beijing_today(),
        )
        .await
    }

    async fn count_limit_up_on(&self, date: NaiveDate, threshold: f64) -> Result<usize, FetchError> {
        quotes::count_limit_up_on(&self.client, &self.quote_url, date, threshold).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[actix_web::test]
    async fn test_client_uses_configured_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quotes"))
            .and(header("user-agent", "limitup-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "diff": [
                    { "f2": 8.8, "f3": 10.02, "f12": "002001", "f13": 0, "f14": "新和成" }
                ] }
            })))
            .mount(&server)
            .await;

        let config = UpstreamConfig {
            quote_url: format!("{}/quotes", server.uri()),
            history_url: format!("{}/kline", server.uri()),
            timeout_secs: 5,
            user_agent: "limitup-test".to_string(),
        };
        let client = EastMoneyClient::new(&config).unwrap();

        let stocks = client.fetch_limit_up(9.9).await.unwrap();
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].full_code, "002001.SZ");
    }
}
