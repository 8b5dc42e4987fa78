//! 业务逻辑服务模块
//!
//! 封装数据获取、连板计算与聚合逻辑

pub mod board_service; // 连板与趋势聚合
pub mod eastmoney;     // 东方财富数据源
pub mod error;
pub mod streak;        // 连板数计算

#[cfg(test)]
pub mod mock;

use chrono::NaiveDate;

use crate::models::{DailyBar, LimitUpRecord, QuoteRecord};
use error::FetchError;

pub use board_service::BoardService;
pub use eastmoney::EastMoneyClient;

/// 行情数据源
///
/// 生产环境由 [`EastMoneyClient`] 实现，测试中替换为固定数据
#[allow(async_fn_in_trait)]
pub trait MarketDataSource {
    /// 今日涨跌幅不低于 threshold 的股票
    async fn fetch_limit_up(&self, threshold: f64) -> Result<Vec<LimitUpRecord>, FetchError>;

    /// 全部 A 股行情快照
    async fn fetch_all(&self) -> Result<Vec<QuoteRecord>, FetchError>;

    /// 最近 window_days 个交易日的日K线，按日期升序
    async fn fetch_history(
        &self,
        full_code: &str,
        window_days: usize,
    ) -> Result<Vec<DailyBar>, FetchError>;

    /// 指定日期的涨停家数
    async fn count_limit_up_on(&self, date: NaiveDate, threshold: f64) -> Result<usize, FetchError>;
}
