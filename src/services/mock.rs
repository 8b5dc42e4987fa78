//! 测试用固定数据源

use std::collections::{HashMap, HashSet};

use chrono::{Days, NaiveDate};

use crate::models::{DailyBar, Exchange, LimitUpRecord, QuoteRecord};
use crate::services::error::FetchError;
use crate::services::MarketDataSource;

/// 以内存数据模拟东方财富接口
#[derive(Default)]
pub struct MockSource {
    /// 为 None 时模拟涨停列表请求失败
    pub universe: Option<Vec<LimitUpRecord>>,
    pub quotes: Vec<QuoteRecord>,
    /// 按完整代码索引的收盘价序列
    pub histories: HashMap<String, Vec<f64>>,
    /// K线请求失败的完整代码
    pub failing: HashSet<String>,
    /// 按日期的涨停家数，缺失的日期视为请求失败
    pub daily_counts: HashMap<NaiveDate, usize>,
}

impl MockSource {
    pub fn with_universe(stocks: Vec<LimitUpRecord>) -> Self {
        Self {
            universe: Some(stocks),
            ..Default::default()
        }
    }

    pub fn history(mut self, full_code: &str, closes: &[f64]) -> Self {
        self.histories.insert(full_code.to_string(), closes.to_vec());
        self
    }

    pub fn failing_history(mut self, full_code: &str) -> Self {
        self.failing.insert(full_code.to_string());
        self
    }
}

/// 构造一条涨停记录
pub fn limit_up(code: &str, name: &str, price: Option<f64>, change: f64) -> LimitUpRecord {
    let exchange = if code.starts_with('6') {
        Exchange::Shanghai
    } else {
        Exchange::Shenzhen
    };
    LimitUpRecord {
        code: code.to_string(),
        full_code: exchange.full_code(code),
        name: name.to_string(),
        price,
        change,
        high: price,
        low: None,
        open: None,
        prev_close: None,
        volume: None,
        amount: None,
        exchange,
    }
}

/// 由收盘价序列生成日K线，日期自 2024-01-02 起逐日递增
pub fn bars_from_closes(closes: &[f64]) -> Vec<DailyBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| DailyBar {
            date: start + Days::new(i as u64),
            open: close,
            close,
            high: close,
            low: close,
            volume: 1000.0,
            change: 0.0,
        })
        .collect()
}

impl MarketDataSource for MockSource {
    async fn fetch_limit_up(&self, threshold: f64) -> Result<Vec<LimitUpRecord>, FetchError> {
        match &self.universe {
            Some(stocks) => Ok(stocks
                .iter()
                .filter(|s| s.change >= threshold)
                .cloned()
                .collect()),
            None => Err(FetchError::Status(503)),
        }
    }

    async fn fetch_all(&self) -> Result<Vec<QuoteRecord>, FetchError> {
        Ok(self.quotes.clone())
    }

    async fn fetch_history(
        &self,
        full_code: &str,
        window_days: usize,
    ) -> Result<Vec<DailyBar>, FetchError> {
        if self.failing.contains(full_code) {
            return Err(FetchError::MalformedBar(format!("{} 数据异常", full_code)));
        }
        let closes = self.histories.get(full_code).cloned().unwrap_or_default();
        let skip = closes.len().saturating_sub(window_days);
        Ok(bars_from_closes(&closes[skip..]))
    }

    async fn count_limit_up_on(&self, date: NaiveDate, _threshold: f64) -> Result<usize, FetchError> {
        self.daily_counts
            .get(&date)
            .copied()
            .ok_or(FetchError::Status(500))
    }
}
