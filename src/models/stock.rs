//! 股票数据模型
//!
//! 定义行情快照、涨停股、日K线等结构

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 交易所
///
/// 东方财富接口以 f13 字段标记市场：1 为沪市，其余为深市
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exchange {
    #[serde(rename = "SH")]
    Shanghai,
    #[serde(rename = "SZ")]
    Shenzhen,
}

impl Exchange {
    /// 由 f13 市场标记解析
    pub fn from_marker(marker: Option<i64>) -> Self {
        match marker {
            Some(1) => Exchange::Shanghai,
            _ => Exchange::Shenzhen,
        }
    }

    /// 东方财富 secid 中使用的市场编号
    pub fn marker(self) -> u8 {
        match self {
            Exchange::Shanghai => 1,
            Exchange::Shenzhen => 0,
        }
    }

    /// 完整代码后缀
    pub fn suffix(self) -> &'static str {
        match self {
            Exchange::Shanghai => "SH",
            Exchange::Shenzhen => "SZ",
        }
    }

    /// 拼接带交易所后缀的完整代码，如 600000.SH
    pub fn full_code(self, code: &str) -> String {
        format!("{}.{}", code, self.suffix())
    }
}

/// 行情快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// 股票代码（不含后缀）
    pub code: String,
    /// 股票名称
    pub name: String,
    /// 最新价
    pub price: Option<f64>,
    /// 涨跌幅（百分比）
    pub change: Option<f64>,
    /// 所属交易所
    pub exchange: Exchange,
}

/// 涨停股票
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitUpRecord {
    /// 股票代码（不含后缀）
    pub code: String,
    /// 完整代码，如 000001.SZ
    pub full_code: String,
    pub name: String,
    pub price: Option<f64>,
    /// 涨跌幅，恒不小于涨停阈值
    pub change: f64,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub open: Option<f64>,
    /// 昨收
    pub prev_close: Option<f64>,
    /// 成交量（手）
    pub volume: Option<f64>,
    /// 成交额（元）
    pub amount: Option<f64>,
    pub exchange: Exchange,
}

/// 日K线（不复权）
///
/// change 为当日收盘减开盘，并非相对前一日的涨跌
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    pub change: f64,
}

/// 单只股票的历史K线与连板数
#[derive(Debug, Clone, Serialize)]
pub struct StockHistory {
    pub code: String,
    pub bars: Vec<DailyBar>,
    /// 从窗口最早一天起算的连板数
    pub board_first_run: u32,
    /// 从最近一天向前回溯的连板数
    pub board_current_run: u32,
}
