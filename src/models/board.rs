//! 连板与趋势数据模型

use serde::{Deserialize, Serialize};

/// 连板股状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardStatus {
    /// 首板
    New,
    Normal,
}

impl BoardStatus {
    pub fn from_board(board: u32) -> Self {
        if board == 1 {
            BoardStatus::New
        } else {
            BoardStatus::Normal
        }
    }
}

/// 连板数扫描方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// 从窗口最早一天向后扫描，遇到第一个非涨停日即停止
    #[default]
    FirstRun,
    /// 从最近一天向前回溯
    CurrentRun,
}

/// 连板股结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockResult {
    pub code: String,
    pub name: String,
    /// 连板数
    pub board: u32,
    /// 最新价，缺失时为 0
    pub price: f64,
    /// 涨跌幅，保留两位小数
    pub change: f64,
    pub status: BoardStatus,
}

/// 单日涨停家数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// 日期（YYYY-MM-DD）
    pub date: String,
    pub count: usize,
}

/// 统计数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    /// 今日涨停股数量
    pub total_stocks: usize,
    /// 更新时间（北京时间 YYYY-MM-DD HH:MM:SS）
    pub update_time: String,
}

/// 连板股查询参数
#[derive(Debug, Deserialize)]
pub struct StocksQuery {
    /// 最小连板数，默认 2
    pub min_board: Option<i64>,
    pub mode: Option<ScanMode>,
}

/// 趋势查询参数
#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    /// 天数，默认 30
    pub days: Option<u32>,
}

/// 行情列表查询参数
#[derive(Debug, Deserialize)]
pub struct QuotesQuery {
    pub limit: Option<usize>,
}

/// 历史K线查询参数
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub days: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label() {
        assert_eq!(BoardStatus::from_board(1), BoardStatus::New);
        assert_eq!(BoardStatus::from_board(2), BoardStatus::Normal);
        assert_eq!(BoardStatus::from_board(0), BoardStatus::Normal);
        assert_eq!(serde_json::to_string(&BoardStatus::New).unwrap(), "\"new\"");
        assert_eq!(serde_json::to_string(&BoardStatus::Normal).unwrap(), "\"normal\"");
    }

    #[test]
    fn test_scan_mode_query_values() {
        let mode: ScanMode = serde_json::from_str("\"current_run\"").unwrap();
        assert_eq!(mode, ScanMode::CurrentRun);
        assert_eq!(ScanMode::default(), ScanMode::FirstRun);
    }

    #[test]
    fn test_stock_result_shape() {
        let result = StockResult {
            code: "600000".to_string(),
            name: "浦发银行".to_string(),
            board: 3,
            price: 11.0,
            change: 10.01,
            status: BoardStatus::Normal,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["board"], 3);
        assert_eq!(value["status"], "normal");
        assert_eq!(value["change"], 10.01);
    }
}
