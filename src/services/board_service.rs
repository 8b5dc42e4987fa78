//! 连板与趋势聚合服务
//!
//! 串联涨停列表、个股K线与连板计算，输出排序后的连板股；
//! 同时提供逐日涨停家数趋势与统计数据。
//!
//! 上游请求失败不会向调用方传播：涨停列表失败视为空列表，
//! 单只股票K线失败视为空K线（连板数为 0），单日计数失败视为 0。

use chrono::{Days, NaiveDate};
use futures::stream::{self, StreamExt};

use crate::config::BoardConfig;
use crate::models::{
    get_beijing_time, BoardStatus, QuoteRecord, ScanMode, Stats, StockHistory, StockResult,
    TrendPoint,
};
use crate::services::eastmoney::beijing_today;
use crate::services::error::FetchError;
use crate::services::streak::{streak, streak_with};
use crate::services::MarketDataSource;

/// 默认最小连板数
pub const DEFAULT_MIN_BOARD: i64 = 2;
/// 默认趋势天数
pub const DEFAULT_TREND_DAYS: u32 = 30;

/// 连板聚合服务
pub struct BoardService<S> {
    source: S,
    settings: BoardConfig,
}

impl<S: MarketDataSource> BoardService<S> {
    pub fn new(source: S, settings: BoardConfig) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &BoardConfig {
        &self.settings
    }

    /// 今日连板股，按连板数降序
    pub async fn top_boards(&self, min_board: i64) -> Vec<StockResult> {
        self.top_boards_with(min_board, ScanMode::default()).await
    }

    /// 按指定扫描方向计算今日连板股
    ///
    /// 只取涨停列表前 candidate_cap 只（保持接口返回顺序）以控制请求量，
    /// 连板数相同的股票保持原有相对顺序。
    pub async fn top_boards_with(&self, min_board: i64, mode: ScanMode) -> Vec<StockResult> {
        let universe = match self.source.fetch_limit_up(self.settings.threshold).await {
            Ok(stocks) => stocks,
            Err(e) => {
                log::warn!("获取涨停股票失败: {}", e);
                return Vec::new();
            }
        };

        if universe.is_empty() {
            log::info!("今日无涨停股票");
            return Vec::new();
        }

        let candidates: Vec<_> = universe
            .into_iter()
            .take(self.settings.candidate_cap)
            .collect();

        // buffered 保证输出顺序与候选顺序一致
        let boards: Vec<u32> = stream::iter(candidates.iter())
            .map(|stock| async move {
                match self
                    .source
                    .fetch_history(&stock.full_code, self.settings.history_days)
                    .await
                {
                    Ok(bars) => streak_with(&bars, mode),
                    Err(e) => {
                        log::warn!("获取历史数据失败 {}: {}", stock.full_code, e);
                        streak_with(&[], mode)
                    }
                }
            })
            .buffered(self.settings.history_concurrency.max(1))
            .collect()
            .await;

        let mut result: Vec<StockResult> = candidates
            .into_iter()
            .zip(boards)
            .filter(|(_, board)| i64::from(*board) >= min_board)
            .map(|(stock, board)| StockResult {
                code: stock.code,
                name: stock.name,
                board,
                price: stock.price.unwrap_or(0.0),
                change: round2(stock.change),
                status: BoardStatus::from_board(board),
            })
            .collect();

        // sort_by 为稳定排序
        result.sort_by(|a, b| b.board.cmp(&a.board));
        result.truncate(self.settings.result_cap);

        log::info!("连板计算完成: min_board={} 命中 {} 只", min_board, result.len());
        result
    }

    /// 近 days 个自然日（含今日）的涨停家数，按日期升序
    pub async fn trend(&self, days: u32) -> Vec<TrendPoint> {
        self.trend_ending(beijing_today(), days).await
    }

    /// 以 today 为最后一天的涨停家数趋势
    pub async fn trend_ending(&self, today: NaiveDate, days: u32) -> Vec<TrendPoint> {
        let dates: Vec<NaiveDate> = (0..u64::from(days))
            .map_while(|offset| today.checked_sub_days(Days::new(offset)))
            .collect();

        let mut points: Vec<TrendPoint> = stream::iter(dates)
            .map(|date| async move {
                let count = match self
                    .source
                    .count_limit_up_on(date, self.settings.threshold)
                    .await
                {
                    Ok(count) => count,
                    Err(e) => {
                        log::warn!("获取 {} 涨停数量失败: {}", date, e);
                        0
                    }
                };
                TrendPoint {
                    date: date.format("%Y-%m-%d").to_string(),
                    count,
                }
            })
            .buffered(self.settings.history_concurrency.max(1))
            .collect()
            .await;

        // 由近及远生成，反转为升序
        points.reverse();
        points
    }

    /// 今日涨停数量与更新时间
    pub async fn stats(&self) -> Stats {
        let total_stocks = match self.source.fetch_limit_up(self.settings.threshold).await {
            Ok(stocks) => stocks.len(),
            Err(e) => {
                log::warn!("获取涨停股票失败: {}", e);
                0
            }
        };

        Stats {
            total_stocks,
            update_time: get_beijing_time().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// 全市场行情快照，失败时返回空列表
    pub async fn quotes(&self, limit: Option<usize>) -> Vec<QuoteRecord> {
        match self.source.fetch_all().await {
            Ok(mut quotes) => {
                if let Some(limit) = limit {
                    quotes.truncate(limit);
                }
                quotes
            }
            Err(e) => {
                log::warn!("获取股票列表失败: {}", e);
                Vec::new()
            }
        }
    }

    /// 单只股票的K线及两种口径的连板数，错误原样返回
    pub async fn history(&self, full_code: &str, days: usize) -> Result<StockHistory, FetchError> {
        let bars = self.source.fetch_history(full_code, days).await?;

        Ok(StockHistory {
            code: full_code.to_string(),
            board_first_run: streak(&bars),
            board_current_run: streak_with(&bars, ScanMode::CurrentRun),
            bars,
        })
    }
}

/// 保留两位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
