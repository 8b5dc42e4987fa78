//! 连板接口处理器
//!
//! ## API 列表
//! - GET /api/stocks?min_board=2&mode=first_run - 今日连板股
//! - GET /api/stocks/{code}/history?days=30 - 个股日K线与连板数
//! - GET /api/trend?days=30 - 近 N 日涨停家数
//! - GET /api/stats - 今日涨停统计
//! - GET /api/quotes?limit=100 - 全市场行情快照

use actix_web::{web, HttpResponse, Result};
use regex::Regex;
use std::sync::OnceLock;

use crate::handlers::error::ApiError;
use crate::models::{HistoryQuery, QuotesQuery, StocksQuery, TrendQuery};
use crate::services::board_service::{DEFAULT_MIN_BOARD, DEFAULT_TREND_DAYS};
use crate::services::{BoardService, MarketDataSource};

/// 完整代码格式：6 位数字加交易所后缀
fn full_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(?i)\d{6}\.(SH|SZ)$").expect("valid full code regex"))
}

/// 获取连板股票数据
///
/// GET /api/stocks?min_board=2&mode=current_run
pub async fn get_stocks<S: MarketDataSource + 'static>(
    service: web::Data<BoardService<S>>,
    query: web::Query<StocksQuery>,
) -> Result<HttpResponse> {
    let min_board = query.min_board.unwrap_or(DEFAULT_MIN_BOARD);

    let stocks = match query.mode {
        Some(mode) => service.top_boards_with(min_board, mode).await,
        None => service.top_boards(min_board).await,
    };
    Ok(HttpResponse::Ok().json(stocks))
}

/// 获取个股历史K线
///
/// GET /api/stocks/{code}/history?days=30
pub async fn get_stock_history<S: MarketDataSource + 'static>(
    service: web::Data<BoardService<S>>,
    path: web::Path<String>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, ApiError> {
    let code = path.into_inner().to_uppercase();
    if !full_code_pattern().is_match(&code) {
        return Err(ApiError::BadRequest(format!(
            "无效的股票代码 {}，格式应为 600000.SH 或 000001.SZ",
            code
        )));
    }

    let days = query.days.unwrap_or(service.settings().history_days);
    if days == 0 {
        return Err(ApiError::BadRequest("days 必须大于 0".to_string()));
    }

    let history = service.history(&code, days).await?;
    Ok(HttpResponse::Ok().json(history))
}

/// 获取近 N 日涨停趋势
///
/// GET /api/trend?days=30，超过 `max_trend_days` 时按上限截断
pub async fn get_trend<S: MarketDataSource + 'static>(
    service: web::Data<BoardService<S>>,
    query: web::Query<TrendQuery>,
) -> Result<HttpResponse> {
    let days = query
        .days
        .unwrap_or(DEFAULT_TREND_DAYS)
        .min(service.settings().max_trend_days);

    let trend = service.trend(days).await;
    Ok(HttpResponse::Ok().json(trend))
}

/// 获取统计数据
///
/// GET /api/stats
pub async fn get_stats<S: MarketDataSource + 'static>(
    service: web::Data<BoardService<S>>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.stats().await))
}

/// 获取全市场行情
///
/// GET /api/quotes?limit=100
pub async fn list_quotes<S: MarketDataSource + 'static>(
    service: web::Data<BoardService<S>>,
    query: web::Query<QuotesQuery>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.quotes(query.limit).await))
}

pub fn config<S: MarketDataSource + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/stocks", web::get().to(get_stocks::<S>))
        .route("/stocks/{code}/history", web::get().to(get_stock_history::<S>))
        .route("/trend", web::get().to(get_trend::<S>))
        .route("/stats", web::get().to(get_stats::<S>))
        .route("/quotes", web::get().to(list_quotes::<S>));
}
