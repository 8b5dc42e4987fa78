//! 行情列表接口
//!
//! 对接 https://push2.eastmoney.com/api/qt/clist/get

use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;

use crate::models::{Exchange, LimitUpRecord, QuoteRecord};
use crate::services::error::FetchError;

use super::common::{
    change_filter, clist_params, diff_rows, field_f64, field_string, get_json, ALL_FIELDS,
    LIMIT_UP_FIELDS, TREND_FIELDS,
};

/// 获取今日涨停股票
///
/// 服务端按 f3>=threshold 过滤后，本地再校验一次，防止涨跌幅缺失的记录混入
pub async fn fetch_limit_up(
    client: &Client,
    url: &str,
    threshold: f64,
) -> Result<Vec<LimitUpRecord>, FetchError> {
    let mut params = clist_params(LIMIT_UP_FIELDS);
    params.push(("filters", change_filter(threshold)));

    log::debug!("请求涨停列表 URL: {} threshold={}", url, threshold);
    let root = get_json(client, url, &params).await?;
    let stocks = parse_limit_up(&root, threshold);
    log::debug!("解析到 {} 只涨停股", stocks.len());

    Ok(stocks)
}

/// 获取全部 A 股行情快照
pub async fn fetch_all(client: &Client, url: &str) -> Result<Vec<QuoteRecord>, FetchError> {
    let params = clist_params(ALL_FIELDS);

    log::debug!("请求全市场行情 URL: {}", url);
    let root = get_json(client, url, &params).await?;

    Ok(parse_quotes(&root))
}

/// 统计指定日期的涨停家数
///
/// 行情列表接口本身是实时快照，beg/end 参数是否生效取决于上游，结果仅供参考
pub async fn count_limit_up_on(
    client: &Client,
    url: &str,
    date: NaiveDate,
    threshold: f64,
) -> Result<usize, FetchError> {
    let day = date.format("%Y%m%d").to_string();
    let mut params = clist_params(TREND_FIELDS);
    params.push(("filters", change_filter(threshold)));
    params.push(("beg", day.clone()));
    params.push(("end", day));

    let root = get_json(client, url, &params).await?;
    Ok(diff_rows(&root).len())
}

/// 解析涨停列表
pub fn parse_limit_up(root: &Value, threshold: f64) -> Vec<LimitUpRecord> {
    diff_rows(root)
        .iter()
        .filter_map(|item| {
            let change = field_f64(item, "f3").unwrap_or(0.0);
            if change < threshold {
                return None;
            }

            let code = field_string(item, "f12");
            let exchange = Exchange::from_marker(item.get("f13").and_then(Value::as_i64));

            Some(LimitUpRecord {
                full_code: exchange.full_code(&code),
                code,
                name: field_string(item, "f14"),
                price: field_f64(item, "f2"),
                change,
                high: field_f64(item, "f15"),
                low: field_f64(item, "f16"),
                open: field_f64(item, "f17"),
                prev_close: field_f64(item, "f18"),
                volume: field_f64(item, "f5"),
                amount: field_f64(item, "f6"),
                exchange,
            })
        })
        .collect()
}

/// 解析全市场行情
pub fn parse_quotes(root: &Value) -> Vec<QuoteRecord> {
    diff_rows(root)
        .iter()
        .map(|item| QuoteRecord {
            code: field_string(item, "f12"),
            name: field_string(item, "f14"),
            price: field_f64(item, "f2"),
            change: field_f64(item, "f3"),
            exchange: Exchange::from_marker(item.get("f13").and_then(Value::as_i64)),
        })
        .collect()
}
