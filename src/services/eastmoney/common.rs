//! 公共常量和辅助函数

use chrono::{NaiveDate, Utc};
use chrono_tz::Asia::Shanghai;
use reqwest::Client;
use serde_json::Value;

use crate::services::error::FetchError;

// ==================== 东方财富 API 常量 ====================

/// 沪深主板、创业板、科创板：m:0+t:6 深主板，m:0+t:80 创业板，m:1+t:2 沪主板，m:1+t:23 科创板
pub const MARKET_SEGMENTS: &str = "m:0+t:6,m:0+t:80,m:1+t:2,m:1+t:23";
/// 单次拉取的最大条数
pub const PAGE_SIZE: &str = "5000";
/// 全市场列表字段：最新价、涨跌幅、涨跌额、代码、市场、名称
pub const ALL_FIELDS: &str = "f2,f3,f4,f12,f13,f14";
/// 涨停列表字段，额外包含成交量、成交额、最高、最低、开盘、昨收
pub const LIMIT_UP_FIELDS: &str = "f2,f3,f4,f5,f6,f12,f13,f14,f15,f16,f17,f18";
/// 趋势统计只需要计数
pub const TREND_FIELDS: &str = "f2,f3,f12,f13,f14";
/// K线元数据字段
pub const KLINE_FIELDS1: &str = "f1,f2,f3,f4,f5,f6";
/// K线数据字段：日期、开、收、高、低、量、额、振幅、涨跌幅、涨跌额、换手率
pub const KLINE_FIELDS2: &str = "f51,f52,f53,f54,f55,f56,f57,f58,f59,f60,f61";
/// 日K
pub const KLINE_DAILY: &str = "101";
/// 不复权
pub const KLINE_NO_ADJUST: &str = "0";

/// 获取北京时间当天日期
pub fn beijing_today() -> NaiveDate {
    Utc::now().with_timezone(&Shanghai).date_naive()
}

/// 列表接口的公共查询参数
pub fn clist_params(fields: &str) -> Vec<(&'static str, String)> {
    vec![
        ("pn", "1".to_string()),
        ("pz", PAGE_SIZE.to_string()),
        ("po", "1".to_string()),
        ("np", "1".to_string()),
        ("fltt", "2".to_string()),
        ("invt", "2".to_string()),
        ("fid", "f3".to_string()),
        ("fs", MARKET_SEGMENTS.to_string()),
        ("fields", fields.to_string()),
    ]
}

/// 涨幅过滤条件，如 f3>=9.9
pub fn change_filter(threshold: f64) -> String {
    format!("f3>={}", threshold)
}

/// 发送 GET 请求并解析 JSON
pub async fn get_json(
    client: &Client,
    url: &str,
    params: &[(&str, String)],
) -> Result<Value, FetchError> {
    let response = client.get(url).query(params).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status().as_u16()));
    }

    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// 取出 data.diff 数组，data 为 null 时视为空
pub fn diff_rows(root: &Value) -> &[Value] {
    root.get("data")
        .and_then(|data| data.get("diff"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// 读取数值字段，停牌等情况下接口返回 "-"
pub fn field_f64(item: &Value, key: &str) -> Option<f64> {
    match item.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// 读取文本字段，数值会被转为字符串
pub fn field_string(item: &Value, key: &str) -> String {
    match item.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
