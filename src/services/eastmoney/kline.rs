//! 日K线接口
//!
//! 对接 https://push2his.eastmoney.com/api/qt/stock/kline/get

use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;

use crate::models::{DailyBar, Exchange};
use crate::services::error::FetchError;

use super::common::{get_json, KLINE_DAILY, KLINE_FIELDS1, KLINE_FIELDS2, KLINE_NO_ADJUST};

/// 拆分完整代码，返回 (纯代码, 交易所)
///
/// 代码文本中含 SH 即视为沪市，否则为深市
pub fn split_full_code(full_code: &str) -> (String, Exchange) {
    let code = full_code.replace(".SH", "").replace(".SZ", "");
    let exchange = if full_code.contains("SH") {
        Exchange::Shanghai
    } else {
        Exchange::Shenzhen
    };
    (code, exchange)
}

/// 获取截至 end 日的最近 window_days 根日K线（不复权）
pub async fn fetch_history(
    client: &Client,
    url: &str,
    full_code: &str,
    window_days: usize,
    end: NaiveDate,
) -> Result<Vec<DailyBar>, FetchError> {
    let (code, exchange) = split_full_code(full_code);
    let params = [
        ("secid", format!("{}.{}", exchange.marker(), code)),
        ("fields1", KLINE_FIELDS1.to_string()),
        ("fields2", KLINE_FIELDS2.to_string()),
        ("klt", KLINE_DAILY.to_string()),
        ("fqt", KLINE_NO_ADJUST.to_string()),
        ("end", end.format("%Y%m%d").to_string()),
        ("lmt", window_days.to_string()),
    ];

    log::debug!("请求日K线 {} secid={}", full_code, params[0].1);
    let root = get_json(client, url, &params).await?;
    let mut bars = parse_klines(&root)?;

    // 上游偶尔无视 lmt，只保留最近的 window_days 根
    if bars.len() > window_days {
        bars.drain(..bars.len() - window_days);
    }

    Ok(bars)
}

/// 解析 data.klines，data 为 null（如代码不存在）时返回空
pub fn parse_klines(root: &Value) -> Result<Vec<DailyBar>, FetchError> {
    let Some(lines) = root
        .get("data")
        .and_then(|data| data.get("klines"))
        .and_then(Value::as_array)
    else {
        return Ok(Vec::new());
    };

    lines
        .iter()
        .map(|line| {
            line.as_str()
                .ok_or_else(|| FetchError::MalformedBar(line.to_string()))
                .and_then(parse_kline_line)
        })
        .collect()
}

/// 解析单根K线，格式: 日期,开盘,收盘,最高,最低,成交量,成交额,...
pub fn parse_kline_line(line: &str) -> Result<DailyBar, FetchError> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 6 {
        return Err(FetchError::MalformedBar(line.to_string()));
    }

    let number = |idx: usize| -> Result<f64, FetchError> {
        parts[idx]
            .trim()
            .parse::<f64>()
            .map_err(|_| FetchError::MalformedBar(line.to_string()))
    };

    let date = NaiveDate::parse_from_str(parts[0].trim(), "%Y-%m-%d")
        .map_err(|_| FetchError::MalformedBar(line.to_string()))?;
    let open = number(1)?;
    let close = number(2)?;

    Ok(DailyBar {
        date,
        open,
        close,
        high: number(3)?,
        low: number(4)?,
        volume: number(5)?,
        change: close - open,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn kline_fixture() -> Value {
        json!({
            "rc": 0,
            "data": {
                "code": "600000",
                "market": 1,
                "name": "浦发银行",
                "klines": [
                    "2024-01-02,10.00,11.00,11.00,9.95,523411,575752100.00,10.50,10.00,1.00,0.18",
                    "2024-01-03,11.20,12.10,12.10,11.10,812345,982937450.00,9.09,10.00,1.10,0.28",
                    "2024-01-04,12.50,13.31,13.31,12.40,1002003,1333666000.00,7.52,10.00,1.21,0.34"
                ]
            }
        })
    }

    #[test]
    fn test_split_full_code() {
        assert_eq!(split_full_code("600000.SH"), ("600000".to_string(), Exchange::Shanghai));
        assert_eq!(split_full_code("000001.SZ"), ("000001".to_string(), Exchange::Shenzhen));
        assert_eq!(split_full_code("300750"), ("300750".to_string(), Exchange::Shenzhen));
    }

    #[test]
    fn test_parse_klines_reproduces_fields() {
        let bars = parse_klines(&kline_fixture()).unwrap();

        assert_eq!(bars.len(), 3);
        let first = &bars[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(first.open, 10.0);
        assert_eq!(first.close, 11.0);
        assert_eq!(first.high, 11.0);
        assert_eq!(first.low, 9.95);
        assert_eq!(first.volume, 523411.0);
        assert_eq!(first.change, 11.0 - 10.0);

        let last = &bars[2];
        assert_eq!(last.open, 12.5);
        assert_eq!(last.close, 13.31);
        assert_eq!(last.high, 13.31);
        assert_eq!(last.low, 12.4);
        assert_eq!(last.volume, 1002003.0);
        assert_eq!(last.change, 13.31 - 12.5);
    }

    #[test]
    fn test_parse_klines_null_data() {
        let bars = parse_klines(&json!({ "rc": 0, "data": null })).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn test_parse_kline_line_rejects_malformed() {
        assert!(matches!(
            parse_kline_line("2024-01-02,10.00,11.00"),
            Err(FetchError::MalformedBar(_))
        ));
        assert!(matches!(
            parse_kline_line("2024-01-02,10.00,abc,11.00,9.95,100"),
            Err(FetchError::MalformedBar(_))
        ));
        assert!(matches!(
            parse_kline_line("20240102,10.00,11.00,11.00,9.95,100"),
            Err(FetchError::MalformedBar(_))
        ));
    }

    #[actix_web::test]
    async fn test_fetch_history_builds_secid_and_truncates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/qt/stock/kline/get"))
            .and(query_param("secid", "1.600000"))
            .and(query_param("klt", "101"))
            .and(query_param("fqt", "0"))
            .and(query_param("end", "20240104"))
            .and(query_param("lmt", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(kline_fixture()))
            .mount(&server)
            .await;

        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let url = format!("{}/api/qt/stock/kline/get", server.uri());
        let end = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();

        let bars = fetch_history(&client, &url, "600000.SH", 2, end).await.unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(bars[1].close, 13.31);
    }
}
