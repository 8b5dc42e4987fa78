//! 连板数计算
//!
//! 纯函数，不做任何 IO。涨停近似为收盘价相对前一日收盘上涨不少于 9.9%。

use crate::models::{DailyBar, ScanMode};

/// 涨停判定阈值（百分比）
pub const LIMIT_UP_PCT: f64 = 9.9;

/// 计算连板数（默认从窗口最早一天起扫描）
pub fn streak(bars: &[DailyBar]) -> u32 {
    streak_with(bars, ScanMode::FirstRun)
}

/// 按指定方向计算连板数
pub fn streak_with(bars: &[DailyBar], mode: ScanMode) -> u32 {
    count_streak(bars, mode, LIMIT_UP_PCT)
}

/// 按指定方向与阈值计算连板数
///
/// - `FirstRun`：从第二根K线开始向后，遇到第一个不满足阈值的交易日立即停止，
///   之后即使再次涨停也不计入。统计的是窗口开头的连续涨停，而不一定是截至今日的连板。
/// - `CurrentRun`：从最新一根K线向前回溯，统计截至今日的连板。
fn count_streak(bars: &[DailyBar], mode: ScanMode, threshold: f64) -> u32 {
    if bars.len() < 2 {
        return 0;
    }

    let qualifies = |i: usize| {
        day_gain_pct(&bars[i - 1], &bars[i]).is_some_and(|pct| pct >= threshold)
    };

    let count = match mode {
        ScanMode::FirstRun => (1..bars.len()).take_while(|&i| qualifies(i)).count(),
        ScanMode::CurrentRun => (1..bars.len()).rev().take_while(|&i| qualifies(i)).count(),
    };

    count as u32
}

/// 相对前一日收盘的涨幅（百分比），前收为 0 时无法计算
pub fn day_gain_pct(prev: &DailyBar, curr: &DailyBar) -> Option<f64> {
    if prev.close == 0.0 {
        return None;
    }
    Some((curr.close - prev.close) / prev.close * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::bars_from_closes as bars;

    #[test]
    fn test_empty_and_single() {
        assert_eq!(streak(&[]), 0);
        assert_eq!(streak(&bars(&[10.0])), 0);
        assert_eq!(streak_with(&bars(&[10.0]), ScanMode::CurrentRun), 0);
    }

    #[test]
    fn test_consecutive_limit_ups() {
        assert_eq!(streak(&bars(&[10.0, 11.0, 12.1, 13.31])), 3);
    }

    #[test]
    fn test_first_break_stops_scan() {
        // 第二日仅涨 0.45%，第三日虽再度涨停也不计入
        assert_eq!(streak(&bars(&[10.0, 11.0, 11.05, 12.2])), 1);
    }

    #[test]
    fn test_first_day_miss_yields_zero() {
        assert_eq!(streak(&bars(&[10.0, 10.5, 11.55, 12.71])), 0);
    }

    #[test]
    fn test_zero_previous_close_is_not_limit_up() {
        assert_eq!(streak(&bars(&[0.0, 11.0, 12.1])), 0);
        assert_eq!(streak(&bars(&[10.0, 11.0, 0.0, 5.0])), 1);
        assert_eq!(day_gain_pct(&bars(&[0.0])[0], &bars(&[1.0])[0]), None);
    }

    #[test]
    fn test_current_run_scans_from_latest() {
        let closes = [10.0, 11.0, 11.05, 12.2, 13.42];
        assert_eq!(streak_with(&bars(&closes), ScanMode::FirstRun), 1);
        assert_eq!(streak_with(&bars(&closes), ScanMode::CurrentRun), 2);
        assert_eq!(streak_with(&bars(&[10.0, 11.0, 11.05]), ScanMode::CurrentRun), 0);
    }

    #[test]
    fn test_custom_threshold() {
        let data = bars(&[10.0, 10.5, 11.03]);
        assert_eq!(count_streak(&data, ScanMode::FirstRun, 4.9), 2);
        assert_eq!(count_streak(&data, ScanMode::FirstRun, LIMIT_UP_PCT), 0);
    }
}
