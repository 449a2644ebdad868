//! 日期解析与时间窗口

use std::sync::LazyLock;

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;

static YMD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"));

/// 严格解析 `YYYY-MM-DD`，必须是真实存在的日历日期
pub fn parse_ymd(raw: &str) -> Option<NaiveDate> {
    if !YMD_PATTERN.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("end date {end} is before start date {start}")]
    Inverted { start: NaiveDate, end: NaiveDate },
}

/// 闭区间时间窗口 `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// 单日窗口 `[d 00:00:00, d 23:59:59]`
    pub fn day(date: NaiveDate) -> Self {
        Self::new(start_of_day(date), end_of_day(date))
    }

    /// 整日窗口 `[first 00:00:00, last 23:59:59]`
    pub fn days(first: NaiveDate, last: NaiveDate) -> Result<Self, RangeError> {
        if last < first {
            return Err(RangeError::Inverted {
                start: first,
                end: last,
            });
        }
        Ok(Self::new(start_of_day(first), end_of_day(last)))
    }

    /// 以 `last` 结尾的连续 n 天
    pub fn trailing_days(last: NaiveDate, n: u64) -> Self {
        let first = last
            .checked_sub_days(Days::new(n.saturating_sub(1)))
            .unwrap_or(NaiveDate::MIN);
        Self::new(start_of_day(first), end_of_day(last))
    }

    /// 以 `last 23:59:59` 为终点、跨度 n-1 天的窗口
    ///
    /// 起点与终点是同一时刻，`n == 1` 时窗口只覆盖 23:59:59 这一秒
    pub fn ending_on(last: NaiveDate, n: u64) -> Self {
        let end = end_of_day(last);
        Self::new(end - span_of(n), end)
    }

    /// 在本窗口起点前 1 毫秒结束、跨度相同的上一个窗口
    pub fn previous(&self) -> Self {
        let end = self.start - Duration::milliseconds(1);
        Self::new(end - (self.end - self.start), end)
    }

    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        *ts >= self.start && *ts <= self.end
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// n 天窗口的首尾间隔
fn span_of(n: u64) -> Duration {
    i64::try_from(n.saturating_sub(1))
        .ok()
        .and_then(Duration::try_days)
        .unwrap_or(Duration::zero())
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&date.and_time(time))
}
