//! 报表模型
//!
//! 报表生成是一个在读取时推进的状态机：PROCESSING 在超过完成时延后变为 COMPLETED。

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 报表预计耗时（秒），仅用于展示
pub const ESTIMATED_SECS: u32 = 30;

/// 下载链接有效期（天）
const DOWNLOAD_TTL_DAYS: i64 = 7;

/// 报表状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Processing,
    Completed,
}

/// 报表任务
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub report_id: String,
    pub kind: String,
    pub format: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub estimated_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub filters: Option<serde_json::Value>,
    pub completed_at: Option<DateTime<Utc>>,
    pub download_url: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Report {
    pub fn new(
        report_id: String,
        kind: String,
        format: String,
        range: (NaiveDate, NaiveDate),
        filters: Option<serde_json::Value>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            report_id,
            kind,
            format,
            status: ReportStatus::Processing,
            created_at: now,
            estimated_time: ESTIMATED_SECS,
            start_date: range.0,
            end_date: range.1,
            filters,
            completed_at: None,
            download_url: None,
            expires_at: None,
        }
    }

    /// 推进状态机
    ///
    /// 已过完成时延的 PROCESSING 报表变为 COMPLETED 并生成下载信息。
    /// 发生状态变化时返回 true。
    pub fn poll(&mut self, now: DateTime<Utc>, delay: Duration, download_base: &str) -> bool {
        if self.status != ReportStatus::Processing || now - self.created_at < delay {
            return false;
        }

        self.status = ReportStatus::Completed;
        self.completed_at = Some(now);
        self.download_url = Some(format!(
            "{}/reports/{}/download",
            download_base.trim_end_matches('/'),
            self.report_id
        ));
        self.expires_at = Some(now + Duration::days(DOWNLOAD_TTL_DAYS));
        true
    }

    pub fn is_completed(&self) -> bool {
        self.status == ReportStatus::Completed
    }
}

/// 报表编号
pub fn report_id(seq: u64) -> String {
    format!("rep_{seq}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(now: DateTime<Utc>) -> Report {
        Report::new(
            report_id(1001),
            "sales".to_string(),
            "pdf".to_string(),
            (
                NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
            ),
            None,
            now,
        )
    }

    #[test]
    fn test_stays_processing_before_delay() {
        let created = Utc.with_ymd_and_hms(2026, 2, 20, 12, 0, 0).unwrap();
        let mut report = sample(created);

        let changed = report.poll(created + Duration::seconds(44), Duration::seconds(45), "https://x");

        assert!(!changed);
        assert_eq!(report.status, ReportStatus::Processing);
        assert!(report.download_url.is_none());
    }

    #[test]
    fn test_completes_after_delay() {
        let created = Utc.with_ymd_and_hms(2026, 2, 20, 12, 0, 0).unwrap();
        let mut report = sample(created);
        let later = created + Duration::seconds(45);

        assert!(report.poll(later, Duration::seconds(45), "https://api.paymore.com/v1/"));

        assert!(report.is_completed());
        assert_eq!(
            report.download_url.as_deref(),
            Some("https://api.paymore.com/v1/reports/rep_1001/download")
        );
        assert_eq!(report.completed_at, Some(later));
        assert_eq!(report.expires_at, Some(later + Duration::days(7)));

        // 已完成的报表不再变化
        assert!(!report.poll(later + Duration::hours(1), Duration::seconds(45), "https://x"));
        assert_eq!(report.completed_at, Some(later));
    }
}
