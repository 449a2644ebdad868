//! 报表存储
//!
//! 报表按编号随机访问，使用 DashMap 保存；编号由原子计数器分配。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use dashmap::DashMap;
use tracing::info;

use crate::models::report::{self, Report};

/// 首个报表编号为 rep_1001
const FIRST_REPORT_SEQ: u64 = 1001;

/// 报表存储
#[derive(Debug, Clone)]
pub struct ReportStore {
    reports: Arc<DashMap<String, Report>>,
    next_seq: Arc<AtomicU64>,
    completion_delay: Duration,
    download_base: Arc<str>,
}

impl ReportStore {
    pub fn new(completion_delay: Duration, download_base: &str) -> Self {
        Self {
            reports: Arc::new(DashMap::new()),
            next_seq: Arc::new(AtomicU64::new(FIRST_REPORT_SEQ)),
            completion_delay,
            download_base: Arc::from(download_base),
        }
    }

    /// 创建 PROCESSING 状态的报表
    pub fn create(
        &self,
        kind: String,
        format: String,
        range: (NaiveDate, NaiveDate),
        filters: Option<serde_json::Value>,
        now: DateTime<Utc>,
    ) -> Report {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let report = Report::new(report::report_id(seq), kind, format, range, filters, now);
        self.reports.insert(report.report_id.clone(), report.clone());
        report
    }

    /// 读取报表，并在读取时推进状态机
    pub fn get(&self, id: &str, now: DateTime<Utc>) -> Option<Report> {
        let mut entry = self.reports.get_mut(id)?;
        if entry.poll(now, self.completion_delay, &self.download_base) {
            info!(report_id = %id, "报表已生成");
            paymore_shared::observability::metrics::record_report_transition(
                "PROCESSING",
                "COMPLETED",
            );
        }
        Some(entry.clone())
    }
}
