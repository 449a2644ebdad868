//! 响应 DTO 定义
//!
//! 所有接口（健康检查除外）使用统一的 `{ success, data?, message? }` 包装

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::time::{millis, millis_option};
use crate::models::{MerchantProfile, Report, ReportStatus, TeamMember, Terminal, TerminalStatus};
use crate::models::{Notification, Transaction, TransactionStatus, TransactionType};
use crate::stats::{Bucket, HourlyBucket, PaymentMethodShare};

pub use crate::stats::Pagination;

/// API 统一响应
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// 创建带提示信息的成功响应
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    /// 只有提示信息的成功响应
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

// ==================== 认证 ====================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: &'static str,
    pub name: &'static str,
    pub email: String,
    pub merchant_id: &'static str,
    pub role: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginData {
    pub user: LoginUser,
    pub tokens: Tokens,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshData {
    pub tokens: Tokens,
}

// ==================== 仪表盘 ====================

/// 指标卡片
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCard<V> {
    pub value: V,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<&'static str>,
    pub change: f64,
    pub is_positive: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTerminalsCard {
    pub value: usize,
    pub total: usize,
    pub change: f64,
    pub is_positive: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub daily_sales: MetricCard<f64>,
    pub transaction_count: MetricCard<usize>,
    pub average_transaction: MetricCard<f64>,
    pub active_terminals: ActiveTerminalsCard,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentTransactions {
    pub transactions: Vec<Transaction>,
    pub pagination: Pagination,
}

// ==================== 统计 ====================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsPeriod {
    pub start_date: String,
    pub end_date: String,
    pub group_by: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_sales: f64,
    pub total_transactions: usize,
    pub average_transaction: f64,
    pub currency: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    pub period: StatsPeriod,
    pub summary: StatsSummary,
    pub chart_data: Vec<Bucket>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodStats {
    pub payment_methods: Vec<PaymentMethodShare>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyStats {
    pub date: String,
    pub hourly_data: Vec<HourlyBucket>,
    pub peak_hour: HourlyBucket,
}

// ==================== 终端 ====================

#[derive(Debug, Clone, Default, Serialize)]
pub struct TerminalSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub maintenance: usize,
}

impl TerminalSummary {
    pub fn from_terminals(terminals: &[Terminal]) -> Self {
        terminals.iter().fold(
            Self {
                total: terminals.len(),
                ..Default::default()
            },
            |mut summary, t| {
                match t.status {
                    TerminalStatus::Active => summary.active += 1,
                    TerminalStatus::Inactive => summary.inactive += 1,
                    TerminalStatus::Maintenance => summary.maintenance += 1,
                }
                summary
            },
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TerminalList {
    pub terminals: Vec<Terminal>,
    pub pagination: Pagination,
    pub summary: TerminalSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hardware {
    pub manufacturer: &'static str,
    pub model: String,
    pub serial_number: String,
    pub imei: String,
}

/// 网络信息，离线终端的连接类型为 NONE
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub connection_type: &'static str,
    pub ip_address: Option<String>,
    pub provider: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBrief {
    pub id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub status: TransactionStatus,
    #[serde(with = "millis")]
    pub timestamp: DateTime<Utc>,
}

impl From<&Transaction> for TransactionBrief {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.clone(),
            amount: tx.amount,
            kind: tx.kind,
            status: tx.status,
            timestamp: tx.timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodStat {
    pub transactions: usize,
    pub sales: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TerminalStatistics {
    pub today: PeriodStat,
    pub week: PeriodStat,
    pub month: PeriodStat,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalDetail {
    #[serde(flatten)]
    pub terminal: Terminal,
    pub hardware: Hardware,
    pub network: Network,
    pub recent_transactions: Vec<TransactionBrief>,
    pub statistics: TerminalStatistics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTerminal {
    pub id: String,
    pub name: String,
    pub serial_number: String,
    pub model: String,
    pub status: TerminalStatus,
    pub location: String,
    #[serde(with = "millis")]
    pub activation_date: DateTime<Utc>,
    pub activation_code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedTerminal {
    pub id: String,
    pub name: String,
    pub location: String,
    pub status: TerminalStatus,
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartCommand {
    pub command_id: String,
    pub status: &'static str,
    #[serde(with = "millis")]
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmwareUpdate {
    pub current_version: String,
    pub target_version: String,
    pub update_id: String,
    pub estimated_time: u32,
}

// ==================== 商户与团队 ====================

/// 商户资料，终端数量在读取时统计
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantProfileView {
    #[serde(flatten)]
    pub profile: MerchantProfile,
    pub active_terminals: usize,
    pub total_terminals: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamList {
    pub team_members: Vec<TeamMember>,
}

// ==================== 通知 ====================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    pub pagination: Pagination,
}

// ==================== 报表 ====================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAccepted {
    pub report_id: String,
    pub status: ReportStatus,
    pub estimated_time: u32,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
}

impl From<&Report> for ReportAccepted {
    fn from(report: &Report) -> Self {
        Self {
            report_id: report.report_id.clone(),
            status: report.status,
            estimated_time: report.estimated_time,
            created_at: report.created_at,
        }
    }
}

/// 报表状态，下载信息只在完成后出现
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub report_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub format: String,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(with = "millis_option", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "millis_option", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Report> for ReportView {
    fn from(report: &Report) -> Self {
        let completed = report.is_completed();
        Self {
            report_id: report.report_id.clone(),
            kind: report.kind.clone(),
            format: report.format.clone(),
            status: report.status,
            download_url: report.download_url.clone().filter(|_| completed),
            expires_at: report.expires_at.filter(|_| completed),
            created_at: report.created_at,
            completed_at: report.completed_at.filter(|_| completed),
        }
    }
}

// ==================== 健康检查 ====================

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_message_only_response() {
        let value = serde_json::to_value(ApiResponse::message("Çıkış yapıldı")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "success": true, "message": "Çıkış yapıldı" })
        );
    }

    #[test]
    fn test_metric_card_omits_currency_for_counts() {
        let card = MetricCard {
            value: 12usize,
            currency: None,
            change: 100.0,
            is_positive: true,
        };
        let value = serde_json::to_value(card).unwrap();
        assert!(value.get("currency").is_none());
        assert_eq!(value["value"], 12);
        assert_eq!(value["isPositive"], true);
    }

    #[test]
    fn test_report_view_hides_download_until_completed() {
        let created = Utc.with_ymd_and_hms(2026, 2, 20, 12, 0, 0).unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();
        let mut report = Report::new(
            "rep_1001".to_string(),
            "sales".to_string(),
            "pdf".to_string(),
            (day, day),
            None,
            created,
        );

        let value = serde_json::to_value(ReportView::from(&report)).unwrap();
        assert_eq!(value["status"], "PROCESSING");
        assert_eq!(value["type"], "sales");
        assert!(value.get("downloadUrl").is_none());
        assert!(value.get("completedAt").is_none());

        report.poll(created + chrono::Duration::seconds(60), chrono::Duration::seconds(45), "https://d");
        let value = serde_json::to_value(ReportView::from(&report)).unwrap();
        assert_eq!(value["status"], "COMPLETED");
        assert_eq!(value["downloadUrl"], "https://d/reports/rep_1001/download");
        assert_eq!(value["completedAt"], "2026-02-20T12:01:00.000Z");
    }
}
