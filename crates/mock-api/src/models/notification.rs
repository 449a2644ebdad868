//! 通知模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::time::millis;
use crate::store::Record;

/// 通知
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NotificationMetadata>,
}

impl Record for Notification {
    fn id(&self) -> &str {
        &self.id
    }
}

/// 通知关联的终端、交易与金额
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Transaction,
    TerminalStatus,
    System,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 3] = [Self::Transaction, Self::TerminalStatus, Self::System];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Transaction => "Yüksek Tutarlı İşlem",
            Self::TerminalStatus => "Terminal Bağlantı Sorunu",
            Self::System => "Sistem Bildirimi",
        }
    }

    /// 通知正文，交易与终端类通知带上终端名称
    pub fn message(&self, terminal_name: &str) -> String {
        match self {
            Self::Transaction => format!("{terminal_name}'de yüksek tutarlı işlem"),
            Self::TerminalStatus => format!("{terminal_name} bağlantısı kesildi"),
            Self::System => "Planlı bakım bildirimi".to_string(),
        }
    }
}

/// 优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::Low, Self::Medium, Self::High];
}
