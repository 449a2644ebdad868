//! 终端模型
//!
//! POS 终端及其运行状态。状态决定了生成数据时的遥测取值（交易量、电量、信号）。

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UnknownVariant;
use super::time::millis;
use crate::store::Record;

/// 终端
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Terminal {
    pub id: String,
    pub name: String,
    pub serial_number: String,
    pub model: String,
    pub status: TerminalStatus,
    pub location: String,
    #[serde(with = "millis")]
    pub last_transaction: DateTime<Utc>,
    pub daily_transactions: u32,
    pub daily_sales: f64,
    pub battery: u32,
    pub signal_strength: u32,
    pub firmware_version: String,
    #[serde(with = "millis")]
    pub activation_date: DateTime<Utc>,
}

/// 终端状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminalStatus {
    Active,
    Inactive,
    Maintenance,
}

impl TerminalStatus {
    pub const ALL: [TerminalStatus; 3] = [Self::Active, Self::Inactive, Self::Maintenance];

    /// 按序号分配状态：每 19 台一台维护中，每 11 台一台停用，其余在线
    pub fn for_index(idx: usize) -> Self {
        if idx % 19 == 0 {
            Self::Maintenance
        } else if idx % 11 == 0 {
            Self::Inactive
        } else {
            Self::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Maintenance => "MAINTENANCE",
        }
    }

    /// 只有在线终端可以接收远程指令
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 大小写不敏感
impl FromStr for TerminalStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("terminal status", s))
    }
}

impl Terminal {
    /// 名称、编号或序列号包含关键字（调用方负责转为小写）
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.id.to_lowercase().contains(needle)
            || self.serial_number.to_lowercase().contains(needle)
    }
}

impl Record for Terminal {
    fn id(&self) -> &str {
        &self.id
    }
}

/// 终端编号，4 位补零
pub fn terminal_id(idx: usize) -> String {
    format!("term_{idx:04}")
}
