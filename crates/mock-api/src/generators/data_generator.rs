//! 数据生成器
//!
//! 按固定顺序消耗随机数：终端、交易、通知、团队成员。
//! 顺序本身是约定的一部分，同一种子和时钟总是得到同一份数据集。

use chrono::{DateTime, Duration, TimeZone, Utc};
use paymore_shared::config::DatasetConfig;
use serde::Serialize;

use super::reference::{CURRENCIES, FIRMWARE_VERSIONS, LOCATIONS, MODELS};
use crate::models::notification::{NotificationKind, NotificationMetadata, Priority};
use crate::models::team::{self, MemberStatus, TeamRole};
use crate::models::terminal::{self, TerminalStatus};
use crate::models::transaction::{CardType, PaymentMethod, TransactionStatus, TransactionType};
use crate::models::{MerchantProfile, Notification, TeamMember, Terminal, Transaction, round2};
use crate::rng::Mulberry32;

/// 交易编号起点，首笔交易为 txn_100001
const FIRST_TRANSACTION_SEQ: usize = 100_001;
/// 通知与团队成员编号从 2 开始
const FIRST_NOTIFICATION_SEQ: usize = 2;
const FIRST_MEMBER_SEQ: usize = 2;

/// 数量取值范围 (默认值, 最小值, 最大值)
const TERMINAL_BOUNDS: (usize, usize, usize) = (1000, 1, 20_000);
const TRANSACTION_BOUNDS: (usize, usize, usize) = (10_000, 100, 200_000);
const NOTIFICATION_BOUNDS: (usize, usize, usize) = (2000, 10, 50_000);
const TEAM_BOUNDS: (usize, usize, usize) = (50, 1, 5000);

/// 数据生成器配置
///
/// 所有数量都已约束在合法范围内
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub seed: u32,
    pub terminal_count: usize,
    pub transaction_count: usize,
    pub notification_count: usize,
    pub team_count: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::from(&DatasetConfig::default())
    }
}

impl From<&DatasetConfig> for GeneratorConfig {
    /// 0 视为未配置并使用默认值，其余值夹到范围内；种子只保留低 32 位
    fn from(config: &DatasetConfig) -> Self {
        Self {
            seed: config.seed as u32,
            terminal_count: resolve_count(config.terminals, TERMINAL_BOUNDS),
            transaction_count: resolve_count(config.transactions, TRANSACTION_BOUNDS),
            notification_count: resolve_count(config.notifications, NOTIFICATION_BOUNDS),
            team_count: resolve_count(config.team, TEAM_BOUNDS),
        }
    }
}

fn resolve_count(raw: i64, (default, min, max): (usize, usize, usize)) -> usize {
    if raw == 0 {
        return default;
    }
    raw.clamp(min as i64, max as i64) as usize
}

/// 完整的演示数据集
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub merchant: MerchantProfile,
    pub terminals: Vec<Terminal>,
    pub transactions: Vec<Transaction>,
    pub notifications: Vec<Notification>,
    pub team: Vec<TeamMember>,
}

/// 数据集生成器
///
/// 生成完成后随机数流交给应用状态继续使用
pub struct DataGenerator {
    config: GeneratorConfig,
    rng: Mulberry32,
    now: DateTime<Utc>,
}

impl DataGenerator {
    /// 创建数据生成器，`now` 是所有相对时间的基准
    pub fn new(config: GeneratorConfig, now: DateTime<Utc>) -> Self {
        let rng = Mulberry32::new(config.seed);
        Self { config, rng, now }
    }

    /// 按固定顺序生成全部集合
    pub fn generate(&mut self) -> Dataset {
        let terminals = self.generate_terminals();
        let transactions = self.generate_transactions(&terminals);
        let notifications = self.generate_notifications(&terminals, &transactions);
        let team = self.generate_team();

        Dataset {
            merchant: MerchantProfile::demo(),
            terminals,
            transactions,
            notifications,
            team,
        }
    }

    /// 交出随机数流
    pub fn into_rng(self) -> Mulberry32 {
        self.rng
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn days_ago(&self, days: u32) -> DateTime<Utc> {
        self.now - Duration::days(i64::from(days))
    }

    fn generate_terminals(&mut self) -> Vec<Terminal> {
        let activation_epoch = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default();

        (1..=self.config.terminal_count)
            .map(|idx| {
                let status = TerminalStatus::for_index(idx);
                let model = *self.rng.pick(&MODELS);

                let daily_transactions = match status {
                    TerminalStatus::Active => self.rng.below(250),
                    TerminalStatus::Inactive => self.rng.below(10),
                    TerminalStatus::Maintenance => 0,
                };
                let daily_sales = if status.is_online() {
                    round2(f64::from(daily_transactions) * self.rng.scaled(30.0, 300.0))
                } else {
                    0.0
                };

                let location = *self.rng.pick(&LOCATIONS);
                let last_transaction = if status.is_online() {
                    let days = self.rng.below(2);
                    self.days_ago(days)
                } else {
                    let days = 2 + self.rng.below(14);
                    self.days_ago(days)
                };

                let (battery, signal_strength) = if status.is_online() {
                    let battery = self.rng.below(101).clamp(10, 100);
                    let signal = self.rng.below(101).clamp(10, 100);
                    (battery, signal)
                } else {
                    (0, 0)
                };
                let firmware_version = *self.rng.pick(&FIRMWARE_VERSIONS);

                Terminal {
                    id: terminal::terminal_id(idx),
                    name: format!("Terminal {idx:04}"),
                    serial_number: format!("PAY-2024-T{idx:04}"),
                    model: model.to_string(),
                    status,
                    location: location.to_string(),
                    last_transaction,
                    daily_transactions,
                    daily_sales,
                    battery,
                    signal_strength,
                    firmware_version: firmware_version.to_string(),
                    activation_date: activation_epoch + Duration::days((idx % 250) as i64),
                }
            })
            .collect()
    }

    fn generate_transactions(&mut self, terminals: &[Terminal]) -> Vec<Transaction> {
        (0..self.config.transaction_count)
            .map(|i| {
                let terminal = self.rng.pick(terminals);
                let amount = round2(self.rng.scaled(5.0, 8000.0));
                let kind = if self.rng.chance(0.86) {
                    TransactionType::Sale
                } else {
                    TransactionType::Refund
                };
                let status = if self.rng.chance(0.93) {
                    TransactionStatus::Success
                } else {
                    TransactionStatus::Failed
                };
                let days_ago = self.rng.below(60);
                let hours_ago = self.rng.below(24);
                let timestamp = self.days_ago(days_ago) - Duration::hours(i64::from(hours_ago));
                let masked_card_number = format!("****{}", 1000 + self.rng.below(9000));

                Transaction {
                    id: format!("txn_{}", FIRST_TRANSACTION_SEQ + i),
                    terminal_id: terminal.id.clone(),
                    terminal_name: terminal.name.clone(),
                    amount,
                    currency: self.rng.pick(&CURRENCIES).to_string(),
                    kind,
                    status,
                    timestamp,
                    card_type: *self.rng.pick(&CardType::ALL),
                    masked_card_number,
                    payment_method: *self.rng.pick(&PaymentMethod::ALL),
                }
            })
            .collect()
    }

    fn generate_notifications(
        &mut self,
        terminals: &[Terminal],
        transactions: &[Transaction],
    ) -> Vec<Notification> {
        (0..self.config.notification_count)
            .map(|i| {
                let terminal = self.rng.pick(terminals);
                let transaction = self.rng.pick(transactions);
                let kind = *self.rng.pick(&NotificationKind::ALL);
                let is_read = self.rng.chance(0.6);
                let days = self.rng.below(30);
                let created_at = self.days_ago(days);
                let priority = *self.rng.pick(&Priority::ALL);

                let metadata = match kind {
                    NotificationKind::Transaction => Some(NotificationMetadata {
                        terminal_id: Some(terminal.id.clone()),
                        transaction_id: Some(transaction.id.clone()),
                        amount: Some(round2(self.rng.scaled(5000.0, 5000.0))),
                    }),
                    NotificationKind::TerminalStatus => Some(NotificationMetadata {
                        terminal_id: Some(terminal.id.clone()),
                        transaction_id: None,
                        amount: None,
                    }),
                    NotificationKind::System => None,
                };

                Notification {
                    id: format!("notif_{:05}", FIRST_NOTIFICATION_SEQ + i),
                    kind,
                    title: kind.title().to_string(),
                    message: kind.message(&terminal.name),
                    is_read,
                    created_at,
                    priority,
                    metadata,
                }
            })
            .collect()
    }

    fn generate_team(&mut self) -> Vec<TeamMember> {
        (0..self.config.team_count)
            .map(|i| {
                let seq = FIRST_MEMBER_SEQ + i;
                let role = *self.rng.pick(&TeamRole::ALL);
                let status = if self.rng.chance(0.85) {
                    MemberStatus::Active
                } else {
                    MemberStatus::Inactive
                };
                let created_days = 30 + self.rng.below(365);
                let login_days = self.rng.below(30);

                TeamMember {
                    id: team::member_id(seq as u64),
                    name: format!("Kullanıcı {seq:03}"),
                    email: format!("user{seq}@paymoredemo.com"),
                    role,
                    status,
                    created_at: self.days_ago(created_days),
                    last_login: Some(self.days_ago(login_days)),
                }
            })
            .collect()
    }
}

/// 统计数据生成结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    pub terminals_count: usize,
    pub transactions_count: usize,
    pub notifications_count: usize,
    pub team_count: usize,
}

impl GenerationStats {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            terminals_count: dataset.terminals.len(),
            transactions_count: dataset.transactions.len(),
            notifications_count: dataset.notifications.len(),
            team_count: dataset.team.len(),
        }
    }
}
