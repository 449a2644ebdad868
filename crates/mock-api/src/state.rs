//! 应用状态定义
//!
//! 包含 Axum 路由共享的数据集、存储与随机数流

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use paymore_shared::config::{AppConfig, ReportConfig};
use paymore_shared::observability::metrics;
use parking_lot::{Mutex, RwLock};

use crate::generators::{DataGenerator, Dataset, GenerationStats, GeneratorConfig};
use crate::models::team;
use crate::models::{MerchantProfile, Notification, TeamMember, Terminal, Transaction};
use crate::rng::Mulberry32;
use crate::store::{MemoryStore, ReportStore};

/// 新增成员编号的基数
const MEMBER_SEQ_BASE: u64 = 100_000;

/// Axum 应用共享状态
///
/// 所有字段通过 Arc 共享，克隆代价很低
#[derive(Clone)]
pub struct AppState {
    pub terminals: MemoryStore<Terminal>,
    /// 交易生成后不再变化
    pub transactions: Arc<[Transaction]>,
    pub notifications: MemoryStore<Notification>,
    pub team: MemoryStore<TeamMember>,
    pub merchant: Arc<RwLock<MerchantProfile>>,
    pub reports: ReportStore,
    rng: Arc<Mutex<Mulberry32>>,
    next_member_seq: Arc<AtomicU64>,
}

impl AppState {
    /// 使用生成好的数据集和随机数流创建状态
    pub fn new(dataset: Dataset, rng: Mulberry32, reports: &ReportConfig) -> Self {
        let Dataset {
            merchant,
            terminals,
            transactions,
            notifications,
            team,
        } = dataset;

        let next_member_seq = MEMBER_SEQ_BASE + team.len() as u64 + 1;
        let completion_delay = i64::try_from(reports.completion_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);

        Self {
            terminals: MemoryStore::from_vec(terminals),
            transactions: Arc::from(transactions),
            notifications: MemoryStore::from_vec(notifications),
            team: MemoryStore::from_vec(team),
            merchant: Arc::new(RwLock::new(merchant)),
            reports: ReportStore::new(completion_delay, &reports.download_base_url),
            rng: Arc::new(Mutex::new(rng)),
            next_member_seq: Arc::new(AtomicU64::new(next_member_seq)),
        }
    }

    /// 按配置生成数据集并创建状态
    pub fn from_config(config: &AppConfig, now: DateTime<Utc>) -> Self {
        let mut generator = DataGenerator::new(GeneratorConfig::from(&config.dataset), now);
        let dataset = generator.generate();

        let stats = GenerationStats::from_dataset(&dataset);
        tracing::info!(
            seed = generator.config().seed,
            terminals = stats.terminals_count,
            transactions = stats.transactions_count,
            notifications = stats.notifications_count,
            team = stats.team_count,
            "数据集生成完成"
        );
        metrics::set_dataset_records("terminals", stats.terminals_count);
        metrics::set_dataset_records("transactions", stats.transactions_count);
        metrics::set_dataset_records("notifications", stats.notifications_count);
        metrics::set_dataset_records("team", stats.team_count);

        Self::new(dataset, generator.into_rng(), &config.reports)
    }

    /// 在锁内使用随机数流
    pub fn with_rng<R>(&self, f: impl FnOnce(&mut Mulberry32) -> R) -> R {
        f(&mut self.rng.lock())
    }

    /// 分配新成员编号
    ///
    /// 编号单调递增，删除成员不会导致编号重复
    pub fn next_member_id(&self) -> String {
        team::member_id(self.next_member_seq.fetch_add(1, Ordering::Relaxed))
    }

    /// 当前在线终端数量与总数
    pub fn terminal_counts(&self) -> (usize, usize) {
        self.terminals.read(|terminals| {
            let active = terminals.iter().filter(|t| t.status.is_online()).count();
            (active, terminals.len())
        })
    }
}
