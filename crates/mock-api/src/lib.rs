//! Paymore Mock API
//!
//! 商户后台前端使用的模拟后端：启动时按种子生成确定性的演示数据集，
//! 通过 REST 接口提供仪表盘统计、终端管理、团队、通知与报表功能。
//!
//! # 主要模块
//!
//! - `rng`: Mulberry32 确定性随机数生成器
//! - `generators`: 演示数据集生成
//! - `stats`: 日期窗口、汇总、分桶与分页
//! - `store`: 内存存储
//! - `handlers` / `routes`: HTTP 接口
//!
//! # 使用示例
//!
//! ```rust
//! use chrono::Utc;
//! use paymore_mock::generators::{DataGenerator, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     seed: 42,
//!     terminal_count: 10,
//!     transaction_count: 100,
//!     notification_count: 10,
//!     team_count: 2,
//! };
//! let dataset = DataGenerator::new(config, Utc::now()).generate();
//! assert_eq!(dataset.terminals.len(), 10);
//! ```

pub mod cli;
pub mod dto;
pub mod error;
pub mod generators;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod rng;
pub mod routes;
pub mod state;
pub mod stats;
pub mod store;

pub use routes::create_app;
pub use state::AppState;
