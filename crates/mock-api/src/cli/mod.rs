//! CLI 模块
//!
//! 提供命令行接口，支持以下功能：
//!
//! - `server` - 启动 Mock HTTP 服务（未指定子命令时的默认行为）
//! - `populate` - 生成数据集并输出为 JSON 或 YAML
//!
//! # 使用示例
//!
//! ```bash
//! # 启动服务器
//! paymore-mock server --port 3001
//!
//! # 导出数据集
//! paymore-mock populate -o dataset.yaml --format yaml
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::CommandRunner;
