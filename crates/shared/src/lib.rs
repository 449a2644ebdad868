//! 共享库
//!
//! 包含 mock 服务共用的配置加载、日志初始化、指标导出以及 HTTP 可观测性中间件。

pub mod config;
pub mod observability;
