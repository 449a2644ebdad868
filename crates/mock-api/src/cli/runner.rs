//! 命令执行器
//!
//! 负责执行各 CLI 子命令的具体逻辑。

use std::fs;
use std::io::Write as _;

use anyhow::{Context, Result};
use chrono::Utc;
use paymore_shared::config::AppConfig;
use tokio::net::TcpListener;
use tracing::info;

use super::OutputFormat;
use crate::generators::{DataGenerator, Dataset, GenerationStats, GeneratorConfig};
use crate::routes;
use crate::state::AppState;

/// 命令执行器
///
/// 持有加载完成的配置，CLI 参数在构造前已经合并进去
pub struct CommandRunner {
    config: AppConfig,
}

impl CommandRunner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// 执行 server 命令
    pub async fn run_server(&self) -> Result<()> {
        let state = AppState::from_config(&self.config, Utc::now());
        let app = routes::create_app(state);

        let addr = self.config.server_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("绑定地址失败: {}", addr))?;

        info!("Paymore Mock API 已启动: http://{}", addr);
        info!(
            completion_secs = self.config.reports.completion_secs,
            "报表完成时延"
        );
        info!("按 Ctrl+C 停止服务");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("服务器运行失败")?;

        info!("Mock 服务已停止");
        Ok(())
    }

    /// 执行 populate 命令
    ///
    /// 生成与服务启动时相同的数据集，输出到文件或标准输出
    pub fn run_populate(&self, output: Option<&str>, format: OutputFormat) -> Result<()> {
        let mut generator =
            DataGenerator::new(GeneratorConfig::from(&self.config.dataset), Utc::now());
        let dataset = generator.generate();
        let stats = GenerationStats::from_dataset(&dataset);

        let content = render(&dataset, format)?;

        match output {
            Some(path) => {
                let mut file = fs::File::create(path)
                    .with_context(|| format!("创建输出文件失败: {}", path))?;
                file.write_all(content.as_bytes())
                    .context("写入文件失败")?;
                info!(path, "数据已输出到文件");
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(content.as_bytes())
                    .context("写入标准输出失败")?;
            }
        }

        info!(
            seed = generator.config().seed,
            terminals = stats.terminals_count,
            transactions = stats.transactions_count,
            notifications = stats.notifications_count,
            team = stats.team_count,
            "数据生成完成"
        );

        Ok(())
    }
}

/// 按格式序列化数据集
fn render(dataset: &Dataset, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(dataset).context("序列化 JSON 失败")
        }
        OutputFormat::Yaml => serde_yaml::to_string(dataset).context("序列化 YAML 失败"),
    }
}

/// 监听关闭信号
///
/// Ctrl+C 或 SIGTERM 任一到达即返回，触发 axum 的优雅关闭流程
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "注册 Ctrl+C 处理器失败");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "注册 SIGTERM 处理器失败");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("收到 Ctrl+C，开始优雅关闭"),
        _ = terminate => info!("收到 SIGTERM，开始优雅关闭"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use paymore_shared::config::DatasetConfig;

    fn small_dataset() -> Dataset {
        let config = DatasetConfig {
            seed: 1,
            terminals: 12,
            transactions: 100,
            notifications: 10,
            team: 2,
        };
        let now = Utc.with_ymd_and_hms(2026, 2, 25, 9, 0, 0).unwrap();
        DataGenerator::new(GeneratorConfig::from(&config), now).generate()
    }

    #[test]
    fn test_render_json() {
        let content = render(&small_dataset(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["terminals"].as_array().unwrap().len(), 12);
        assert_eq!(value["transactions"].as_array().unwrap().len(), 100);
        assert_eq!(value["merchant"]["merchantId"], "PM-2024-MER-001");
    }

    #[test]
    fn test_render_yaml() {
        let content = render(&small_dataset(), OutputFormat::Yaml).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&content).unwrap();
        assert_eq!(value["team"].as_sequence().unwrap().len(), 2);
    }

    #[test]
    fn test_populate_writes_file() {
        let path = std::env::temp_dir().join(format!("paymore-populate-{}.json", std::process::id()));
        let runner = CommandRunner::new(AppConfig {
            dataset: DatasetConfig {
                seed: 3,
                terminals: 10,
                transactions: 100,
                notifications: 10,
                team: 1,
            },
            ..Default::default()
        });

        runner
            .run_populate(path.to_str(), OutputFormat::Json)
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"term_0001\""));
        fs::remove_file(path).unwrap();
    }
}
