//! Paymore Mock API 入口
//!
//! 加载配置、初始化可观测性，然后执行 CLI 子命令（默认启动服务）。

use clap::Parser;
use paymore_mock::cli::{Cli, CommandRunner, Commands};
use paymore_shared::{config::AppConfig, observability};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在时忽略
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = AppConfig::load("paymore-mock").unwrap_or_else(|e| {
        eprintln!("配置加载失败，使用默认配置: {e}");
        AppConfig::default()
    });

    // CLI 参数优先级最高
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    if cli.json_logs {
        config.observability.json_logs = true;
    }
    if let Some(Commands::Server { port: Some(port) }) = cli.command {
        config.server.port = port;
    }

    let obs_config = config
        .observability
        .clone()
        .with_service_name(&config.service_name);
    let _guard = observability::init(&obs_config).await?;

    info!(
        environment = %config.environment,
        seed = config.dataset.seed,
        "Paymore Mock API 启动"
    );

    let runner = CommandRunner::new(config);

    match cli.command {
        None | Some(Commands::Server { .. }) => runner.run_server().await?,
        Some(Commands::Populate { output, format }) => {
            runner.run_populate(output.as_deref(), format)?
        }
    }

    Ok(())
}
