//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。

use clap::{Parser, Subcommand, ValueEnum};

/// Paymore Mock API 命令行工具
#[derive(Parser, Debug)]
#[command(name = "paymore-mock")]
#[command(version, about = "Paymore 商户后台模拟服务")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// 输出 JSON 格式日志
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// 子命令枚举
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// 启动 Mock 服务（HTTP REST API）
    Server {
        /// 服务端口，覆盖配置与 PORT 环境变量
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// 生成数据集并输出
    ///
    /// 数据集使用与服务启动时相同的种子和数量配置
    Populate {
        /// 输出文件，缺省时写到标准输出
        #[arg(short, long)]
        output: Option<String>,

        /// 输出格式
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

/// 数据集输出格式
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_server() {
        let cli = Cli::parse_from(["paymore-mock"]);
        assert!(cli.command.is_none());
        assert!(cli.log_level.is_none());
        assert!(!cli.json_logs);
    }

    #[test]
    fn test_cli_parse_server() {
        let cli = Cli::parse_from(["paymore-mock", "server"]);
        assert_eq!(cli.command, Some(Commands::Server { port: None }));

        let cli = Cli::parse_from(["paymore-mock", "server", "--port", "9000"]);
        assert_eq!(cli.command, Some(Commands::Server { port: Some(9000) }));
    }

    #[test]
    fn test_cli_parse_populate() {
        let cli = Cli::parse_from(["paymore-mock", "populate"]);
        assert_eq!(
            cli.command,
            Some(Commands::Populate {
                output: None,
                format: OutputFormat::Json,
            })
        );

        let cli = Cli::parse_from([
            "paymore-mock",
            "populate",
            "-o",
            "data.yaml",
            "--format",
            "yaml",
        ]);
        assert_eq!(
            cli.command,
            Some(Commands::Populate {
                output: Some("data.yaml".to_string()),
                format: OutputFormat::Yaml,
            })
        );
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::parse_from([
            "paymore-mock",
            "server",
            "--log-level",
            "debug",
            "--json-logs",
        ]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.json_logs);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Cli::try_parse_from(["paymore-mock", "populate", "--format", "xml"]);
        assert!(result.is_err());
    }
}
