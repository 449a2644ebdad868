//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。
//! 同时兼容旧版 mock 服务使用的无前缀环境变量（PORT、SEED、TERMINALS_COUNT 等）。

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::observability::ObservabilityConfig;

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

/// 数据集配置
///
/// 数值保持原始输入，取值范围的约束由数据生成器负责
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// 随机数种子
    pub seed: i64,
    pub terminals: i64,
    pub transactions: i64,
    pub notifications: i64,
    pub team: i64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: 20260225,
            terminals: 1000,
            transactions: 10000,
            notifications: 2000,
            team: 50,
        }
    }
}

/// 报表配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 报表从 PROCESSING 变为 COMPLETED 所需的秒数
    pub completion_secs: u64,
    /// 下载地址前缀
    pub download_base_url: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            completion_secs: 45,
            download_base_url: "https://api.paymore.com/v1".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub reports: ReportConfig,
    pub observability: ObservabilityConfig,
}

/// 旧版无前缀环境变量到配置键的映射
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("SEED", "dataset.seed"),
    ("TERMINALS_COUNT", "dataset.terminals"),
    ("TRANSACTIONS_COUNT", "dataset.transactions"),
    ("NOTIFICATIONS_COUNT", "dataset.notifications"),
    ("TEAM_COUNT", "dataset.team"),
];

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. 环境变量（PAYMORE__ 前缀，如 PAYMORE__SERVER__PORT -> server.port）
    /// 4. 旧版无前缀环境变量（PORT、SEED、TERMINALS_COUNT 等）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("PAYMORE_ENV").unwrap_or_else(|_| "development".to_string());

        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(Path::new(&config_dir).join("default.toml")).required(false))
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", env))).required(false),
            )
            .add_source(
                Environment::with_prefix("PAYMORE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let builder = apply_legacy_env(builder, |key| std::env::var(key).ok())?;

        builder.build()?.try_deserialize()
    }

    /// 获取服务地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// 应用旧版环境变量覆盖
///
/// 数值按 `parseInt` 的宽松规则解析，无法解析的值直接忽略
fn apply_legacy_env<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (var, key) in LEGACY_ENV_KEYS {
        if let Some(value) = lookup(var).as_deref().and_then(parse_leading_int) {
            builder = builder.set_override(*key, value)?;
        }
    }
    Ok(builder)
}

/// 解析字符串开头的整数（允许前导空白和正负号），如 "12abc" -> 12
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn build_with(vars: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let builder = Config::builder()
            .set_default("service_name", "paymore-mock")
            .unwrap();
        apply_legacy_env(builder, |key| env.get(key).cloned())
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.dataset.seed, 20260225);
        assert_eq!(config.dataset.transactions, 10000);
        assert_eq!(config.reports.completion_secs, 45);
    }

    #[test]
    fn test_server_addr() {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            ..Default::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_legacy_env_overrides() {
        let config = build_with(&[
            ("PORT", "8081"),
            ("SEED", "42"),
            ("TERMINALS_COUNT", "25"),
            ("TEAM_COUNT", "7"),
        ]);

        assert_eq!(config.service_name, "paymore-mock");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.dataset.seed, 42);
        assert_eq!(config.dataset.terminals, 25);
        assert_eq!(config.dataset.team, 7);
        // 未设置的变量保持默认值
        assert_eq!(config.dataset.transactions, 10000);
    }

    #[test]
    fn test_legacy_env_ignores_garbage() {
        let config = build_with(&[("SEED", "not-a-number"), ("TRANSACTIONS_COUNT", "500rows")]);

        assert_eq!(config.dataset.seed, 20260225);
        assert_eq!(config.dataset.transactions, 500);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("123"), Some(123));
        assert_eq!(parse_leading_int("  -7"), Some(-7));
        assert_eq!(parse_leading_int("+15x"), Some(15));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
    }
}
