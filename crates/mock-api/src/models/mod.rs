//! 数据模型
//!
//! 终端、交易、通知、团队成员、商户资料与报表。
//! 所有模型使用 camelCase 序列化，时间戳统一输出毫秒精度的 UTC 时间。

pub mod merchant;
pub mod notification;
pub mod report;
pub mod team;
pub mod terminal;
pub mod time;
pub mod transaction;

pub use merchant::{MerchantProfile, MerchantProfilePatch};
pub use notification::{Notification, NotificationKind, NotificationMetadata, Priority};
pub use report::{Report, ReportStatus};
pub use team::{MemberStatus, TeamMember, TeamRole};
pub use terminal::{Terminal, TerminalStatus};
pub use transaction::{CardType, PaymentMethod, Transaction, TransactionStatus, TransactionType};

/// 未知枚举值解析错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// 金额保留两位小数（四舍五入，.5 向正无穷方向进位）
pub fn round2(x: f64) -> f64 {
    (x * 100.0 + 0.5).floor() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(2164.4249), 2164.42);
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(0.125), 0.13);
        // 负数的 .5 向正无穷方向进位
        assert_eq!(round2(-12.345), -12.34);
        assert_eq!(round2(0.0), 0.0);
    }
}
