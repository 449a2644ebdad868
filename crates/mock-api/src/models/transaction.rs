//! 交易模型
//!
//! 交易在数据集生成后不再变化。支付方式只用于统计，不出现在 API 响应中。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::time::millis;
use crate::store::Record;

/// 交易记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub terminal_id: String,
    /// 生成时终端名称的快照
    pub terminal_name: String,
    pub amount: f64,
    pub currency: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub status: TransactionStatus,
    #[serde(with = "millis")]
    pub timestamp: DateTime<Utc>,
    pub card_type: CardType,
    pub masked_card_number: String,
    #[serde(skip)]
    pub payment_method: PaymentMethod,
}

impl Transaction {
    pub fn is_success(&self) -> bool {
        self.status == TransactionStatus::Success
    }
}

impl Record for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

/// 交易类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Sale,
    Refund,
}

/// 交易状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Success,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 卡类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Credit,
    Debit,
}

impl CardType {
    pub const ALL: [CardType; 2] = [Self::Credit, Self::Debit];
}

/// 支付方式
///
/// 顺序即统计结果的输出顺序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    DebitCard,
    Contactless,
    Qr,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        Self::CreditCard,
        Self::DebitCard,
        Self::Contactless,
        Self::Qr,
    ];

    /// 对外展示名称（土耳其语）
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CreditCard => "Kredi Kartı",
            Self::DebitCard => "Banka Kartı",
            Self::Contactless => "Temassız",
            Self::Qr => "QR",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "CREDIT_CARD",
            Self::DebitCard => "DEBIT_CARD",
            Self::Contactless => "CONTACTLESS",
            Self::Qr => "QR",
        }
    }

    /// 在 `ALL` 中的位置
    pub fn ordinal(&self) -> usize {
        *self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Transaction {
        Transaction {
            id: "txn_100001".to_string(),
            terminal_id: "term_0010".to_string(),
            terminal_name: "Terminal 0010".to_string(),
            amount: 2176.55,
            currency: "TRY".to_string(),
            kind: TransactionType::Sale,
            status: TransactionStatus::Success,
            timestamp: Utc.with_ymd_and_hms(2026, 2, 20, 10, 0, 0).unwrap(),
            card_type: CardType::Credit,
            masked_card_number: "****2334".to_string(),
            payment_method: PaymentMethod::Qr,
        }
    }

    #[test]
    fn test_payment_method_not_serialized() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("paymentMethod").is_none());
        assert_eq!(value["type"], "SALE");
        assert_eq!(value["cardType"], "CREDIT");
        assert_eq!(value["timestamp"], "2026-02-20T10:00:00.000Z");
        assert_eq!(value["terminalName"], "Terminal 0010");
    }

    #[test]
    fn test_payment_method_order() {
        let names: Vec<_> = PaymentMethod::ALL.iter().map(|m| m.as_str()).collect();
        assert_eq!(names, ["CREDIT_CARD", "DEBIT_CARD", "CONTACTLESS", "QR"]);
        for (i, method) in PaymentMethod::ALL.iter().enumerate() {
            assert_eq!(method.ordinal(), i);
        }
        assert_eq!(
            serde_json::to_string(&PaymentMethod::DebitCard).unwrap(),
            "\"DEBIT_CARD\""
        );
    }
}
