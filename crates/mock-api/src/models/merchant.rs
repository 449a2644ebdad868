//! 商户资料

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::time::millis;

/// 商户资料（单例）
///
/// 终端数量不在这里保存，每次读取时由终端存储实时统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantProfile {
    pub merchant_id: String,
    pub business_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(with = "millis")]
    pub registration_date: DateTime<Utc>,
    pub status: String,
    pub tax_id: String,
    pub business_type: String,
}

impl MerchantProfile {
    /// 演示商户
    pub fn demo() -> Self {
        Self {
            merchant_id: "PM-2024-MER-001".to_string(),
            business_name: "Paymore Demo Mağaza".to_string(),
            contact_person: "Ahmet Yılmaz".to_string(),
            email: "info@paymoredemo.com".to_string(),
            phone: "+90 532 123 4567".to_string(),
            address: "Maslak Mahallesi, Büyükdere Cad. No:123 Sarıyer/İstanbul".to_string(),
            registration_date: Utc
                .with_ymd_and_hms(2024, 1, 15, 0, 0, 0)
                .single()
                .unwrap_or_default(),
            status: "ACTIVE".to_string(),
            tax_id: "1234567890".to_string(),
            business_type: "RETAIL".to_string(),
        }
    }

    /// 应用部分更新，只有出现的字段会被覆盖
    pub fn apply(&mut self, patch: MerchantProfilePatch) {
        let MerchantProfilePatch {
            business_name,
            contact_person,
            email,
            phone,
            address,
            tax_id,
            business_type,
        } = patch;

        let fields = [
            (&mut self.business_name, business_name),
            (&mut self.contact_person, contact_person),
            (&mut self.email, email),
            (&mut self.phone, phone),
            (&mut self.address, address),
            (&mut self.tax_id, tax_id),
            (&mut self.business_type, business_type),
        ];
        for (slot, value) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

/// 商户资料的可修改字段
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantProfilePatch {
    pub business_name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub business_type: Option<String>,
}
