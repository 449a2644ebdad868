//! 参考数据
//!
//! 生成数据时从这些固定列表中抽取，列表顺序会影响生成结果。

pub const MODELS: [&str; 3] = ["Paymore Pro X1", "Paymore Lite", "Paymore Pro X2"];

pub const LOCATIONS: [&str; 7] = [
    "Kasa 1 - Giriş",
    "Kasa 2 - Merkez",
    "Kasa 3 - Çıkış",
    "Kasa 4 - Üst Kat",
    "Kasa 5 - Depo",
    "Kasa 6 - Self Checkout",
    "Kasa 7 - Danışma",
];

pub const FIRMWARE_VERSIONS: [&str; 5] = ["2.3.8", "2.4.0", "2.4.1", "2.4.2", "2.5.0"];

/// 移动网络运营商
pub const PROVIDERS: [&str; 4] = ["Turkcell", "Vodafone", "Türk Telekom", "Local"];

pub const CONNECTIONS: [&str; 2] = ["4G", "WiFi"];

pub const CURRENCIES: [&str; 1] = ["TRY"];

/// 金额类指标使用的币种
pub const DEFAULT_CURRENCY: &str = "TRY";

pub const HARDWARE_MANUFACTURER: &str = "Paymore";
