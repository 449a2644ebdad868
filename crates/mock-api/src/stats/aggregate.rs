//! 交易聚合
//!
//! 金额累加按交易顺序进行，最终结果统一保留两位小数。

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, Timelike, Utc};
use serde::Serialize;

use super::dates::TimeWindow;
use crate::models::{PaymentMethod, Transaction, TransactionStatus, UnknownVariant, round2};

/// 交易过滤条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub status: Option<TransactionStatus>,
    pub terminal_id: Option<String>,
}

impl TransactionFilter {
    /// 只统计成功交易
    pub fn success() -> Self {
        Self {
            status: Some(TransactionStatus::Success),
            terminal_id: None,
        }
    }

    pub fn with_terminal(mut self, terminal_id: impl Into<String>) -> Self {
        self.terminal_id = Some(terminal_id.into());
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.status.is_none_or(|status| tx.status == status)
            && self
                .terminal_id
                .as_deref()
                .is_none_or(|id| tx.terminal_id == id)
    }
}

fn selected<'a>(
    transactions: &'a [Transaction],
    window: &'a TimeWindow,
    filter: &'a TransactionFilter,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions
        .iter()
        .filter(move |tx| window.contains(&tx.timestamp) && filter.matches(tx))
}

/// 区间汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RangeSum {
    pub total_sales: f64,
    pub count: usize,
}

impl RangeSum {
    /// 平均金额，无交易时为 0
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            round2(self.total_sales / self.count as f64)
        }
    }
}

/// 统计窗口内满足条件的交易总额与笔数
pub fn sum_in_range(
    transactions: &[Transaction],
    window: &TimeWindow,
    filter: &TransactionFilter,
) -> RangeSum {
    let (total, count) = selected(transactions, window, filter)
        .fold((0.0, 0), |(total, count), tx| (total + tx.amount, count + 1));
    RangeSum {
        total_sales: round2(total),
        count,
    }
}

/// 变化百分比
///
/// 上期为 0 时：本期也为 0 记 0，否则记 100
pub fn percentage_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current == 0.0 { 0.0 } else { 100.0 };
    }
    round2((current - previous) / previous * 100.0)
}

/// 分桶粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Hour,
    Day,
    Week,
    Month,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [Self::Hour, Self::Day, Self::Week, Self::Month];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// 大小写不敏感
impl FromStr for Granularity {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant::new("granularity", s))
    }
}

/// 交易所属的桶
///
/// 小时 `YYYY-MM-DDTHH:00`，天 `YYYY-MM-DD`，周取所在周的周一，月 `YYYY-MM-01`
pub fn bucket_key(ts: &DateTime<Utc>, granularity: Granularity) -> String {
    let date = ts.date_naive();
    match granularity {
        Granularity::Hour => format!("{}T{:02}:00", date.format("%Y-%m-%d"), ts.hour()),
        Granularity::Day => date.format("%Y-%m-%d").to_string(),
        Granularity::Week => {
            let offset = u64::from(date.weekday().num_days_from_monday());
            let monday = date.checked_sub_days(Days::new(offset)).unwrap_or(date);
            monday.format("%Y-%m-%d").to_string()
        }
        Granularity::Month => format!("{:04}-{:02}-01", date.year(), date.month()),
    }
}

/// 图表数据点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub date: String,
    pub sales: f64,
    pub transactions: usize,
    pub average: f64,
}

/// 按粒度分桶，结果按桶起点升序
pub fn group_by_bucket(
    transactions: &[Transaction],
    window: &TimeWindow,
    granularity: Granularity,
    filter: &TransactionFilter,
) -> Vec<Bucket> {
    let mut buckets: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for tx in selected(transactions, window, filter) {
        let entry = buckets
            .entry(bucket_key(&tx.timestamp, granularity))
            .or_default();
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(date, (sales, count))| Bucket {
            date,
            sales: round2(sales),
            transactions: count,
            average: if count == 0 {
                0.0
            } else {
                round2(sales / count as f64)
            },
        })
        .collect()
}

/// 支付方式占比
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodShare {
    pub method: PaymentMethod,
    pub display_name: &'static str,
    pub count: usize,
    pub total_amount: f64,
    pub percentage: f64,
}

/// 窗口内成功交易的支付方式分布
///
/// 按固定顺序输出，笔数为 0 的方式不输出；窗口内没有交易时四种方式全部以 0 输出
pub fn payment_method_distribution(
    transactions: &[Transaction],
    window: &TimeWindow,
) -> Vec<PaymentMethodShare> {
    let filter = TransactionFilter::success();
    let mut totals = [(0usize, 0.0f64); PaymentMethod::ALL.len()];
    let mut total_count = 0usize;

    for tx in selected(transactions, window, &filter) {
        let slot = &mut totals[tx.payment_method.ordinal()];
        slot.0 += 1;
        slot.1 += tx.amount;
        total_count += 1;
    }

    PaymentMethod::ALL
        .into_iter()
        .zip(totals)
        .filter(|(_, (count, _))| *count > 0 || total_count == 0)
        .map(|(method, (count, amount))| PaymentMethodShare {
            method,
            display_name: method.display_name(),
            count,
            total_amount: round2(amount),
            percentage: if total_count == 0 {
                0.0
            } else {
                round2(count as f64 / total_count as f64 * 100.0)
            },
        })
        .collect()
}

/// 小时数据点
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HourlyBucket {
    pub hour: u32,
    pub sales: f64,
    pub transactions: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyHistogram {
    pub hourly: Vec<HourlyBucket>,
    pub peak: HourlyBucket,
}

/// 单日 24 小时的成功交易分布
///
/// 峰值取销售额严格最大的第一个小时；全天无交易时为 0 点
pub fn hourly_histogram(transactions: &[Transaction], date: NaiveDate) -> HourlyHistogram {
    let window = TimeWindow::day(date);
    let filter = TransactionFilter::success();

    let mut hourly: Vec<HourlyBucket> = (0..24)
        .map(|hour| HourlyBucket {
            hour,
            ..Default::default()
        })
        .collect();

    for tx in selected(transactions, &window, &filter) {
        let bucket = &mut hourly[tx.timestamp.hour() as usize];
        bucket.sales += tx.amount;
        bucket.transactions += 1;
    }

    let mut peak = HourlyBucket::default();
    for bucket in &mut hourly {
        bucket.sales = round2(bucket.sales);
        if bucket.sales > peak.sales {
            peak = *bucket;
        }
    }

    HourlyHistogram { hourly, peak }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardType, TransactionType};
    use chrono::TimeZone;

    fn tx(
        id: &str,
        terminal: &str,
        amount: f64,
        status: TransactionStatus,
        ts: DateTime<Utc>,
        method: PaymentMethod,
    ) -> Transaction {
        Transaction {
            id: id.to_string(),
            terminal_id: terminal.to_string(),
            terminal_name: format!("Terminal {terminal}"),
            amount,
            currency: "TRY".to_string(),
            kind: TransactionType::Sale,
            status,
            timestamp: ts,
            card_type: CardType::Credit,
            masked_card_number: "****1234".to_string(),
            payment_method: method,
        }
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, d, h, 30, 0).unwrap()
    }

    fn ymd(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    fn fixture() -> Vec<Transaction> {
        use PaymentMethod::*;
        use TransactionStatus::*;
        vec![
            tx("t1", "term_0001", 100.10, Success, at(16, 9), CreditCard),
            tx("t2", "term_0001", 200.20, Success, at(18, 14), Qr),
            tx("t3", "term_0002", 50.00, Failed, at(18, 14), Qr),
            tx("t4", "term_0002", 300.30, Success, at(20, 9), CreditCard),
            tx("t5", "term_0001", 10.00, Success, at(20, 23), Contactless),
            tx("t6", "term_0003", 999.99, Success, at(25, 1), DebitCard),
        ]
    }

    #[test]
    fn test_percentage_change_edges() {
        assert_eq!(percentage_change(0.0, 0.0), 0.0);
        assert_eq!(percentage_change(42.0, 0.0), 100.0);
        assert_eq!(percentage_change(150.0, 100.0), 50.0);
        assert_eq!(percentage_change(50.0, 100.0), -50.0);
        assert_eq!(percentage_change(1.0, 3.0), -66.67);
    }

    #[test]
    fn test_filter_matches() {
        let txs = fixture();
        let success = TransactionFilter::success();
        assert!(success.matches(&txs[0]));
        assert!(!success.matches(&txs[2]));

        let terminal = TransactionFilter::default().with_terminal("term_0002");
        assert!(terminal.matches(&txs[2]));
        assert!(!terminal.matches(&txs[0]));
    }

    #[test]
    fn test_sum_in_range() {
        let txs = fixture();
        let window = TimeWindow::days(ymd(16), ymd(20)).unwrap();

        let sum = sum_in_range(&txs, &window, &TransactionFilter::success());
        assert_eq!(sum.count, 4);
        assert_eq!(sum.total_sales, 610.6);
        assert_eq!(sum.average(), 152.65);

        let all = sum_in_range(&txs, &window, &TransactionFilter::default());
        assert_eq!(all.count, 5);

        let empty = sum_in_range(&txs, &TimeWindow::day(ymd(1)), &TransactionFilter::success());
        assert_eq!(empty, RangeSum::default());
        assert_eq!(empty.average(), 0.0);
    }

    #[test]
    fn test_granularity_parse() {
        assert_eq!("HOUR".parse::<Granularity>().unwrap(), Granularity::Hour);
        assert_eq!("Week".parse::<Granularity>().unwrap(), Granularity::Week);
        assert!("year".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_bucket_keys() {
        // 2026-02-18 是周三
        let ts = Utc.with_ymd_and_hms(2026, 2, 18, 7, 45, 0).unwrap();
        assert_eq!(bucket_key(&ts, Granularity::Hour), "2026-02-18T07:00");
        assert_eq!(bucket_key(&ts, Granularity::Day), "2026-02-18");
        assert_eq!(bucket_key(&ts, Granularity::Week), "2026-02-16");
        assert_eq!(bucket_key(&ts, Granularity::Month), "2026-02-01");

        // 周日归入前一个周一
        let sunday = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(bucket_key(&sunday, Granularity::Week), "2026-02-23");
    }

    #[test]
    fn test_group_by_day() {
        let txs = fixture();
        let window = TimeWindow::days(ymd(16), ymd(20)).unwrap();

        let buckets = group_by_bucket(&txs, &window, Granularity::Day, &TransactionFilter::success());

        let keys: Vec<_> = buckets.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(keys, ["2026-02-16", "2026-02-18", "2026-02-20"]);
        assert_eq!(buckets[2].transactions, 2);
        assert_eq!(buckets[2].sales, 310.3);
        assert_eq!(buckets[2].average, 155.15);
    }

    #[test]
    fn test_bucket_counts_match_range_sum() {
        let txs = fixture();
        let window = TimeWindow::days(ymd(1), ymd(28)).unwrap();
        let filters = [
            TransactionFilter::success(),
            TransactionFilter::default(),
            TransactionFilter::success().with_terminal("term_0001"),
        ];

        for filter in &filters {
            let expected = sum_in_range(&txs, &window, filter).count;
            for granularity in Granularity::ALL {
                let total: usize = group_by_bucket(&txs, &window, granularity, filter)
                    .iter()
                    .map(|b| b.transactions)
                    .sum();
                assert_eq!(total, expected, "{granularity:?}");
            }
        }
    }

    #[test]
    fn test_payment_method_distribution() {
        let txs = fixture();
        let window = TimeWindow::days(ymd(16), ymd(20)).unwrap();

        let shares = payment_method_distribution(&txs, &window);

        let methods: Vec<_> = shares.iter().map(|s| s.method).collect();
        assert_eq!(
            methods,
            [PaymentMethod::CreditCard, PaymentMethod::Contactless, PaymentMethod::Qr]
        );
        assert_eq!(shares[0].count, 2);
        assert_eq!(shares[0].total_amount, 400.4);
        assert_eq!(shares[0].percentage, 50.0);
        assert_eq!(shares[0].display_name, "Kredi Kartı");
        // 失败交易不计入
        assert_eq!(shares[2].count, 1);
        assert_eq!(shares[2].percentage, 25.0);
    }

    #[test]
    fn test_payment_method_distribution_empty_window() {
        let shares = payment_method_distribution(&fixture(), &TimeWindow::day(ymd(1)));
        assert_eq!(shares.len(), 4);
        assert!(shares.iter().all(|s| s.count == 0 && s.percentage == 0.0));
    }

    #[test]
    fn test_hourly_histogram() {
        let txs = fixture();

        let histogram = hourly_histogram(&txs, ymd(20));

        assert_eq!(histogram.hourly.len(), 24);
        assert!(histogram.hourly.iter().enumerate().all(|(i, b)| b.hour == i as u32));
        assert_eq!(histogram.hourly[9].sales, 300.3);
        assert_eq!(histogram.hourly[23].transactions, 1);
        assert_eq!(histogram.peak.hour, 9);
        assert_eq!(histogram.peak.sales, 300.3);
    }

    #[test]
    fn test_hourly_peak_first_strict_max() {
        use PaymentMethod::Qr;
        use TransactionStatus::Success;
        let txs = vec![
            tx("a", "term_0001", 50.0, Success, at(20, 3), Qr),
            tx("b", "term_0001", 50.0, Success, at(20, 7), Qr),
        ];

        let histogram = hourly_histogram(&txs, ymd(20));
        assert_eq!(histogram.peak.hour, 3);

        let empty = hourly_histogram(&txs, ymd(21));
        assert_eq!(empty.peak, HourlyBucket::default());
    }
}
