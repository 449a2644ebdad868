//! 统计与查询
//!
//! 交易切片上的纯函数：日期窗口、区间汇总、分桶、支付方式分布、小时分布与分页。

pub mod aggregate;
pub mod dates;
pub mod pagination;

pub use aggregate::{
    Bucket, Granularity, HourlyBucket, HourlyHistogram, PaymentMethodShare, RangeSum,
    TransactionFilter, group_by_bucket, hourly_histogram, payment_method_distribution,
    percentage_change, sum_in_range,
};
pub use dates::{RangeError, TimeWindow, parse_ymd};
pub use pagination::{PageLimits, PageParams, PageQuery, Pagination, paginate};
