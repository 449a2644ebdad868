//! 统计 API 处理器

use axum::{
    Json,
    extract::State,
};
use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::{
    dto::{
        ApiResponse, DateRangeQuery, HourlyQuery, HourlyStats, PaymentMethodStats, QueryParams,
        StatsPeriod, StatsSummary, TransactionStats, TransactionStatsQuery,
    },
    error::{ApiError, Result},
    generators::reference::DEFAULT_CURRENCY,
    state::AppState,
    stats::{
        Granularity, TimeWindow, TransactionFilter, group_by_bucket, hourly_histogram,
        parse_ymd, payment_method_distribution, sum_in_range,
    },
};

/// 解析 startDate/endDate 并构造整日窗口
fn date_range(start: Option<&str>, end: Option<&str>) -> Result<TimeWindow> {
    let parse = |raw: Option<&str>| raw.and_then(parse_ymd);
    let (Some(start), Some(end)) = (parse(start), parse(end)) else {
        return Err(ApiError::validation("startDate ve endDate YYYY-MM-DD olmalı"));
    };
    TimeWindow::days(start, end)
        .map_err(|_| ApiError::validation("endDate startDate'den küçük olamaz"))
}

/// 交易统计
///
/// GET /statistics/transactions?startDate&endDate&groupBy=hour|day|week|month&terminalId
#[instrument(skip(state))]
pub async fn transactions(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<TransactionStatsQuery>,
) -> Result<Json<ApiResponse<TransactionStats>>> {
    let window = date_range(query.start_date.as_deref(), query.end_date.as_deref())?;
    let granularity: Granularity = query
        .group_by
        .as_deref()
        .filter(|g| !g.is_empty())
        .unwrap_or("day")
        .parse()
        .map_err(|_| ApiError::validation("groupBy: hour|day|week|month"))?;

    let mut filter = TransactionFilter::success();
    if let Some(terminal_id) = query.terminal_id.filter(|id| !id.is_empty()) {
        filter = filter.with_terminal(terminal_id);
    }

    let sum = sum_in_range(&state.transactions, &window, &filter);
    let chart_data = group_by_bucket(&state.transactions, &window, granularity, &filter);
    debug!(buckets = chart_data.len(), count = sum.count, "交易统计完成");

    Ok(Json(ApiResponse::success(TransactionStats {
        period: StatsPeriod {
            start_date: query.start_date.unwrap_or_default(),
            end_date: query.end_date.unwrap_or_default(),
            group_by: granularity.as_str(),
        },
        summary: StatsSummary {
            total_sales: sum.total_sales,
            total_transactions: sum.count,
            average_transaction: sum.average(),
            currency: DEFAULT_CURRENCY,
        },
        chart_data,
    })))
}

/// 支付方式分布
///
/// GET /statistics/payment-methods?startDate&endDate
#[instrument(skip(state))]
pub async fn payment_methods(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<DateRangeQuery>,
) -> Result<Json<ApiResponse<PaymentMethodStats>>> {
    let window = date_range(query.start_date.as_deref(), query.end_date.as_deref())?;

    Ok(Json(ApiResponse::success(PaymentMethodStats {
        payment_methods: payment_method_distribution(&state.transactions, &window),
    })))
}

/// 单日小时分布
///
/// GET /statistics/hourly?date=YYYY-MM-DD
#[instrument(skip(state))]
pub async fn hourly(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<HourlyQuery>,
) -> Result<Json<ApiResponse<HourlyStats>>> {
    let raw = query.date.unwrap_or_default();
    let date: NaiveDate =
        parse_ymd(&raw).ok_or_else(|| ApiError::validation("date YYYY-MM-DD olmalı"))?;

    let histogram = hourly_histogram(&state.transactions, date);

    Ok(Json(ApiResponse::success(HourlyStats {
        date: raw,
        hourly_data: histogram.hourly,
        peak_hour: histogram.peak,
    })))
}
