//! 仪表盘 API 处理器

use axum::{
    Json,
    extract::State,
};
use chrono::Utc;
use tracing::instrument;

use crate::{
    dto::{
        ActiveTerminalsCard, ApiResponse, DashboardStats, DashboardStatsQuery, MetricCard,
        QueryParams, RecentTransactions,
    },
    error::{ApiError, Result},
    generators::reference::DEFAULT_CURRENCY,
    models::Transaction,
    state::AppState,
    stats::{
        PageLimits, PageQuery, TimeWindow, TransactionFilter, paginate, parse_ymd,
        percentage_change, sum_in_range,
    },
};

/// 统计周期对应的天数，未知周期按日统计
fn period_days(period: Option<&str>) -> u64 {
    match period.map(str::to_lowercase).as_deref() {
        Some("weekly") => 7,
        Some("monthly") => 30,
        _ => 1,
    }
}

/// 金额类指标卡片
fn amount_card(current: f64, previous: f64) -> MetricCard<f64> {
    MetricCard {
        value: current,
        currency: Some(DEFAULT_CURRENCY),
        change: percentage_change(current, previous),
        is_positive: current >= previous,
    }
}

/// 仪表盘概览
///
/// GET /dashboard/stats?date=YYYY-MM-DD&period=daily|weekly|monthly
#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<DashboardStatsQuery>,
) -> Result<Json<ApiResponse<DashboardStats>>> {
    let date = match query.date.as_deref().filter(|d| !d.is_empty()) {
        Some(raw) => {
            parse_ymd(raw).ok_or_else(|| ApiError::validation("date formatı YYYY-MM-DD olmalı"))?
        }
        None => Utc::now().date_naive(),
    };
    let days = period_days(query.period.as_deref());

    let filter = TransactionFilter::success();
    let window = TimeWindow::ending_on(date, days);
    let current = sum_in_range(&state.transactions, &window, &filter);
    let previous = sum_in_range(&state.transactions, &window.previous(), &filter);

    let (active, total) = state.terminal_counts();

    let stats = DashboardStats {
        daily_sales: amount_card(current.total_sales, previous.total_sales),
        transaction_count: MetricCard {
            value: current.count,
            currency: None,
            change: percentage_change(current.count as f64, previous.count as f64),
            is_positive: current.count >= previous.count,
        },
        average_transaction: amount_card(current.average(), previous.average()),
        active_terminals: ActiveTerminalsCard {
            value: active,
            total,
            change: 0.0,
            is_positive: true,
        },
    };

    Ok(Json(ApiResponse::success(stats)))
}

/// 最近交易，按时间倒序
///
/// GET /dashboard/recent-transactions?limit&offset
#[instrument(skip(state))]
pub async fn recent_transactions(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Json<ApiResponse<RecentTransactions>> {
    let params = query.resolve(PageLimits::RECENT_TRANSACTIONS);

    let mut sorted: Vec<&Transaction> = state.transactions.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let (page, pagination) = paginate(&sorted, params);

    Json(ApiResponse::success(RecentTransactions {
        transactions: page.into_iter().cloned().collect(),
        pagination,
    }))
}
