//! 报表 API 处理器
//!
//! 报表不会真正生成，状态在查询时按创建时间推进

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    dto::{ApiResponse, GenerateReportRequest, JsonBody, ReportAccepted, ReportView},
    error::{ApiError, Result},
    state::AppState,
    stats::{TimeWindow, parse_ymd},
};

/// 提交报表任务
///
/// POST /reports/generate
#[instrument(skip_all)]
pub async fn generate_report(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<GenerateReportRequest>,
) -> Result<Json<ApiResponse<ReportAccepted>>> {
    req.validate()?;
    let GenerateReportRequest {
        kind: Some(kind),
        format: Some(format),
        start_date: Some(start_date),
        end_date: Some(end_date),
        filters,
    } = req
    else {
        return Err(ApiError::validation("type, format, startDate, endDate gerekli"));
    };

    let (Some(start), Some(end)) = (parse_ymd(&start_date), parse_ymd(&end_date)) else {
        return Err(ApiError::validation("startDate/endDate YYYY-MM-DD olmalı"));
    };
    TimeWindow::days(start, end)
        .map_err(|_| ApiError::validation("endDate startDate'den küçük olamaz"))?;

    let report = state
        .reports
        .create(kind, format, (start, end), filters, Utc::now());

    info!(
        report_id = %report.report_id,
        kind = %report.kind,
        format = %report.format,
        "报表任务已创建"
    );

    Ok(Json(ApiResponse::with_message(
        ReportAccepted::from(&report),
        "Rapor oluşturuluyor",
    )))
}

/// 查询报表状态
///
/// GET /reports/{id}
#[instrument(skip(state))]
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReportView>>> {
    let report = state
        .reports
        .get(&id, Utc::now())
        .ok_or_else(|| ApiError::ReportNotFound(id.clone()))?;

    Ok(Json(ApiResponse::success(ReportView::from(&report))))
}
