//! 健康检查与兜底路由

use axum::{Json, http::Uri};

use crate::{dto::Health, error::ApiError};

/// 健康检查，不使用统一响应包装
///
/// GET /health
pub async fn health_check() -> Json<Health> {
    Json(Health { ok: true })
}

/// 未匹配的路由
pub async fn fallback(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
