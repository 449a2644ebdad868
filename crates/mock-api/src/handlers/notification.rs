//! 通知 API 处理器

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::{info, instrument};

use crate::{
    dto::{ApiResponse, NotificationList, NotificationListQuery, QueryParams},
    error::{ApiError, Result},
    models::Notification,
    state::AppState,
    stats::{PageLimits, paginate},
};

/// 通知列表，最新的在前
///
/// GET /notifications?limit&offset&unreadOnly=true|false
#[instrument(skip(state))]
pub async fn list_notifications(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<NotificationListQuery>,
) -> Result<Json<ApiResponse<NotificationList>>> {
    let unread_only = query.unread_only();
    let params = query.page.resolve(PageLimits::NOTIFICATIONS);

    let list = state.notifications.read(|notifications| {
        let mut sorted: Vec<&Notification> = notifications
            .iter()
            .filter(|n| !unread_only || !n.is_read)
            .collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let (page, pagination) = paginate(&sorted, params);

        NotificationList {
            notifications: page.into_iter().cloned().collect(),
            pagination,
        }
    });

    Ok(Json(ApiResponse::success(list)))
}

/// 标记单条通知已读
///
/// PUT /notifications/{id}/read
#[instrument(skip(state))]
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Notification>>> {
    let notification = state
        .notifications
        .update(&id, |n| n.is_read = true)
        .ok_or_else(|| ApiError::NotificationNotFound(id.clone()))?;

    Ok(Json(ApiResponse::with_message(notification, "Bildirim okundu")))
}

/// 全部标记为已读
///
/// PUT /notifications/read-all
#[instrument(skip(state))]
pub async fn mark_all_read(State(state): State<AppState>) -> Result<Json<ApiResponse<()>>> {
    state.notifications.update_all(|n| n.is_read = true);
    info!(total = state.notifications.count(), "全部通知已读");
    Ok(Json(ApiResponse::message("Tüm bildirimler okundu")))
}
