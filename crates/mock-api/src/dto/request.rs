//! 请求 DTO 定义
//!
//! 必填字段声明为 Option，缺失与空字符串都由 validator 统一报告为校验错误。

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, FailedToBufferBody};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;
use crate::stats::PageQuery;

/// 宽松的 JSON 请求体
///
/// 空请求体按 `{}` 处理，格式错误的 JSON 返回校验错误
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                BytesRejection::FailedToBufferBody(FailedToBufferBody::LengthLimitError(_)) => {
                    ApiError::validation("İstek gövdesi çok büyük")
                }
                other => ApiError::Internal(format!("读取请求体失败: {}", other)),
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes).map(Self).map_err(|e| {
            tracing::debug!(error = %e, "请求体解析失败");
            ApiError::validation("Geçersiz JSON")
        })
    }
}

/// 查询参数提取器
///
/// 无法解析的查询串（如重复的键）返回校验错误
#[derive(Debug, Clone, Default)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|e| {
                tracing::debug!(error = %e, "查询参数解析失败");
                ApiError::validation("Geçersiz sorgu parametreleri")
            })
    }
}

// ==================== 认证 ====================

/// 登录请求，凭据错误统一返回 INVALID_CREDENTIALS
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(
        required(message = "refreshToken gerekli"),
        length(min = 1, message = "refreshToken gerekli")
    )]
    pub refresh_token: Option<String>,
}

// ==================== 仪表盘与统计 ====================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardStatsQuery {
    pub date: Option<String>,
    pub period: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub group_by: Option<String>,
    pub terminal_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyQuery {
    pub date: Option<String>,
}

// ==================== 终端 ====================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TerminalListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    #[serde(flatten)]
    pub page: PageQuery,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTerminalRequest {
    #[validate(
        required(message = "Eksik alan(lar)"),
        length(min = 1, message = "Eksik alan(lar)")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Eksik alan(lar)"),
        length(min = 1, message = "Eksik alan(lar)")
    )]
    pub serial_number: Option<String>,
    #[validate(
        required(message = "Eksik alan(lar)"),
        length(min = 1, message = "Eksik alan(lar)")
    )]
    pub model: Option<String>,
    #[validate(
        required(message = "Eksik alan(lar)"),
        length(min = 1, message = "Eksik alan(lar)")
    )]
    pub location: Option<String>,
    #[validate(
        required(message = "Eksik alan(lar)"),
        length(min = 1, message = "Eksik alan(lar)")
    )]
    pub imei: Option<String>,
}

/// 终端部分更新，空字符串视为未提供
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTerminalRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FirmwareUpdateRequest {
    #[validate(
        required(message = "version gerekli"),
        length(min = 1, message = "version gerekli")
    )]
    pub version: Option<String>,
}

// ==================== 商户与团队 ====================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(
        required(message = "currentPassword ve newPassword gerekli"),
        length(min = 1, message = "currentPassword ve newPassword gerekli")
    )]
    pub current_password: Option<String>,
    #[validate(
        required(message = "currentPassword ve newPassword gerekli"),
        length(min = 1, message = "currentPassword ve newPassword gerekli")
    )]
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(
        required(message = "name, email, role gerekli"),
        length(min = 1, message = "name, email, role gerekli")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "name, email, role gerekli"),
        length(min = 1, message = "name, email, role gerekli")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "name, email, role gerekli"),
        length(min = 1, message = "name, email, role gerekli")
    )]
    pub role: Option<String>,
}

/// 成员部分更新，空字符串视为未提供
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

// ==================== 通知 ====================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListQuery {
    pub unread_only: Option<String>,
    #[serde(flatten)]
    pub page: PageQuery,
}

impl NotificationListQuery {
    /// 仅当取值为 "true"（不区分大小写）时过滤已读通知
    pub fn unread_only(&self) -> bool {
        self.unread_only
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

// ==================== 报表 ====================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    #[serde(rename = "type")]
    #[validate(
        required(message = "type, format, startDate, endDate gerekli"),
        length(min = 1, message = "type, format, startDate, endDate gerekli")
    )]
    pub kind: Option<String>,
    #[validate(
        required(message = "type, format, startDate, endDate gerekli"),
        length(min = 1, message = "type, format, startDate, endDate gerekli")
    )]
    pub format: Option<String>,
    #[validate(
        required(message = "type, format, startDate, endDate gerekli"),
        length(min = 1, message = "type, format, startDate, endDate gerekli")
    )]
    pub start_date: Option<String>,
    #[validate(
        required(message = "type, format, startDate, endDate gerekli"),
        length(min = 1, message = "type, format, startDate, endDate gerekli")
    )]
    pub end_date: Option<String>,
    pub filters: Option<serde_json::Value>,
}

/// 去掉空字符串
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
