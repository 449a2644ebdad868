//! Mock API 错误类型定义
//!
//! 错误消息沿用前端约定的土耳其语文案，错误码与 HTTP 状态码一一对应。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Mock API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 认证错误
    #[error("Yetkisiz erişim")]
    Unauthorized,
    #[error("E-posta veya şifre hatalı")]
    InvalidCredentials,

    // 验证错误
    #[error("{0}")]
    Validation(String),

    // 资源不存在，编号只用于日志
    #[error("Terminal bulunamadı")]
    TerminalNotFound(String),
    #[error("Kullanıcı bulunamadı")]
    MemberNotFound(String),
    #[error("Bildirim bulunamadı")]
    NotificationNotFound(String),
    #[error("Rapor bulunamadı")]
    ReportNotFound(String),
    #[error("Endpoint bulunamadı")]
    RouteNotFound(String),

    // 业务错误
    #[error("Terminal çevrimdışı")]
    TerminalOffline(String),

    // 系统错误
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 默认的校验失败文案
pub const DEFAULT_VALIDATION_MESSAGE: &str = "Doğrulama hatası";

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::TerminalNotFound(_)
            | Self::MemberNotFound(_)
            | Self::NotificationNotFound(_)
            | Self::ReportNotFound(_)
            | Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::TerminalOffline(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::TerminalNotFound(_)
            | Self::MemberNotFound(_)
            | Self::NotificationNotFound(_)
            | Self::ReportNotFound(_)
            | Self::RouteNotFound(_) => "NOT_FOUND",
            Self::TerminalOffline(_) => "TERMINAL_OFFLINE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "Sunucu hatası".to_string()
            }
            other => {
                tracing::debug!(code = other.error_code(), error = ?other, "请求失败");
                other.to_string()
            }
        };

        let body = json!({
            "success": false,
            "error": {
                "code": self.error_code(),
                "message": message,
            }
        });

        (status, Json(body)).into_response()
    }
}

/// 从 validator 错误转换
///
/// 取字段名排序后第一个字段的提示，保证多字段缺失时文案稳定
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| DEFAULT_VALIDATION_MESSAGE.to_string());
        Self::Validation(message)
    }
}

/// Handler 层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;
