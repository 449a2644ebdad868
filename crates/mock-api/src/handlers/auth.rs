//! 认证 API 处理器
//!
//! 演示用认证：不校验密码，也不签发真实 Token

use axum::{Extension, Json, extract::State};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::{
    dto::{
        ApiResponse, JsonBody, LoginData, LoginRequest, LoginUser, RefreshData,
        RefreshTokenRequest, Tokens,
    },
    error::{ApiError, Result},
    middleware::BearerToken,
    state::AppState,
};

/// 唯一可登录的演示账号
pub const DEMO_LOGIN_EMAIL: &str = "info@paymoredemo.com";

/// Token 有效期（秒）
const TOKEN_TTL_SECS: u64 = 3600;

/// 登录
///
/// POST /auth/login
#[instrument(skip_all)]
pub async fn login(JsonBody(req): JsonBody<LoginRequest>) -> Result<Json<ApiResponse<LoginData>>> {
    let email = req.email.unwrap_or_default();
    let has_password = req.password.is_some_and(|p| !p.is_empty());

    if email != DEMO_LOGIN_EMAIL || !has_password {
        warn!(email = %email, "登录失败");
        return Err(ApiError::InvalidCredentials);
    }

    info!(email = %email, "登录成功");

    Ok(Json(ApiResponse::success(LoginData {
        user: LoginUser {
            id: "usr_123456",
            name: "Ahmet Yılmaz",
            email,
            merchant_id: "PM-2024-MER-001",
            role: "Admin",
        },
        tokens: Tokens {
            access_token: "mock_access_token".to_string(),
            refresh_token: "mock_refresh_token".to_string(),
            expires_in: TOKEN_TTL_SECS,
        },
    })))
}

/// 刷新 Token
///
/// POST /auth/refresh
#[instrument(skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RefreshTokenRequest>,
) -> Result<Json<ApiResponse<RefreshData>>> {
    req.validate()?;

    let (access, refresh) =
        state.with_rng(|rng| (rng.below(1_000_000_000), rng.below(1_000_000_000)));

    Ok(Json(ApiResponse::success(RefreshData {
        tokens: Tokens {
            access_token: format!("mock_access_token_{access}"),
            refresh_token: format!("mock_refresh_token_{refresh}"),
            expires_in: TOKEN_TTL_SECS,
        },
    })))
}

/// 退出登录
///
/// POST /auth/logout
#[instrument(skip_all)]
pub async fn logout(Extension(BearerToken(token)): Extension<BearerToken>) -> Json<ApiResponse<()>> {
    info!(token_len = token.len(), "退出登录");
    Json(ApiResponse::message("Çıkış yapıldı"))
}
