//! Bearer 认证中间件
//!
//! 只检查 Authorization 头是否携带 Bearer Token，不校验 Token 内容。

use axum::{body::Body, http::Request, middleware::Next, response::IntoResponse, response::Response};

use crate::error::ApiError;

/// 公开路由列表（不需要认证）
const PUBLIC_PATHS: [&str; 3] = ["/auth/login", "/auth/refresh", "/health"];

/// 请求携带的 Token，注入请求扩展供处理器使用
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// 认证中间件
///
/// 公开路由直接放行，其余路由缺少 `Bearer ` 前缀时返回 401
pub async fn auth_middleware(mut request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path();

    if PUBLIC_PATHS.contains(&path) {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);

    match token {
        Some(token) => {
            request.extensions_mut().insert(BearerToken(token));
            next.run(request).await
        }
        None => ApiError::Unauthorized.into_response(),
    }
}
