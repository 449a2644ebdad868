//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use paymore_shared::observability::middleware as obs_middleware;
use tower_http::cors::CorsLayer;

use crate::{handlers, middleware::auth_middleware, state::AppState};

/// 认证路由，登录与刷新为公开路由
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// 仪表盘与统计路由
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(handlers::dashboard::get_stats))
        .route(
            "/dashboard/recent-transactions",
            get(handlers::dashboard::recent_transactions),
        )
        .route(
            "/statistics/transactions",
            get(handlers::statistics::transactions),
        )
        .route(
            "/statistics/payment-methods",
            get(handlers::statistics::payment_methods),
        )
        .route("/statistics/hourly", get(handlers::statistics::hourly))
}

/// 终端管理路由
fn terminal_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/terminals",
            get(handlers::terminal::list_terminals).post(handlers::terminal::create_terminal),
        )
        .route(
            "/terminals/{id}",
            get(handlers::terminal::get_terminal)
                .put(handlers::terminal::update_terminal)
                .delete(handlers::terminal::delete_terminal),
        )
        .route(
            "/terminals/{id}/restart",
            post(handlers::terminal::restart_terminal),
        )
        .route(
            "/terminals/{id}/update-firmware",
            post(handlers::terminal::update_firmware),
        )
}

/// 商户资料与团队路由
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile/merchant",
            get(handlers::profile::get_merchant).put(handlers::profile::update_merchant),
        )
        .route(
            "/profile/change-password",
            post(handlers::profile::change_password),
        )
        .route(
            "/profile/team",
            get(handlers::profile::list_team).post(handlers::profile::create_member),
        )
        .route(
            "/profile/team/{id}",
            put(handlers::profile::update_member).delete(handlers::profile::delete_member),
        )
}

/// 通知与报表路由
fn inbox_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route("/reports/generate", post(handlers::report::generate_report))
        .route("/reports/{id}", get(handlers::report::get_report))
}

/// 构建全部 API 路由（不含中间件）
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(auth_routes())
        .merge(analytics_routes())
        .merge(terminal_routes())
        .merge(profile_routes())
        .merge(inbox_routes())
        .fallback(handlers::health::fallback)
}

/// 构建完整应用
///
/// 中间件执行顺序（外到内）：request_id -> http_tracing -> CORS -> 认证
pub fn create_app(state: AppState) -> Router {
    api_routes()
        .layer(middleware::from_fn(auth_middleware))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}
