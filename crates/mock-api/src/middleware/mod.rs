//! 中间件模块

mod auth;

pub use auth::{BearerToken, auth_middleware};
