//! HTTP 미들웨어
//!
//! - [`AuthMiddleware`] - 보호된 라우트의 토큰 검증과 사용자 존재 확인

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
