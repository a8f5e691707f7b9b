//! # HTTP 핸들러
//!
//! 요청을 해석해 서비스 계층을 호출하고, 결과를 HTTP 응답으로 바꿉니다.
//! 에러는 모두 [`AppError`]로 반환되어 `ResponseError` 구현이 상태 코드와
//! `{"error": "..."}` 본문을 결정합니다.
//!
//! ```text
//! Client ──► Handlers (이 모듈) ──► UserService / GoogleAuthService ──► Providers, Store
//! ```
//!
//! - [`users`] - 프로필 조회, 재조정 저장, 삭제, 플레이 시간 새로고침
//! - [`auth`] - Google OAuth 로그인과 콜백
//! - [`admin`] - Riot API 키 교체

pub mod users;
pub mod auth;
pub mod admin;

use std::sync::Arc;
use actix_web::{error::JsonPayloadError, web, HttpRequest};
use crate::core::{AppError, ServiceLocator};
use crate::services::users::UserService;

/// `main`에서 등록한 사용자 서비스
pub(crate) fn user_service() -> Result<Arc<UserService>, AppError> {
    ServiceLocator::try_get::<UserService>()
        .ok_or_else(|| AppError::InternalError("UserService is not registered".to_string()))
}

/// 잘못된 JSON 본문도 다른 에러와 같은 형태로 응답합니다.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        AppError::ValidationError(format!("invalid request body: {}", err)).into()
    })
}
