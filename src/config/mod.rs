//! # Configuration Module
//!
//! 환경 변수 기반 설정을 한 곳에서 관리합니다. 각 설정 묶음은 필드 없는
//! 단위 구조체이며 정적 접근자로 값을 읽습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, 레이트 리밋, MongoDB, Redis 캐시 설정
//! - [`auth_config`] - Google OAuth, JWT 설정
//! - [`provider_config`] - 게임 API 키, 베이스 URL, HTTP 클라이언트 타임아웃
//!
//! ## 환경 변수 설정 가이드
//!
//! ### 필수 환경 변수
//!
//! ```bash
//! export RIOT_API_KEY="RGAPI-..."
//! export VALVE_API_KEY="..."
//! export GOOGLE_OAUTH2_CLIENT_ID="..."
//! export GOOGLE_OAUTH2_CLIENT_SECRET="..."
//! export HMAC_SECRET="..."
//! ```
//!
//! ### 선택적 환경 변수
//!
//! ```bash
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export DOMAIN="localhost"
//! export CLIENT_TIMEOUT_SECS="15"
//! export SHUTDOWN_TIMEOUT_SECS="15"
//! ```
//!
//! 필수 값이 빠진 경우 [`missing_required_vars`]가 시작 시점에 이를 보고하고
//! 서버는 기동을 중단합니다.

pub mod data_config;
pub mod auth_config;
pub mod provider_config;

pub use data_config::*;
pub use auth_config::*;
pub use provider_config::*;

use std::env;
use std::str::FromStr;
use crate::core::errors::{AppError, AppResult};

/// 기동에 반드시 필요한 환경 변수 목록
pub const REQUIRED_VARS: &[&str] = &[
    "RIOT_API_KEY",
    "VALVE_API_KEY",
    "GOOGLE_OAUTH2_CLIENT_ID",
    "GOOGLE_OAUTH2_CLIENT_SECRET",
    "HMAC_SECRET",
];

/// 설정되지 않았거나 비어 있는 필수 환경 변수 이름을 반환합니다.
pub fn missing_required_vars() -> Vec<&'static str> {
    REQUIRED_VARS
        .iter()
        .copied()
        .filter(|name| env::var(name).map(|v| v.trim().is_empty()).unwrap_or(true))
        .collect()
}

/// 필수 환경 변수를 읽습니다.
pub(crate) fn required_var(name: &str) -> AppResult<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::InternalError(format!("{} must be set", name))),
    }
}

/// 값을 파싱하고 실패하면 기본값을 사용합니다.
pub(crate) fn parse_var_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} 파싱 실패: {:?}, 기본값 사용", name, raw);
            default
        }),
        Err(_) => default,
    }
}

pub(crate) fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_parse_var_or_falls_back_when_unset() {
        assert_eq!(parse_var_or("GAME_TIME_TEST_UNSET_NUMBER", 42u64), 42);
    }

    #[test]
    #[serial]
    fn test_required_var_missing_is_internal_error() {
        match required_var("GAME_TIME_TEST_UNSET_SECRET") {
            Err(AppError::InternalError(msg)) => assert!(msg.contains("GAME_TIME_TEST_UNSET_SECRET")),
            other => panic!("expected InternalError, got {:?}", other),
        }
    }
}
