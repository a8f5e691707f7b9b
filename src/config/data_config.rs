//! 서버 및 데이터 저장소 설정
//!
//! HTTP 서버 바인딩, 레이트 리밋, MongoDB, Redis 캐시 관련 값을 제공합니다.

use super::{parse_var_or, var_or};

/// HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        parse_var_or("PORT", 8080)
    }

    pub fn host() -> String {
        var_or("HOST", "0.0.0.0")
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }

    /// actix 워커 스레드 수
    pub fn workers() -> usize {
        parse_var_or("SERVER_WORKERS", 4)
    }

    /// 종료 신호 이후 진행 중인 요청을 기다리는 시간 (초)
    pub fn shutdown_timeout_secs() -> u64 {
        parse_var_or("SHUTDOWN_TIMEOUT_SECS", 15)
    }

    /// OAuth 리다이렉트 URL 조합에 사용하는 도메인
    pub fn domain() -> String {
        var_or("DOMAIN", "localhost")
    }

    pub fn cors_allowed_origin() -> String {
        var_or("CORS_ALLOWED_ORIGIN", "http://localhost:3000")
    }
}

/// `actix-governor` 레이트 리밋 설정
#[derive(Debug)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            per_second: parse_var_or("RATE_LIMIT_PER_SECOND", 100),
            burst_size: parse_var_or("RATE_LIMIT_BURST_SIZE", 200),
        }
    }
}

pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn mongodb_uri() -> String {
        var_or("MONGODB_URI", "mongodb://localhost:27017")
    }

    pub fn database_name() -> String {
        var_or("DATABASE_NAME", "game_time_dev")
    }
}

pub struct CacheConfig;

impl CacheConfig {
    pub fn redis_url() -> String {
        var_or("REDIS_URL", "redis://localhost:6379")
    }

    /// 사용자 문서 캐시 TTL (초)
    pub fn user_cache_ttl_secs() -> usize {
        parse_var_or("USER_CACHE_TTL_SECS", 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }

        if env::var("SHUTDOWN_TIMEOUT_SECS").is_err() {
            assert_eq!(ServerConfig::shutdown_timeout_secs(), 15);
        }
    }

    #[test]
    #[serial]
    fn test_rate_limit_defaults() {
        if env::var("RATE_LIMIT_PER_SECOND").is_err() && env::var("RATE_LIMIT_BURST_SIZE").is_err() {
            let config = RateLimitConfig::from_env();
            assert_eq!(config.per_second, 100);
            assert_eq!(config.burst_size, 200);
        }
    }

    #[test]
    #[serial]
    fn test_cache_ttl_default() {
        if env::var("USER_CACHE_TTL_SECS").is_err() {
            assert_eq!(CacheConfig::user_cache_ttl_secs(), 600);
        }
    }
}
