//! # Authentication Configuration Module
//!
//! Google OAuth 2.0 클라이언트와 JWT 서명 설정을 관리합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export GOOGLE_OAUTH2_CLIENT_ID="your-google-client-id"
//! export GOOGLE_OAUTH2_CLIENT_SECRET="your-google-client-secret"
//! export HMAC_SECRET="long-random-secret"
//! ```
//!
//! `GOOGLE_REDIRECT_URI`가 없으면 `http://{DOMAIN}:{PORT}/api/v1/authcallback`을
//! 리다이렉트 주소로 사용합니다.

use crate::core::errors::AppResult;
use super::{parse_var_or, required_var, var_or, ServerConfig};

pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    pub fn client_id() -> AppResult<String> {
        required_var("GOOGLE_OAUTH2_CLIENT_ID")
    }

    pub fn client_secret() -> AppResult<String> {
        required_var("GOOGLE_OAUTH2_CLIENT_SECRET")
    }

    pub fn redirect_uri() -> String {
        std::env::var("GOOGLE_REDIRECT_URI").unwrap_or_else(|_| {
            format!(
                "http://{}:{}/api/v1/authcallback",
                ServerConfig::domain(),
                ServerConfig::port()
            )
        })
    }

    pub fn auth_uri() -> String {
        var_or("GOOGLE_AUTH_URI", "https://accounts.google.com/o/oauth2/auth")
    }

    pub fn token_uri() -> String {
        var_or("GOOGLE_TOKEN_URI", "https://oauth2.googleapis.com/token")
    }

    pub fn userinfo_uri() -> String {
        var_or("GOOGLE_USERINFO_URI", "https://www.googleapis.com/oauth2/v2/userinfo")
    }
}

pub struct JwtConfig;

impl JwtConfig {
    /// HS512 서명 키
    pub fn secret() -> AppResult<String> {
        required_var("HMAC_SECRET")
    }

    pub fn expiration_days() -> i64 {
        parse_var_or("JWT_EXPIRATION_DAYS", 30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_redirect_uri_points_at_callback() {
        if std::env::var("GOOGLE_REDIRECT_URI").is_err() {
            assert!(GoogleOAuthConfig::redirect_uri().ends_with("/api/v1/authcallback"));
        }
    }

    #[test]
    #[serial]
    fn test_google_endpoints_default() {
        if std::env::var("GOOGLE_TOKEN_URI").is_err() {
            assert_eq!(GoogleOAuthConfig::token_uri(), "https://oauth2.googleapis.com/token");
        }
    }

    #[test]
    #[serial]
    fn test_expiration_default_is_thirty_days() {
        if std::env::var("JWT_EXPIRATION_DAYS").is_err() {
            assert_eq!(JwtConfig::expiration_days(), 30);
        }
    }
}
