//! # 액세스 토큰 서비스
//!
//! OAuth 로그인 성공 시 발급하는 HS512 JWT를 생성하고 검증합니다.
//!
//! ## 클레임
//!
//! | 클레임 | 의미 |
//! |--------|------|
//! | `id` | 사용자 문서의 `_id` (Google 계정 식별자) |
//! | `iat` | 발급 시각 (Unix 초) |
//! | `exp` | 만료 시각, 기본 30일 |
//!
//! 리프레시 토큰은 없습니다. 만료되면 다시 로그인합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use crate::{
    config::JwtConfig,
    core::errors::{AppError, AppResult},
    domain::models::token::TokenClaims,
};

const BEARER_PREFIX: &str = "Bearer ";

#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    pub fn generate_token(&self, user_id: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            id: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(JwtConfig::expiration_days())).timestamp(),
        };

        sign(&JwtConfig::secret()?, &claims)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        verify(&JwtConfig::secret()?, token)
    }

    /// `Authorization` 헤더 값에서 토큰을 꺼냅니다. `Bearer ` 접두사는 있어도 없어도 됩니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        let token = auth_header
            .strip_prefix(BEARER_PREFIX)
            .unwrap_or(auth_header)
            .trim();

        if token.is_empty() {
            return Err(AppError::AuthenticationError("missing token".to_string()));
        }
        Ok(token)
    }
}

fn sign(secret: &str, claims: &TokenClaims) -> AppResult<String> {
    encode(
        &Header::new(Algorithm::HS512),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
}

fn verify(secret: &str, token: &str) -> AppResult<TokenClaims> {
    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS512),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::AuthenticationError("token expired".to_string()),
        _ => AppError::AuthenticationError("invalid token".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp_offset_secs: i64) -> TokenClaims {
        let now = Utc::now().timestamp();
        TokenClaims {
            id: "108123".to_string(),
            iat: now,
            exp: now + exp_offset_secs,
        }
    }

    #[test]
    fn test_signed_token_verifies() {
        let token = sign("secret", &claims(3600)).unwrap();
        assert_eq!(verify("secret", &token).unwrap().id, "108123");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = sign("secret", &claims(3600)).unwrap();
        assert!(matches!(verify("other", &token), Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = sign("secret", &claims(-3600)).unwrap();
        match verify("secret", &token) {
            Err(AppError::AuthenticationError(msg)) => assert_eq!(msg, "token expired"),
            other => panic!("expected AuthenticationError, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(verify("secret", "not.a.jwt"), Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_bearer_prefix_is_optional() {
        let service = TokenService::instance();

        assert_eq!(service.extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert_eq!(service.extract_bearer_token("abc.def").unwrap(), "abc.def");
        assert!(service.extract_bearer_token("Bearer ").is_err());
    }
}
