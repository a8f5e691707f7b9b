//! 인증 서비스 모듈
//!
//! - [`TokenService`] - HS512 액세스 토큰 발급/검증
//! - [`GoogleAuthService`] - Google OAuth 2.0 로그인, 첫 로그인 시 사용자 생성
//!
//! ```rust,ignore
//! use crate::services::auth::{TokenService, GoogleAuthService};
//!
//! let token = GoogleAuthService::instance().authenticate_with_code(&code).await?;
//! let claims = TokenService::instance().verify_token(&token)?;
//! ```

pub mod token_service;
pub mod google_auth_service;

pub use token_service::*;
pub use google_auth_service::*;
