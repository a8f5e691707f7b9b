//! # Domain Models Module
//!
//! 저장되지 않는 값 객체와 외부 시스템 응답 모델입니다.
//!
//! ## Entities vs Models 구분
//!
//! - **Entities** (`../entities/`): MongoDB 문서로 저장되는 객체 (`User`, 연결 계정)
//! - **Models** (`./`): 요청 처리 중에만 존재하는 값 (인증된 호출자, 토큰 클레임, OAuth 응답)
//!
//! ```text
//! models/
//! ├── auth/    ← 미들웨어가 주입하는 AuthenticatedUser
//! ├── oauth/   ← Google userinfo 응답
//! └── token/   ← JWT 클레임
//! ```

pub mod auth;
pub mod oauth;
pub mod token;

pub use auth::*;
pub use oauth::*;
pub use token::*;
