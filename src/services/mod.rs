//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! - [`users`] - 프로필 재조정, 플레이 시간 새로고침, 삭제, 관리자 키 교체
//! - [`auth`] - Google OAuth 로그인과 액세스 토큰
//!
//! 인증 서비스는 `#[service]` 매크로로 싱글톤이 되고, 사용자 서비스는 저장소와
//! 게임 제공자를 주입받아 `main`에서 등록됩니다.
//!
//! ```rust,ignore
//! use crate::services::{users::UserService, auth::TokenService};
//!
//! let user_service = ServiceLocator::get::<UserService>();
//! let token_service = TokenService::instance();
//! ```

pub mod users;
pub mod auth;
