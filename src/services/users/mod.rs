//! 사용자 프로필 서비스 모듈
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = ServiceLocator::get::<UserService>();
//! let refreshed = user_service.set_user(&caller.user_id, request).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
