//! OAuth 제공자 응답 모델

pub mod google_user;

pub use google_user::GoogleUserInfo;
