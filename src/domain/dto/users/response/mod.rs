//! 사용자 응답 DTO
//!
//! 엔티티를 그대로 내보내지 않고 외부 JSON 형태로 변환합니다.
//!
//! ```rust,ignore
//! #[actix_web::get("/user")]
//! async fn get_self(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
//!     let stored = UserService::instance().get_user_by_id(&user.user_id).await?;
//!     Ok(HttpResponse::Ok().json(UserResponse::from(stored)))
//! }
//! ```

pub mod user_response;
pub mod google_oauth_response;

pub use user_response::{GameResponse, UserResponse};
pub use google_oauth_response::{GoogleTokenResponse, OAuthLoginRedirect};
