//! 사용자 요청 DTO
//!
//! ```rust,ignore
//! #[actix_web::post("/user")]
//! async fn update_user(
//!     user: AuthenticatedUser,
//!     payload: web::Json<UpdateUserRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate()
//!         .map_err(|e| AppError::ValidationError(e.to_string()))?;
//!     // ...
//! }
//! ```

pub mod update_user_request;
pub mod delete_user_request;
pub mod auth_request;

pub use update_user_request::{is_valid_display_name, FieldUpdate, UpdateUserRequest};
pub use delete_user_request::UserField;
pub use auth_request::OAuthCallbackQuery;
