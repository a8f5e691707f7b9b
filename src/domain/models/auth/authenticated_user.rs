use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};

/// 인증 미들웨어가 요청 확장에 넣어 두는 호출자 정보
///
/// 핸들러는 인자로 선언하기만 하면 됩니다. 사용자 ID는 항상 토큰에서 오며
/// 요청 본문에서 읽지 않습니다.
///
/// ```rust,ignore
/// #[actix_web::get("/user")]
/// async fn get_self(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
///     // user.user_id
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다"
            ))),
        }
    }
}
