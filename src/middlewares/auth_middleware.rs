//! # 인증 미들웨어
//!
//! 보호된 라우트 앞에서 액세스 토큰을 검증하고 호출자 정보를 요청 확장에
//! 넣습니다. 핸들러는 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)
//! 추출자로 이를 받습니다.
//!
//! | 상황 | 응답 |
//! |------|------|
//! | 헤더 없음, 토큰 위조/만료 | 401 |
//! | 유효한 토큰이지만 삭제된 사용자 | 403 |
//! | 저장소 에러 | 500 |
//!
//! ```rust,ignore
//! web::scope("/api/v1")
//!     .service(
//!         web::scope("")
//!             .wrap(AuthMiddleware::required())
//!             .service(get_self)
//!     )
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware;

impl AuthMiddleware {
    pub fn required() -> Self {
        AuthMiddleware
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};
    use crate::domain::entities::users::User;
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::services::auth::TokenService;
    use crate::services::users::user_service::tests::shared_store;
    use serial_test::serial;

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id)
    }

    macro_rules! protected_app {
        () => {
            test::init_service(
                App::new().service(
                    web::scope("")
                        .wrap(AuthMiddleware::required())
                        .route("/whoami", web::get().to(whoami)),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    #[serial]
    async fn test_missing_token_is_unauthorized() {
        shared_store();
        let app = protected_app!();

        let resp = test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    #[serial]
    async fn test_forged_token_is_unauthorized() {
        shared_store();
        let app = protected_app!();

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Bearer not.a.token"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }

    #[actix_web::test]
    #[serial]
    async fn test_deleted_user_is_forbidden() {
        shared_store();
        let app = protected_app!();
        let token = TokenService::instance().generate_token("mw-ghost").unwrap();

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 403);
    }

    #[actix_web::test]
    #[serial]
    async fn test_known_user_passes_with_or_without_prefix() {
        let store = shared_store();
        store.insert(User::new("mw-known"));
        let app = protected_app!();
        let token = TokenService::instance().generate_token("mw-known").unwrap();

        for header in [format!("Bearer {}", token), token.clone()] {
            let req = test::TestRequest::get()
                .uri("/whoami")
                .insert_header(("Authorization", header))
                .to_request();
            let body = test::call_and_read_body(&app, req).await;
            assert_eq!(body, "mw-known");
        }
    }
}
