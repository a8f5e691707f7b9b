use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::core::{AppError, AppResult, ServiceLocator};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::auth::TokenService;
use crate::services::users::UserService;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let user = match authenticate(&req).await {
                Ok(user) => user,
                Err(err) => {
                    log::warn!("인증 거부 {}: {}", req.path(), err);
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            };

            log::debug!("인증 성공: 사용자 ID {}", user.user_id);
            req.extensions_mut().insert(user);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 토큰을 검증하고 토큰이 가리키는 사용자가 아직 존재하는지 확인합니다.
async fn authenticate(req: &ServiceRequest) -> AppResult<AuthenticatedUser> {
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("missing Authorization header".to_string()))?;

    let token_service = TokenService::instance();
    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_token(token)?;

    let user_service = ServiceLocator::try_get::<UserService>()
        .ok_or_else(|| AppError::InternalError("UserService is not registered".to_string()))?;

    if !user_service.is_user(&claims.id).await? {
        return Err(AppError::AuthorizationError("user does not exist".to_string()));
    }

    Ok(AuthenticatedUser { user_id: claims.id })
}
