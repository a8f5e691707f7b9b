//! Google OAuth 로그인 핸들러
//!
//! 1. `GET /login` - state를 `oauthstate` 쿠키에 저장하고 Google 동의 화면으로 302
//! 2. `GET /authcallback` - state 확인, code 교환, 사용자 생성 후 서명된 토큰을 텍스트로 응답

use actix_web::cookie::{time::Duration, Cookie};
use actix_web::http::header;
use actix_web::{get, web, HttpRequest, HttpResponse, ResponseError};
use validator::Validate;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::request::OAuthCallbackQuery;
use crate::services::auth::GoogleAuthService;

pub const STATE_COOKIE: &str = "oauthstate";

fn state_cookie(state: String) -> Cookie<'static> {
    Cookie::build(STATE_COOKIE, state)
        .path("/")
        .http_only(true)
        .max_age(Duration::minutes(10))
        .finish()
}

fn state_removal() -> Cookie<'static> {
    let mut cookie = Cookie::build(STATE_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

#[get("/login")]
pub async fn login() -> Result<HttpResponse, AppError> {
    let redirect = GoogleAuthService::instance().login_redirect()?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, redirect.login_url))
        .cookie(state_cookie(redirect.state))
        .finish())
}

/// 성공하든 실패하든 state 쿠키는 지웁니다.
#[get("/authcallback")]
pub async fn auth_callback(
    req: HttpRequest,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let expected_state = req.cookie(STATE_COOKIE).map(|c| c.value().to_string());

    match complete_login(expected_state.as_deref(), query.into_inner()).await {
        Ok(token) => Ok(HttpResponse::Ok()
            .cookie(state_removal())
            .content_type("text/plain; charset=utf-8")
            .body(token)),
        Err(err) => {
            let mut response = err.error_response();
            let _ = response.add_cookie(&state_removal());
            Ok(response)
        }
    }
}

async fn complete_login(expected_state: Option<&str>, query: OAuthCallbackQuery) -> AppResult<String> {
    if let Some(error) = &query.error {
        let reason = query.error_description.as_deref().unwrap_or(error);
        log::warn!("Google OAuth 에러: {}", reason);
        return Err(AppError::AuthenticationError(reason.to_string()));
    }

    if let Some(expected) = expected_state {
        if expected != query.state {
            log::warn!("OAuth state 불일치");
            return Err(AppError::ValidationError("invalid auth state".to_string()));
        }
    }

    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    GoogleAuthService::instance()
        .authenticate_with_code(&query.code)
        .await
}
