//! # Google OAuth 2.0 인증 서비스
//!
//! 사용자 식별은 전적으로 Google에 위임합니다. Google 계정의 안정적인 식별자가
//! 곧 사용자 문서의 `_id`가 됩니다.
//!
//! ## Authorization Code Flow
//!
//! ```text
//! 클라이언트            우리 서버                          Google
//!     │ GET /login          │                                 │
//!     ├────────────────────►│ state 생성, oauthstate 쿠키     │
//!     │◄──── 302 ───────────┤                                 │
//!     │ 동의 화면 ─────────────────────────────────────────────►│
//!     │◄──────────────────────────────── code, state ─────────┤
//!     │ GET /authcallback   │                                 │
//!     ├────────────────────►│ state 쿠키 대조                 │
//!     │                     │ code → access_token ───────────►│
//!     │                     │ userinfo ──────────────────────►│
//!     │                     │ 사용자 없으면 생성               │
//!     │◄──── JWT (text) ────┤                                 │
//! ```

use singleton_macro::service;
use crate::{
    config::GoogleOAuthConfig,
    core::errors::{AppError, AppResult},
    core::registry::ServiceLocator,
    domain::dto::users::response::{GoogleTokenResponse, OAuthLoginRedirect},
    domain::models::oauth::GoogleUserInfo,
    providers::shared_http_client,
    providers::status::{read_json, send},
    services::auth::TokenService,
    services::users::UserService,
};

const API: &str = "Google";
const SCOPES: &str = "openid profile email";

#[service(name = "googleauth")]
pub struct GoogleAuthService {
    // 외부 의존성 없음
}

impl GoogleAuthService {
    /// 동의 화면 URL과 CSRF 방지용 state를 만듭니다.
    pub fn login_redirect(&self) -> AppResult<OAuthLoginRedirect> {
        let state = uuid::Uuid::new_v4().to_string();
        let login_url = build_login_url(
            &GoogleOAuthConfig::auth_uri(),
            &GoogleOAuthConfig::client_id()?,
            &GoogleOAuthConfig::redirect_uri(),
            &state,
        );

        Ok(OAuthLoginRedirect { login_url, state })
    }

    /// Authorization Code로 로그인하고 액세스 토큰을 발급합니다.
    pub async fn authenticate_with_code(&self, auth_code: &str) -> AppResult<String> {
        let users = ServiceLocator::try_get::<UserService>()
            .ok_or_else(|| AppError::InternalError("UserService is not registered".to_string()))?;

        sign_in(&GoogleOAuthClient::from_env()?, &users, auth_code).await
    }
}

/// 사용자를 식별하고, 처음 보는 사용자면 만든 뒤 토큰을 서명합니다.
pub(crate) async fn sign_in(client: &GoogleOAuthClient, users: &UserService, auth_code: &str) -> AppResult<String> {
    let google_user = client.identify(auth_code).await?;

    if users.create_user_if_absent(&google_user.id).await? {
        log::info!("첫 로그인: {} ({:?})", google_user.id, google_user.email);
    } else {
        log::debug!("로그인: {}", google_user.id);
    }

    TokenService::instance().generate_token(&google_user.id)
}

/// Google 토큰/사용자 정보 엔드포인트 클라이언트
///
/// 게임 API 클라이언트와 같은 HTTP 클라이언트를 공유하므로 같은 타임아웃이 적용됩니다.
pub struct GoogleOAuthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    token_uri: String,
    userinfo_uri: String,
}

impl GoogleOAuthClient {
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            http: shared_http_client()?,
            client_id: GoogleOAuthConfig::client_id()?,
            client_secret: GoogleOAuthConfig::client_secret()?,
            redirect_uri: GoogleOAuthConfig::redirect_uri(),
            token_uri: GoogleOAuthConfig::token_uri(),
            userinfo_uri: GoogleOAuthConfig::userinfo_uri(),
        })
    }

    /// code를 access token으로 교환한 뒤 Google 계정 정보를 조회합니다.
    pub async fn identify(&self, auth_code: &str) -> AppResult<GoogleUserInfo> {
        let token = self.exchange_code(auth_code).await?;
        self.user_info(&token.access_token).await
    }

    async fn exchange_code(&self, auth_code: &str) -> AppResult<GoogleTokenResponse> {
        let params = [
            ("code", auth_code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = send(API, self.http.post(&self.token_uri).form(&params)).await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("Google 토큰 교환 실패 ({}): {}", status, error_text);
            return Err(AppError::AuthenticationError("code exchange failed".to_string()));
        }

        read_json(API, response).await
    }

    async fn user_info(&self, access_token: &str) -> AppResult<GoogleUserInfo> {
        let response = send(API, self.http.get(&self.userinfo_uri).bearer_auth(access_token)).await?;

        if !response.status().is_success() {
            let status = response.status();
            log::warn!("Google 사용자 정보 조회 실패: {}", status);
            return Err(AppError::upstream_unavailable(API, format!("userinfo status {}", status)));
        }

        read_json(API, response).await
    }
}

fn build_login_url(auth_uri: &str, client_id: &str, redirect_uri: &str, state: &str) -> String {
    let params = [
        ("client_id", client_id),
        ("redirect_uri", redirect_uri),
        ("scope", SCOPES),
        ("response_type", "code"),
        ("state", state),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", auth_uri, query_string)
}
