use serde::Deserialize;

/// Google 토큰 엔드포인트 응답
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// 로그인 리다이렉트에 필요한 값
#[derive(Debug)]
pub struct OAuthLoginRedirect {
    pub login_url: String,
    /// `oauthstate` 쿠키에 저장되는 CSRF 상태 값
    pub state: String,
}
