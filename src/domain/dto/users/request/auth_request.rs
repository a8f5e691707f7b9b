use serde::Deserialize;
use validator::Validate;

/// Google OAuth 콜백 쿼리 파라미터
#[derive(Debug, Deserialize, Validate)]
pub struct OAuthCallbackQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "Authorization code가 필요합니다"))]
    pub code: String,

    #[serde(default)]
    pub state: String,

    /// 사용자가 동의를 거부한 경우 Google이 채워 보냅니다.
    pub error: Option<String>,
    pub error_description: Option<String>,
}
