use serde::Deserialize;

/// Google userinfo 응답
///
/// `id`는 Google 계정의 안정적인 식별자이며 사용자 문서의 `_id`가 됩니다.
/// 나머지 값은 로그 외에는 사용하지 않습니다.
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub id: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}
