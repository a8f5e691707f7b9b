use serde::{Deserialize, Serialize};

/// 액세스 토큰 클레임
///
/// `id`는 사용자 문서의 `_id`입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: String,
    pub iat: i64,
    pub exp: i64,
}
