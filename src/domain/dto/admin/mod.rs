use serde::Deserialize;
use validator::Validate;

/// `POST /api/v1/updatekey` 본문
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateKeyRequest {
    #[validate(length(min = 1, message = "key가 필요합니다"))]
    pub key: String,
}
