//! # Application Error Handling System
//!
//! 서비스 전역에서 사용하는 에러 분류 체계입니다.
//! 프로바이더 호출, 저장소 호출, 인증 계층에서 발생한 에러가 모두
//! [`AppError`] 하나로 모이고, 핸들러에서는 `?` 연산자만으로
//! 적절한 HTTP 응답으로 변환됩니다.
//!
//! ## 에러 분류
//!
//! | 분류 | 변형 | HTTP |
//! |------|------|------|
//! | 잘못된 입력 | `ValidationError` | 400 |
//! | 외부 API가 식별자를 거부 | `UpstreamRejected` | 400 |
//! | 리소스 없음 | `NotFound` | 404 |
//! | 이름 충돌 | `ConflictError` | 409 |
//! | 인증 실패 | `AuthenticationError` | 401 |
//! | 권한 없음 | `AuthorizationError` | 403 |
//! | 외부 API 장애 | `UpstreamUnavailable` | 502 |
//! | 외부 API 시간 초과 | `UpstreamTimeout` | 504 |
//! | 저장소 에러 | `DatabaseError` | 500 |
//! | 내부 에러 | `InternalError` | 500 |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn get_user(id: &str) -> AppResult<User> {
//!     store.find_by_id(id).await?
//!         .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 코어 로직은 첫 번째로 발생한 에러를 감싸지 않고 그대로 전파하므로,
/// 에러 종류가 핸들러까지 손실 없이 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 호출자가 보낸 데이터가 잘못됨 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 외부 게임 API가 식별자를 거부함 (400 Bad Request)
    #[error("Rejected by {api} API: {reason}")]
    UpstreamRejected { api: String, reason: String },

    /// 리소스 찾을 수 없음 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 API 연결 실패, 5xx, 인증 거부 (502 Bad Gateway)
    #[error("Error contacting external API {api}: {reason}")]
    UpstreamUnavailable { api: String, reason: String },

    /// 외부 API 응답 시간 초과 (504 Gateway Timeout)
    #[error("Timeout contacting external API {api}")]
    UpstreamTimeout { api: String },

    /// 저장소 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn upstream_rejected(api: &str, reason: impl Into<String>) -> Self {
        AppError::UpstreamRejected {
            api: api.to_string(),
            reason: reason.into(),
        }
    }

    pub fn upstream_unavailable(api: &str, reason: impl Into<String>) -> Self {
        AppError::UpstreamUnavailable {
            api: api.to_string(),
            reason: reason.into(),
        }
    }

    /// 클라이언트에게 노출할 메시지
    ///
    /// 외부 API 장애의 세부 사유나 저장소 에러 내용은 로그에만 남기고
    /// 응답 본문에는 요약된 메시지만 담습니다.
    pub fn client_message(&self) -> String {
        match self {
            AppError::UpstreamRejected { reason, .. } => reason.clone(),
            AppError::UpstreamUnavailable { api, .. } => format!("Error contacting {} API", api),
            AppError::UpstreamTimeout { api } => format!("Timeout contacting {} API", api),
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamRejected { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            AppError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 모든 에러는 `{"error": "..."}` 형식의 JSON 본문을 가집니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        if self.status_code().is_server_error() {
            log::warn!("요청 처리 실패: {}", self);
        } else {
            log::debug!("요청 거부: {}", self);
        }

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.client_message()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::ValidationError("bad region".into()), StatusCode::BAD_REQUEST),
            (AppError::upstream_rejected("Riot", "invalid summoner"), StatusCode::BAD_REQUEST),
            (AppError::NotFound("user".into()), StatusCode::NOT_FOUND),
            (AppError::ConflictError("name taken".into()), StatusCode::CONFLICT),
            (AppError::AuthenticationError("no token".into()), StatusCode::UNAUTHORIZED),
            (AppError::AuthorizationError("not admin".into()), StatusCode::FORBIDDEN),
            (AppError::upstream_unavailable("Valve", "500"), StatusCode::BAD_GATEWAY),
            (AppError::UpstreamTimeout { api: "Blizzard".into() }, StatusCode::GATEWAY_TIMEOUT),
            (AppError::DatabaseError("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(error.error_response().status(), status, "{}", error);
        }
    }

    #[actix_web::test]
    async fn test_upstream_unavailable_hides_reason() {
        let error = AppError::upstream_unavailable("Riot", "connection reset by peer");
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "Error contacting Riot API");
    }

    #[actix_web::test]
    async fn test_upstream_rejected_exposes_reason() {
        let error = AppError::upstream_rejected("Valve", "private steam account");
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "private steam account");
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            other => panic!("Expected InternalError, got {:?}", other),
        }
    }
}
