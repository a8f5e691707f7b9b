//! 외부 API 응답 분류
//!
//! 게임 API마다 응답 형식은 다르지만 상태 코드를 에러 종류로 바꾸는 규칙은
//! 두 가지뿐입니다. 조회 경로는 [`check_status`], 계정 검증 경로는
//! [`check_account_status`]를 사용합니다.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use crate::core::errors::{AppError, AppResult};

const UNAUTHORIZED_REQUEST: &str = "unauthorized request to external API";

/// 플레이 시간 조회 응답 분류
///
/// | 상태 | 결과 |
/// |------|------|
/// | 200 | 성공 |
/// | 400, 404 | `UpstreamRejected(client_message)` |
/// | 403 | `UpstreamUnavailable` (API 키 문제) |
/// | 그 외 | `UpstreamUnavailable` |
pub fn check_status(api: &str, status: StatusCode, client_message: &str) -> AppResult<()> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => {
            Err(AppError::upstream_rejected(api, client_message))
        }
        StatusCode::FORBIDDEN => Err(AppError::upstream_unavailable(api, UNAUTHORIZED_REQUEST)),
        other => Err(AppError::upstream_unavailable(
            api,
            format!("unexpected status {}", other),
        )),
    }
}

/// 계정 검증 응답 분류
///
/// 403을 제외한 모든 비정상 응답은 사용자가 보낸 식별자의 문제로 봅니다.
pub fn check_account_status(api: &str, status: StatusCode, client_message: &str) -> AppResult<()> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::FORBIDDEN => Err(AppError::upstream_unavailable(api, UNAUTHORIZED_REQUEST)),
        _ => Err(AppError::upstream_rejected(api, client_message)),
    }
}

/// 전송 계층 에러 변환. 타임아웃은 별도 종류로 구분합니다.
pub fn transport_error(api: &str, error: reqwest::Error) -> AppError {
    if error.is_timeout() {
        log::warn!("{} API 요청 시간 초과: {}", api, error);
        AppError::UpstreamTimeout { api: api.to_string() }
    } else {
        log::warn!("{} API 요청 실패: {}", api, error);
        AppError::upstream_unavailable(api, error.to_string())
    }
}

/// 요청을 보내고 전송 에러를 분류합니다.
pub async fn send(api: &str, request: RequestBuilder) -> AppResult<Response> {
    request.send().await.map_err(|e| transport_error(api, e))
}

/// JSON 본문을 읽습니다. 해석할 수 없는 본문은 외부 API 장애로 취급합니다.
pub async fn read_json<T: DeserializeOwned>(api: &str, response: Response) -> AppResult<T> {
    let body = response.text().await.map_err(|e| transport_error(api, e))?;
    serde_json::from_str(&body).map_err(|e| {
        log::warn!("{} API 응답 파싱 실패: {}", api, e);
        AppError::upstream_unavailable(api, format!("malformed response: {}", e))
    })
}
