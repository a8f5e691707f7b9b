//! 게임 API 프로바이더 설정
//!
//! API 키, 공용 HTTP 클라이언트 타임아웃, 각 API의 베이스 URL을 제공합니다.
//! 베이스 URL은 테스트나 프록시 환경에서 교체할 수 있습니다.

use std::time::Duration;
use crate::core::errors::AppResult;
use super::{parse_var_or, required_var, var_or};

pub struct ProviderConfig;

impl ProviderConfig {
    pub fn riot_api_key() -> AppResult<String> {
        required_var("RIOT_API_KEY")
    }

    pub fn valve_api_key() -> AppResult<String> {
        required_var("VALVE_API_KEY")
    }

    /// 모든 외부 API 호출에 적용되는 요청 타임아웃
    pub fn client_timeout() -> Duration {
        Duration::from_secs(parse_var_or("CLIENT_TIMEOUT_SECS", 15))
    }

    /// `{region}` 자리표시자를 포함한 Riot API 호스트 템플릿
    pub fn riot_api_base() -> String {
        var_or("RIOT_API_BASE", "https://{region}.api.riotgames.com")
    }

    pub fn overwatch_api_base() -> String {
        var_or("OVERWATCH_API_BASE", "https://ow-api.com/v1/stats")
    }

    pub fn steam_api_base() -> String {
        var_or("STEAM_API_BASE", "https://api.steampowered.com")
    }

    pub fn runescape_hiscore_base() -> String {
        var_or("RUNESCAPE_HISCORE_BASE", "http://services.runescape.com")
    }
}
