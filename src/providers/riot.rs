//! League of Legends (Riot Games API)
//!
//! 소환사 검증은 이름 조회로, 플레이 시간은 전체 매치 수에 평균 매치 시간을
//! 곱해 추정합니다. 개발용 Riot 키는 하루 만에 만료되므로 관리자가
//! [`ApiKeyUpdater`]로 런타임에 교체할 수 있습니다.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use crate::config::ProviderConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::accounts::SummonerRegistration;
use crate::domain::entities::users::Game;
use super::credentials::ApiKeyHolder;
use super::status::{check_account_status, check_status, read_json, send};
use super::{AccountValidator, ApiKeyUpdater, PlaytimeFetcher};

const API: &str = "Riot";
const GAME_NAME: &str = "LeagueOfLegends";
const TOKEN_HEADER: &str = "X-Riot-Token";

/// 매치 한 판의 평균 시간 (분)
const AVERAGE_MATCH_MINUTES: i64 = 35;

/// 키 교체 시 확인용으로 조회하는 소환사
const KEY_CHECK_REGION: &str = "EUW1";
const KEY_CHECK_SUMMONER: &str = "LOPER";

const KEY_PREFIX: &str = "RGAPI-";
const KEY_LENGTH: usize = 42;

pub const REGIONS: &[&str] = &[
    "RU", "KR", "BR1", "OC1", "JP1", "NA1", "EUN1", "EUW1", "TR1", "LA1", "LA2",
];

#[derive(Debug, Deserialize)]
struct SummonerDto {
    #[serde(rename = "accountId")]
    account_id: String,
}

#[derive(Debug, Deserialize)]
struct MatchlistDto {
    #[serde(rename = "totalGames")]
    total_games: i64,
}

pub struct RiotClient {
    http: reqwest::Client,
    /// `{region}` 자리표시자를 포함할 수 있는 호스트 템플릿
    base_template: String,
    key: ApiKeyHolder,
}

impl RiotClient {
    pub fn new(http: reqwest::Client, base_template: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_template: base_template.into(),
            key: ApiKeyHolder::new(api_key.into()),
        }
    }

    pub fn from_env(http: reqwest::Client) -> AppResult<Self> {
        Ok(Self::new(http, ProviderConfig::riot_api_base(), ProviderConfig::riot_api_key()?))
    }

    fn host(&self, region: &str) -> String {
        self.base_template.replace("{region}", &region.to_lowercase())
    }

    fn summoner_url(&self, region: &str, name: &str) -> String {
        format!(
            "{}/lol/summoner/v4/summoners/by-name/{}",
            self.host(region),
            urlencoding::encode(name)
        )
    }
}

/// 지역을 허용 목록과 대조하고 대문자로 정규화합니다.
pub fn normalize_region(region: &str) -> AppResult<String> {
    let region = region.trim().to_uppercase();
    if REGIONS.contains(&region.as_str()) {
        Ok(region)
    } else {
        Err(AppError::ValidationError("invalid region for League of Legends".to_string()))
    }
}

/// 전체 매치 수로 추정한 플레이 시간 (시간 단위, 버림)
pub fn estimated_hours(total_games: i64) -> AppResult<i64> {
    total_games
        .checked_mul(AVERAGE_MATCH_MINUTES)
        .map(|minutes| minutes / 60)
        .ok_or_else(|| AppError::ValidationError(format!("LoL API returned an out-of-range game count: {}", total_games)))
}

#[async_trait]
impl AccountValidator<SummonerRegistration> for RiotClient {
    async fn validate(&self, mut registration: SummonerRegistration) -> AppResult<SummonerRegistration> {
        let region = normalize_region(&registration.summoner_region)?;
        if registration.summoner_name.trim().is_empty() {
            return Err(AppError::ValidationError("invalid username for League of Legends".to_string()));
        }

        let request = self
            .http
            .get(self.summoner_url(&region, &registration.summoner_name))
            .header(TOKEN_HEADER, &*self.key.snapshot());
        let response = send(API, request).await?;
        check_account_status(API, response.status(), "invalid username for League of Legends")?;

        let summoner: SummonerDto = read_json(API, response).await?;
        log::debug!("소환사 확인: {} ({})", registration.summoner_name, region);

        registration.summoner_region = region;
        registration.account_id = Some(summoner.account_id);
        Ok(registration)
    }
}

#[async_trait]
impl PlaytimeFetcher<SummonerRegistration> for RiotClient {
    async fn fetch_playtime(&self, registration: &SummonerRegistration) -> AppResult<Vec<Game>> {
        let region = normalize_region(&registration.summoner_region)?;
        let account_id = registration
            .account_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::ValidationError("missing summoner info".to_string()))?;

        let url = format!(
            "{}/lol/match/v4/matchlists/by-account/{}?beginIndex=99999",
            self.host(&region),
            urlencoding::encode(account_id)
        );
        let request = self.http.get(url).header(TOKEN_HEADER, &*self.key.snapshot());
        let response = send(API, request).await?;
        check_status(API, response.status(), "invalid League of Legends account")?;

        let matchlist: MatchlistDto = read_json(API, response).await?;
        Ok(vec![Game::new(GAME_NAME, estimated_hours(matchlist.total_games)?)])
    }
}

#[async_trait]
impl ApiKeyUpdater for RiotClient {
    /// 새 키로 확인 요청을 보내 거부되지 않을 때만 교체합니다.
    async fn update_key(&self, key: &str) -> AppResult<()> {
        if !key.starts_with(KEY_PREFIX) || key.len() != KEY_LENGTH {
            return Err(AppError::ValidationError("invalid API key".to_string()));
        }

        let request = self
            .http
            .get(self.summoner_url(KEY_CHECK_REGION, KEY_CHECK_SUMMONER))
            .header(TOKEN_HEADER, key);
        let response = send(API, request).await?;
        if response.status() == StatusCode::FORBIDDEN {
            return Err(AppError::ValidationError("invalid Riot API key".to_string()));
        }

        self.key.swap(key);
        log::info!("Riot API 키 교체 완료");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VALID_KEY: &str = "RGAPI-00000000-0000-0000-0000-000000000000";

    fn client(server: &MockServer) -> RiotClient {
        RiotClient::new(reqwest::Client::new(), server.uri(), VALID_KEY)
    }

    #[test]
    fn test_normalize_region() {
        assert_eq!(normalize_region("euw1").unwrap(), "EUW1");
        assert!(matches!(normalize_region("EUW2"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_estimated_hours_truncates() {
        assert_eq!(estimated_hours(0).unwrap(), 0);
        assert_eq!(estimated_hours(1).unwrap(), 0);
        assert_eq!(estimated_hours(12).unwrap(), 7);
    }

    #[test]
    fn test_estimated_hours_rejects_out_of_range_count() {
        assert!(matches!(estimated_hours(i64::MAX), Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_validate_adopts_account_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lol/summoner/v4/summoners/by-name/Loper"))
            .and(header(TOKEN_HEADER, VALID_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accountId": "acc-42",
                "name": "Loper"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let validated = client(&server)
            .validate(SummonerRegistration::new("Loper", "euw1"))
            .await
            .unwrap();

        assert_eq!(validated.summoner_region, "EUW1");
        assert_eq!(validated.account_id.as_deref(), Some("acc-42"));
    }

    #[tokio::test]
    async fn test_validate_rejects_bad_region_without_network_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client(&server)
            .validate(SummonerRegistration::new("Loper", "mars"))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_validate_unknown_summoner_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = client(&server)
            .validate(SummonerRegistration::new("Nobody", "NA1"))
            .await;

        match result {
            Err(AppError::UpstreamRejected { reason, .. }) => {
                assert_eq!(reason, "invalid username for League of Legends")
            }
            other => panic!("expected UpstreamRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_playtime_from_matchlist() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lol/match/v4/matchlists/by-account/acc-42"))
            .and(query_param("beginIndex", "99999"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "matches": [],
                "totalGames": 120
            })))
            .mount(&server)
            .await;

        let mut registration = SummonerRegistration::new("Loper", "EUW1");
        registration.account_id = Some("acc-42".to_string());

        let games = client(&server).fetch_playtime(&registration).await.unwrap();

        assert_eq!(games, vec![Game::new("LeagueOfLegends", 70)]);
    }

    #[tokio::test]
    async fn test_fetch_playtime_requires_account_id() {
        let server = MockServer::start().await;
        let result = client(&server)
            .fetch_playtime(&SummonerRegistration::new("Loper", "EUW1"))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_update_key_swaps_after_verification() {
        let server = MockServer::start().await;
        let new_key = "RGAPI-11111111-1111-1111-1111-111111111111";
        Mock::given(method("GET"))
            .and(path("/lol/summoner/v4/summoners/by-name/LOPER"))
            .and(header(TOKEN_HEADER, new_key))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"accountId": "x"})))
            .expect(1)
            .mount(&server)
            .await;

        let riot = client(&server);
        riot.update_key(new_key).await.unwrap();

        assert_eq!(&*riot.key.snapshot(), new_key);
    }

    #[tokio::test]
    async fn test_update_key_rejected_keeps_old_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let riot = client(&server);
        let result = riot.update_key("RGAPI-22222222-2222-2222-2222-222222222222").await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(&*riot.key.snapshot(), VALID_KEY);
    }

    #[tokio::test]
    async fn test_update_key_checks_format_first() {
        let server = MockServer::start().await;
        let riot = client(&server);

        assert!(matches!(riot.update_key("not-a-key").await, Err(AppError::ValidationError(_))));
        assert!(matches!(riot.update_key("RGAPI-short").await, Err(AppError::ValidationError(_))));
    }
}
