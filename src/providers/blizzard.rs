//! Overwatch (ow-api.com)
//!
//! 공식 API가 없어 커뮤니티 프록시를 사용합니다. 이 프록시는 가끔 플레이 시간
//! 필드를 비운 채 200을 돌려주므로 조회 경로는 최대 [`MAX_ATTEMPTS`]번까지
//! 같은 요청을 반복합니다. 상태 코드 에러는 반복하지 않습니다.

use async_trait::async_trait;
use serde::Deserialize;
use crate::config::ProviderConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::accounts::OverwatchAccount;
use crate::domain::entities::users::Game;
use super::status::{check_account_status, check_status, read_json, send};
use super::{AccountValidator, PlaytimeFetcher};

const API: &str = "Blizzard";
const GAME_NAME: &str = "Overwatch";
pub const MAX_ATTEMPTS: usize = 10;

pub const REGIONS: &[&str] = &["us", "eu", "asia"];
pub const PLATFORMS: &[&str] = &["pc", "switch", "xbox", "ps4"];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileStats {
    #[serde(default)]
    competitive_stats: ModeStats,
    #[serde(default)]
    quick_play_stats: ModeStats,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModeStats {
    #[serde(default)]
    career_stats: CareerStats,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CareerStats {
    #[serde(default)]
    all_heroes: HeroStats,
}

#[derive(Debug, Default, Deserialize)]
struct HeroStats {
    #[serde(default)]
    game: GameStats,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameStats {
    #[serde(default)]
    time_played: Option<String>,
}

impl ModeStats {
    fn time_played(&self) -> Option<&str> {
        self.career_stats
            .all_heroes
            .game
            .time_played
            .as_deref()
            .filter(|t| !t.is_empty())
    }
}

/// 한 번의 조회 결과
enum Attempt {
    Complete(i64),
    /// 플레이 시간 필드가 빠진 응답
    Incomplete,
}

pub struct BlizzardClient {
    http: reqwest::Client,
    base_url: String,
}

impl BlizzardClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn from_env(http: reqwest::Client) -> Self {
        Self::new(http, ProviderConfig::overwatch_api_base())
    }

    fn profile_url(&self, account: &OverwatchAccount) -> String {
        format!(
            "{}/{}/{}/{}/heroes/complete",
            self.base_url,
            account.platform,
            account.region,
            urlencoding::encode(&account.battle_tag.replace('#', "-"))
        )
    }

    async fn query(&self, url: &str) -> AppResult<Attempt> {
        let response = send(API, self.http.get(url)).await?;
        check_status(API, response.status(), "invalid Blizzard battle tag or region")?;

        let stats: ProfileStats = read_json(API, response).await?;
        let (Some(quick), Some(competitive)) = (
            stats.quick_play_stats.time_played(),
            stats.competitive_stats.time_played(),
        ) else {
            return Ok(Attempt::Incomplete);
        };

        let seconds = parse_time_played(quick)?
            .checked_add(parse_time_played(competitive)?)
            .ok_or_else(time_overflow)?;
        Ok(Attempt::Complete(seconds / 3600))
    }
}

/// `ss`, `mm:ss`, `hh:mm:ss` 형식의 시간을 초 단위로 변환합니다.
pub fn parse_time_played(raw: &str) -> AppResult<i64> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    if parts.len() > 3 {
        return Err(AppError::ValidationError(format!(
            "OW API changed the way time is encoded, got |{}| parts",
            parts.len()
        )));
    }

    parts.iter().try_fold(0i64, |acc, part| {
        let value: i64 = part.trim().parse().map_err(|_| {
            AppError::ValidationError(format!("OW API returned a non-numeric time part: {:?}", raw))
        })?;
        acc.checked_mul(60)
            .and_then(|seconds| seconds.checked_add(value))
            .ok_or_else(time_overflow)
    })
}

fn time_overflow() -> AppError {
    AppError::ValidationError("OW API returned an out-of-range play time".to_string())
}

fn normalize(mut account: OverwatchAccount) -> AppResult<OverwatchAccount> {
    account.region = account.region.trim().to_lowercase();
    account.platform = account.platform.trim().to_lowercase();

    if !REGIONS.contains(&account.region.as_str()) {
        return Err(AppError::ValidationError("invalid region for Overwatch account".to_string()));
    }
    if !PLATFORMS.contains(&account.platform.as_str()) {
        return Err(AppError::ValidationError("invalid platform for Overwatch account".to_string()));
    }
    if account.battle_tag.trim().is_empty() {
        return Err(AppError::ValidationError("invalid Blizzard battle tag".to_string()));
    }
    Ok(account)
}

#[async_trait]
impl AccountValidator<OverwatchAccount> for BlizzardClient {
    async fn validate(&self, account: OverwatchAccount) -> AppResult<OverwatchAccount> {
        let account = normalize(account)?;

        let response = send(API, self.http.get(self.profile_url(&account))).await?;
        check_account_status(
            API,
            response.status(),
            "invalid Blizzard battle tag, platform or region",
        )?;

        Ok(account)
    }
}

#[async_trait]
impl PlaytimeFetcher<OverwatchAccount> for BlizzardClient {
    async fn fetch_playtime(&self, account: &OverwatchAccount) -> AppResult<Vec<Game>> {
        let url = self.profile_url(account);

        for attempt in 1..=MAX_ATTEMPTS {
            match self.query(&url).await? {
                Attempt::Complete(hours) => return Ok(vec![Game::new(GAME_NAME, hours)]),
                Attempt::Incomplete => {
                    log::debug!("ow-api 응답에 플레이 시간 없음, 재시도 {}/{}", attempt, MAX_ATTEMPTS);
                }
            }
        }

        log::warn!("ow-api {}회 시도 모두 실패: {}", MAX_ATTEMPTS, account.battle_tag);
        Err(AppError::upstream_unavailable(API, "no acceptable response from OW-api"))
    }
}
