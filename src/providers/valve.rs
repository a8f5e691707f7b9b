//! Steam Web API
//!
//! 계정은 64비트 Steam ID 또는 커스텀 URL 이름으로 연결합니다. 라이브러리를
//! 읽으려면 프로필이 공개 상태여야 하므로 검증 경로는 항상 공개 여부까지 확인합니다.

use async_trait::async_trait;
use serde::Deserialize;
use crate::config::ProviderConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::accounts::ValveAccount;
use crate::domain::entities::users::Game;
use super::status::{check_account_status, check_status, read_json, send};
use super::{AccountValidator, PlaytimeFetcher};

const API: &str = "Valve";

/// 개인 계정 Steam ID의 공통 접두사
const STEAM_ID_PREFIX: &str = "7656119";

/// `communityvisibilitystate` 공개 값
const VISIBILITY_PUBLIC: i32 = 3;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Debug, Deserialize)]
struct VanityResolution {
    #[serde(default)]
    steamid: Option<String>,
    success: i32,
}

#[derive(Debug, Deserialize)]
struct PlayerSummaries {
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

#[derive(Debug, Deserialize)]
struct PlayerSummary {
    #[serde(rename = "communityvisibilitystate")]
    visibility: i32,
}

#[derive(Debug, Deserialize)]
struct OwnedGames {
    #[serde(default)]
    games: Vec<OwnedGame>,
}

#[derive(Debug, Deserialize)]
struct OwnedGame {
    appid: u64,
    #[serde(default)]
    name: String,
    /// 분 단위
    #[serde(default)]
    playtime_forever: i64,
}

pub struct ValveClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ValveClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_env(http: reqwest::Client) -> AppResult<Self> {
        Ok(Self::new(http, ProviderConfig::steam_api_base(), ProviderConfig::valve_api_key()?))
    }

    async fn owned_games(&self, steam_id: &str) -> AppResult<reqwest::Response> {
        let request = self
            .http
            .get(format!("{}/IPlayerService/GetOwnedGames/v0001/", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("format", "json"),
                ("steamid", steam_id),
                ("include_appinfo", "true"),
            ]);
        send(API, request).await
    }

    async fn resolve_vanity_name(&self, name: &str) -> AppResult<String> {
        let request = self
            .http
            .get(format!("{}/ISteamUser/ResolveVanityURL/v0001/", self.base_url))
            .query(&[("key", self.api_key.as_str()), ("vanityurl", name)]);
        let response = send(API, request).await?;
        check_status(API, response.status(), "invalid steam username")?;

        let resolved: Envelope<VanityResolution> = read_json(API, response).await?;
        match resolved.response.steamid {
            Some(id) if resolved.response.success == 1 && id.starts_with(STEAM_ID_PREFIX) => Ok(id),
            _ => Err(AppError::upstream_rejected(API, "invalid steam account")),
        }
    }

    async fn ensure_public_profile(&self, steam_id: &str) -> AppResult<()> {
        let request = self
            .http
            .get(format!("{}/ISteamUser/GetPlayerSummaries/v0002/", self.base_url))
            .query(&[("key", self.api_key.as_str()), ("steamids", steam_id)]);
        let response = send(API, request).await?;
        check_account_status(API, response.status(), "invalid steam account")?;

        let summaries: Envelope<PlayerSummaries> = read_json(API, response).await?;
        match summaries.response.players.first() {
            Some(player) if player.visibility == VISIBILITY_PUBLIC => Ok(()),
            Some(_) => Err(AppError::upstream_rejected(API, "private steam account")),
            None => Err(AppError::upstream_rejected(API, "invalid steam account")),
        }
    }
}

#[async_trait]
impl AccountValidator<ValveAccount> for ValveClient {
    async fn validate(&self, account: ValveAccount) -> AppResult<ValveAccount> {
        if let Some(id) = account.steam_id() {
            if !id.starts_with(STEAM_ID_PREFIX) {
                return Err(AppError::ValidationError("invalid steam id".to_string()));
            }

            let response = self.owned_games(id).await?;
            check_account_status(API, response.status(), "invalid steam id")?;
            self.ensure_public_profile(id).await?;

            return Ok(ValveAccount::with_id(id));
        }

        if let Some(name) = account.vanity_name() {
            let id = self.resolve_vanity_name(name).await?;
            self.ensure_public_profile(&id).await?;

            return Ok(ValveAccount {
                id: Some(id),
                username: Some(name.to_string()),
            });
        }

        Err(AppError::ValidationError("invalid steam account".to_string()))
    }
}

#[async_trait]
impl PlaytimeFetcher<ValveAccount> for ValveClient {
    async fn fetch_playtime(&self, account: &ValveAccount) -> AppResult<Vec<Game>> {
        let id = account
            .steam_id()
            .ok_or_else(|| AppError::ValidationError("invalid steam id".to_string()))?;

        let response = self.owned_games(id).await?;
        check_status(API, response.status(), "invalid steam id")?;

        let owned: Envelope<OwnedGames> = read_json(API, response).await?;
        Ok(owned
            .response
            .games
            .into_iter()
            .filter_map(|game| {
                let hours = game.playtime_forever / 60;
                (hours != 0).then(|| Game::new(game.name, hours).with_provider_key(game.appid.to_string()))
            })
            .collect())
    }
}
