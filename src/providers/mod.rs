//! # Game API Providers
//!
//! 게임사 공개 API 클라이언트 모음입니다. 코어 로직은 구체 타입이 아니라
//! 능력 단위 trait에만 의존합니다.
//!
//! | trait | 역할 |
//! |-------|------|
//! | [`AccountValidator`] | 연결 요청된 계정을 외부 API로 확인하고 정규화 |
//! | [`PlaytimeFetcher`] | 연결된 계정의 플레이 시간 조회 (시간 단위) |
//! | [`ApiKeyUpdater`] | 런타임 API 키 교체 |
//!
//! ## 제공자
//!
//! - [`riot::RiotClient`] - League of Legends
//! - [`blizzard::BlizzardClient`] - Overwatch (ow-api 경유)
//! - [`valve::ValveClient`] - Steam
//! - [`jagex::JagexClient`] - Old School RuneScape 하이스코어
//!
//! 모든 클라이언트는 하나의 `reqwest::Client`를 공유하며 요청 타임아웃은
//! `CLIENT_TIMEOUT_SECS`를 따릅니다.

pub mod status;
pub mod credentials;
pub mod riot;
pub mod blizzard;
pub mod valve;
pub mod jagex;

use std::sync::Arc;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use crate::config::ProviderConfig;
use crate::core::errors::{AppResult, ErrorContext};
use crate::domain::entities::accounts::{
    LinkedAccount, OverwatchAccount, RunescapeAccount, SummonerRegistration, ValveAccount,
};
use crate::domain::entities::users::Game;

pub use blizzard::BlizzardClient;
pub use credentials::ApiKeyHolder;
pub use jagex::JagexClient;
pub use riot::RiotClient;
pub use valve::ValveClient;

/// 연결 요청된 계정 검증
///
/// 성공하면 제공자가 채운 값(계정 ID, 정규화된 지역 등)이 반영된 레코드를 돌려줍니다.
#[async_trait]
pub trait AccountValidator<A: LinkedAccount>: Send + Sync {
    async fn validate(&self, account: A) -> AppResult<A>;
}

/// 연결된 계정의 플레이 시간 조회
///
/// Steam은 여러 개, 나머지 제공자는 정확히 하나의 레코드를 돌려줍니다.
#[async_trait]
pub trait PlaytimeFetcher<A: LinkedAccount>: Send + Sync {
    async fn fetch_playtime(&self, account: &A) -> AppResult<Vec<Game>>;
}

/// 검증과 조회를 모두 제공하는 게임 제공자
pub trait GameProvider<A: LinkedAccount>: AccountValidator<A> + PlaytimeFetcher<A> {}

impl<A, T> GameProvider<A> for T
where
    A: LinkedAccount,
    T: AccountValidator<A> + PlaytimeFetcher<A>,
{
}

#[async_trait]
pub trait ApiKeyUpdater: Send + Sync {
    async fn update_key(&self, key: &str) -> AppResult<()>;
}

/// 사용자 서비스에 주입되는 제공자 묶음
#[derive(Clone)]
pub struct GameProviders {
    pub lol: Arc<dyn GameProvider<SummonerRegistration>>,
    pub overwatch: Arc<dyn GameProvider<OverwatchAccount>>,
    pub valve: Arc<dyn GameProvider<ValveAccount>>,
    pub runescape: Arc<dyn GameProvider<RunescapeAccount>>,
    pub lol_key: Arc<dyn ApiKeyUpdater>,
}

impl GameProviders {
    /// 환경 설정으로 실제 클라이언트를 구성합니다.
    pub fn from_env() -> AppResult<Self> {
        let http = shared_http_client()?;
        let riot = Arc::new(RiotClient::from_env(http.clone())?);

        Ok(Self {
            lol: riot.clone(),
            overwatch: Arc::new(BlizzardClient::from_env(http.clone())),
            valve: Arc::new(ValveClient::from_env(http.clone())?),
            runescape: Arc::new(JagexClient::from_env(http)),
            lol_key: riot,
        })
    }
}

static HTTP_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

/// 게임 API와 Google OAuth 호출이 공유하는 HTTP 클라이언트
///
/// 처음 호출할 때 한 번 만들고, 이후에는 같은 연결 풀을 가리키는 복제본을 돌려줍니다.
pub fn shared_http_client() -> AppResult<reqwest::Client> {
    HTTP_CLIENT.get_or_try_init(build_http_client).cloned()
}

/// 설정된 타임아웃을 적용한 HTTP 클라이언트
fn build_http_client() -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(ProviderConfig::client_timeout())
        .user_agent(concat!("game_time_backend/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("HTTP 클라이언트 생성 실패")
}
