//! Old School RuneScape 하이스코어
//!
//! 하이스코어는 JSON이 아니라 줄마다 `rank,level,xp`가 들어 있는 텍스트입니다.
//! 첫 줄은 전체 합계, 이후 23줄이 스킬별 값입니다. 플레이 시간은 스킬별 시간당
//! 평균 경험치로 나누어 추정합니다.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::config::ProviderConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::accounts::RunescapeAccount;
use crate::domain::entities::users::Game;
use super::status::{check_account_status, check_status, send, transport_error};
use super::{AccountValidator, PlaytimeFetcher};

const API: &str = "Jagex";
const GAME_NAME: &str = "Runescape";

static USERNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_ -]{1,12}$").expect("username pattern is valid")
});

/// 스킬별 시간당 평균 경험치. 인덱스는 하이스코어 줄 번호와 같고 0번(전체)은 사용하지 않습니다.
const XP_RATES: [i64; 24] = [
    0, 90000, 90000, 90000, 300000, 150000, 200000, 100000, 400000, 70000, 250000, 70000,
    200000, 150000, 250000, 60000, 200000, 44000, 100000, 50000, 100000, 50000, 120000, 400000,
];

/// 하이스코어 한 줄
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HiscoreLine {
    level: i64,
    xp: i64,
}

fn parse_line(line: &str) -> AppResult<HiscoreLine> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    if fields.len() != 3 {
        return Err(AppError::ValidationError(
            "wrong number of fields in RuneScape hiscores".to_string(),
        ));
    }

    let number = |raw: &str| {
        raw.trim().parse::<i64>().map_err(|_| {
            AppError::ValidationError(format!("non-numeric RuneScape hiscore field: {:?}", raw))
        })
    };

    Ok(HiscoreLine {
        level: number(fields[1])?,
        xp: number(fields[2])?,
    })
}

/// 하이스코어 본문으로 추정한 플레이 시간
pub fn hours_from_hiscores(body: &str) -> AppResult<i64> {
    let lines: Vec<&str> = body.lines().collect();
    if lines.len() < XP_RATES.len() {
        return Err(AppError::ValidationError(
            "wrong number of lines in RuneScape hiscores".to_string(),
        ));
    }

    (1..XP_RATES.len()).try_fold(0i64, |hours, skill| {
        // 순위 밖 스킬은 -1로 표시됩니다.
        let line = parse_line(lines[skill])?;
        Ok(hours + line.xp.max(0) / XP_RATES[skill])
    })
}

pub struct JagexClient {
    http: reqwest::Client,
    base_url: String,
}

impl JagexClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn from_env(http: reqwest::Client) -> Self {
        Self::new(http, ProviderConfig::runescape_hiscore_base())
    }

    fn hiscore_request(&self, account: &RunescapeAccount) -> reqwest::RequestBuilder {
        self.http
            .get(format!(
                "{}/m={}/index_lite.ws",
                self.base_url,
                account.account_type.hiscore_board()
            ))
            .query(&[("player", account.username.as_str())])
    }
}

fn check_username(username: &str) -> AppResult<()> {
    if USERNAME.is_match(username) {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!(
            "{} is not a valid RuneScape name",
            username
        )))
    }
}

#[async_trait]
impl AccountValidator<RunescapeAccount> for JagexClient {
    async fn validate(&self, mut account: RunescapeAccount) -> AppResult<RunescapeAccount> {
        check_username(&account.username)?;

        let response = send(API, self.hiscore_request(&account)).await?;
        check_account_status(API, response.status(), "invalid RuneScape account")?;

        let body = response.text().await.map_err(|e| transport_error(API, e))?;
        let overall = body
            .lines()
            .next()
            .ok_or_else(|| AppError::upstream_unavailable(API, "empty hiscore response"))
            .and_then(parse_line)?;

        account.total_level = overall.level;
        account.total_xp = overall.xp;
        Ok(account)
    }
}

#[async_trait]
impl PlaytimeFetcher<RunescapeAccount> for JagexClient {
    async fn fetch_playtime(&self, account: &RunescapeAccount) -> AppResult<Vec<Game>> {
        check_username(&account.username)?;

        let response = send(API, self.hiscore_request(account)).await?;
        check_status(API, response.status(), "invalid RuneScape account")?;

        let body = response.text().await.map_err(|e| transport_error(API, e))?;
        let hours = hours_from_hiscores(&body)?;
        log::debug!("RuneScape 플레이 시간 {}: {}시간", account.username, hours);

        Ok(vec![Game::new(GAME_NAME, hours)])
    }
}
