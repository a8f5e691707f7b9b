//! User Entity Implementation
//!
//! `users` 컬렉션에 저장되는 사용자 문서와 게임별 플레이 시간 레코드입니다.
//! 같은 구조가 Redis 캐시에도 JSON으로 저장됩니다.

use serde::{Deserialize, Serialize};
use crate::domain::entities::accounts::{
    OverwatchAccount, RunescapeAccount, SummonerRegistration, ValveAccount,
};

/// 사용자 엔티티 (집합 루트)
///
/// `id`는 첫 로그인 시 OAuth 제공자가 준 불변 식별자입니다.
/// `games`와 `total_game_time`은 새로고침 경로에서만 함께 갱신되며
/// 항상 `total_game_time == Σ games[i].time`을 만족합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    /// 소문자로 정규화된 고유 표시 이름
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub public: bool,
    /// 사용자 갱신 경로로는 절대 바뀌지 않는 관리자 플래그
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub total_game_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lol: Option<SummonerRegistration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwatch: Option<OverwatchAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valve: Option<ValveAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runescape: Option<RunescapeAccount>,
    #[serde(default)]
    pub games: Vec<Game>,
}

impl User {
    /// 식별자만 가진 빈 사용자
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// 게임 하나의 플레이 시간 레코드 (시간 단위)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    pub time: i64,
    /// Steam app id. 이름이 같은 Steam 게임을 구분하는 용도로만 쓰이며 외부로 노출하지 않습니다.
    #[serde(rename = "providerKey", default, skip_serializing_if = "Option::is_none")]
    pub provider_key: Option<String>,
}

impl Game {
    pub fn new(name: impl Into<String>, time: i64) -> Self {
        Self {
            name: name.into(),
            time,
            provider_key: None,
        }
    }

    pub fn with_provider_key(mut self, key: impl Into<String>) -> Self {
        self.provider_key = Some(key.into());
        self
    }
}

/// 게임 목록의 총 플레이 시간
pub fn total_time(games: &[Game]) -> i64 {
    games.iter().map(|game| game.time).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_bare() {
        let user = User::new("108123");

        assert_eq!(user.id, "108123");
        assert!(user.name.is_none());
        assert!(!user.admin);
        assert!(user.lol.is_none() && user.overwatch.is_none());
        assert!(user.valve.is_none() && user.runescape.is_none());
        assert!(user.games.is_empty());
    }

    #[test]
    fn test_stored_field_names() {
        let mut user = User::new("abc");
        user.total_game_time = 5;
        user.games.push(Game::new("Dota 2", 5).with_provider_key("570"));

        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["_id"], "abc");
        assert_eq!(json["totalGameTime"], 5);
        assert_eq!(json["games"][0]["providerKey"], "570");
        assert!(json.get("lol").is_none());
    }

    #[test]
    fn test_total_time_sums_all_entries() {
        let games = vec![Game::new("Overwatch", 3), Game::new("Runescape", 10), Game::new("LeagueOfLegends", 0)];
        assert_eq!(total_time(&games), 13);
        assert_eq!(total_time(&[]), 0);
    }
}
