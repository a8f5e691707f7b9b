use serde::{Deserialize, Serialize};
use crate::domain::entities::accounts::{
    OverwatchAccount, RunescapeAccount, SummonerRegistration, ValveAccount,
};
use crate::domain::entities::users::{Game, User};

fn is_false(value: &bool) -> bool {
    !*value
}

/// 외부에 노출되는 사용자 프로필
///
/// `id`, `admin`, Steam app id는 포함하지 않습니다. 게임은 플레이 시간이 긴
/// 순서로 정렬됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub public: bool,
    pub total_play_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lol: Option<SummonerRegistration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwatch: Option<OverwatchAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valve: Option<ValveAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runescape: Option<RunescapeAccount>,
    pub games: Vec<GameResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResponse {
    #[serde(rename = "game")]
    pub name: String,
    #[serde(rename = "playTime")]
    pub play_time: i64,
}

impl From<Game> for GameResponse {
    fn from(game: Game) -> Self {
        Self {
            name: game.name,
            play_time: game.time,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            name,
            public,
            total_game_time,
            lol,
            overwatch,
            valve,
            runescape,
            mut games,
            ..
        } = user;

        games.sort_by(|a, b| b.time.cmp(&a.time));

        Self {
            name,
            public,
            total_play_time: total_game_time,
            lol,
            overwatch,
            valve,
            runescape,
            games: games.into_iter().map(GameResponse::from).collect(),
        }
    }
}

impl UserResponse {
    /// 이름으로 조회한 다른 사용자의 프로필
    ///
    /// 공개 프로필만 조회되므로 `public` 플래그는 응답에서 생략합니다.
    pub fn public_view(user: User) -> Self {
        Self {
            public: false,
            ..Self::from(user)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let mut user = User::new("secret-id");
        user.name = Some("johan".to_string());
        user.public = true;
        user.admin = true;
        user.total_game_time = 15;
        user.games = vec![
            Game::new("Runescape", 5),
            Game::new("Dota 2", 10).with_provider_key("570"),
        ];
        user
    }

    #[test]
    fn test_private_fields_are_hidden() {
        let json = serde_json::to_value(UserResponse::from(sample_user())).unwrap();

        assert!(json.get("id").is_none());
        assert!(json.get("_id").is_none());
        assert!(json.get("admin").is_none());
        assert!(json["games"][0].get("providerKey").is_none());
        assert_eq!(json["totalPlayTime"], 15);
        assert_eq!(json["public"], true);
    }

    #[test]
    fn test_games_sorted_by_play_time() {
        let response = UserResponse::from(sample_user());

        assert_eq!(response.games[0], GameResponse { name: "Dota 2".to_string(), play_time: 10 });
        assert_eq!(response.games[1].name, "Runescape");
    }

    #[test]
    fn test_public_view_omits_flag() {
        let json = serde_json::to_value(UserResponse::public_view(sample_user())).unwrap();
        assert!(json.get("public").is_none());
    }
}
