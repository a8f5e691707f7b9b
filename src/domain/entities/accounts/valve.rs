use serde::{Deserialize, Serialize};
use super::LinkedAccount;

/// Steam 계정
///
/// 64비트 Steam ID나 커스텀 URL 사용자명 중 하나로 연결합니다. 사용자명으로
/// 연결한 경우 검증 과정에서 ID가 채워집니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValveAccount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl ValveAccount {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            username: None,
        }
    }

    /// 비어 있지 않은 Steam ID
    pub fn steam_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn vanity_name(&self) -> Option<&str> {
        self.username.as_deref().filter(|name| !name.is_empty())
    }
}

impl LinkedAccount for ValveAccount {
    fn is_same_account(&self, stored: &Self) -> bool {
        match (self.steam_id(), self.vanity_name()) {
            (Some(id), _) => stored.steam_id() == Some(id),
            (None, Some(name)) => stored
                .vanity_name()
                .is_some_and(|stored_name| stored_name.eq_ignore_ascii_case(name)),
            (None, None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vanity(username: &str) -> ValveAccount {
        ValveAccount { username: Some(username.to_string()), ..Default::default() }
    }

    #[test]
    fn test_id_takes_precedence_over_username() {
        let stored = ValveAccount {
            id: Some("76561197960287930".to_string()),
            username: Some("gabe".to_string()),
        };

        assert!(ValveAccount::with_id("76561197960287930").is_same_account(&stored));
        assert!(vanity("GABE").is_same_account(&stored));
        assert!(!ValveAccount::with_id("76561197960287931").is_same_account(&stored));
    }

    #[test]
    fn test_empty_account_never_matches() {
        let stored = ValveAccount::with_id("76561197960287930");
        let empty = ValveAccount {
            id: Some(String::new()),
            username: None,
        };

        assert!(!empty.is_same_account(&stored));
    }
}
