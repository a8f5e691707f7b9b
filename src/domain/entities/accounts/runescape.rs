use serde::{Deserialize, Serialize};
use super::LinkedAccount;

/// Old School RuneScape 계정 종류
///
/// 종류마다 별도의 하이스코어 보드가 있습니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunescapeAccountType {
    #[default]
    Normal,
    Ironman,
    HardcoreIronman,
    UltimateIronman,
}

impl RunescapeAccountType {
    /// 하이스코어 경로 세그먼트 (`m=...`)
    pub fn hiscore_board(&self) -> &'static str {
        match self {
            RunescapeAccountType::Normal => "hiscore_oldschool",
            RunescapeAccountType::Ironman => "hiscore_oldschool_ironman",
            RunescapeAccountType::HardcoreIronman => "hiscore_oldschool_hardcore_ironman",
            RunescapeAccountType::UltimateIronman => "hiscore_oldschool_ultimate",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunescapeAccount {
    pub username: String,
    #[serde(default)]
    pub account_type: RunescapeAccountType,
    /// 검증 시 하이스코어의 전체 줄에서 채워집니다.
    #[serde(default)]
    pub total_level: i64,
    #[serde(rename = "totalXP", default)]
    pub total_xp: i64,
}

impl RunescapeAccount {
    pub fn new(username: impl Into<String>, account_type: RunescapeAccountType) -> Self {
        Self {
            username: username.into(),
            account_type,
            total_level: 0,
            total_xp: 0,
        }
    }
}

impl LinkedAccount for RunescapeAccount {
    fn is_same_account(&self, stored: &Self) -> bool {
        self.username.eq_ignore_ascii_case(&stored.username) && self.account_type == stored.account_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_wire_format() {
        let account: RunescapeAccount =
            serde_json::from_str(r#"{"username":"Zezima","accountType":"hardcore_ironman"}"#).unwrap();

        assert_eq!(account.account_type, RunescapeAccountType::HardcoreIronman);
        assert_eq!(account.account_type.hiscore_board(), "hiscore_oldschool_hardcore_ironman");
    }

    #[test]
    fn test_account_type_defaults_to_normal() {
        let account: RunescapeAccount = serde_json::from_str(r#"{"username":"Zezima"}"#).unwrap();
        assert_eq!(account.account_type, RunescapeAccountType::Normal);
    }

    #[test]
    fn test_type_change_is_a_different_account() {
        let stored = RunescapeAccount::new("Zezima", RunescapeAccountType::Normal);

        assert!(RunescapeAccount::new("zezima", RunescapeAccountType::Normal).is_same_account(&stored));
        assert!(!RunescapeAccount::new("zezima", RunescapeAccountType::Ironman).is_same_account(&stored));
    }
}
