use serde::{Deserialize, Serialize};
use super::LinkedAccount;

/// Overwatch(Battle.net) 계정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverwatchAccount {
    /// `Name#1234` 형식의 배틀태그
    pub battle_tag: String,
    pub platform: String,
    pub region: String,
}

impl LinkedAccount for OverwatchAccount {
    fn is_same_account(&self, stored: &Self) -> bool {
        self.battle_tag.eq_ignore_ascii_case(&stored.battle_tag)
            && self.platform.eq_ignore_ascii_case(&stored.platform)
            && self.region.eq_ignore_ascii_case(&stored.region)
    }
}
