use serde::{Deserialize, Serialize};
use super::LinkedAccount;

/// League of Legends 소환사 등록 정보
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerRegistration {
    pub summoner_name: String,
    pub summoner_region: String,
    /// 검증 시 Riot API가 돌려준 계정 ID. 플레이 시간 조회에 필요합니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl SummonerRegistration {
    pub fn new(summoner_name: impl Into<String>, summoner_region: impl Into<String>) -> Self {
        Self {
            summoner_name: summoner_name.into(),
            summoner_region: summoner_region.into(),
            account_id: None,
        }
    }
}

impl LinkedAccount for SummonerRegistration {
    fn is_same_account(&self, stored: &Self) -> bool {
        self.summoner_name.eq_ignore_ascii_case(&stored.summoner_name)
            && self.summoner_region.eq_ignore_ascii_case(&stored.summoner_region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_summoner_ignores_case_and_account_id() {
        let mut stored = SummonerRegistration::new("Loper", "EUW1");
        stored.account_id = Some("acc-1".to_string());

        assert!(SummonerRegistration::new("loper", "euw1").is_same_account(&stored));
        assert!(!SummonerRegistration::new("loper", "NA1").is_same_account(&stored));
    }

    #[test]
    fn test_camel_case_wire_names() {
        let reg: SummonerRegistration =
            serde_json::from_str(r#"{"summonerName":"Loper","summonerRegion":"EUW1"}"#).unwrap();

        assert_eq!(reg.summoner_name, "Loper");
        assert!(reg.account_id.is_none());
    }
}
