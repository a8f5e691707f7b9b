//! 연결 계정 엔티티
//!
//! 사용자는 게임 제공자마다 최대 하나의 계정을 연결할 수 있습니다. 각 레코드는
//! 해당 API를 호출하는 데 필요한 값(지역, 이름, ID 등)과 검증 과정에서 제공자만
//! 채울 수 있는 값(예: Riot `accountId`)을 함께 가집니다.
//!
//! 같은 계정인지의 판단은 레코드마다 다르므로 [`LinkedAccount::is_same_account`]로
//! 제공자별 동등성을 정의합니다. 재조정 엔진은 이 판단이 거짓일 때만
//! 외부 API로 재검증합니다.

pub mod summoner;
pub mod overwatch;
pub mod valve;
pub mod runescape;

pub use summoner::SummonerRegistration;
pub use overwatch::OverwatchAccount;
pub use valve::ValveAccount;
pub use runescape::{RunescapeAccount, RunescapeAccountType};

/// 사용자 문서의 연결 계정 필드
pub trait LinkedAccount: Clone + Send + Sync + 'static {
    /// 저장된 레코드와 같은 외부 계정을 가리키는지 여부
    fn is_same_account(&self, stored: &Self) -> bool;
}
