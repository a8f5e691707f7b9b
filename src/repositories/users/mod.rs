//! 사용자 저장소
//!
//! [`UserStore`]는 사용자 서비스가 의존하는 저장소 계약이고,
//! [`UserRepository`](user_repo::UserRepository)가 MongoDB + Redis로 이를 구현합니다.
//! 서비스 테스트는 같은 trait의 메모리 구현을 사용합니다.
//!
//! ```rust,ignore
//! use crate::repositories::users::{UserStore, user_repo::UserRepository};
//!
//! let store: Arc<dyn UserStore> = UserRepository::instance();
//! let user = store.find_by_id("108123").await?;
//! ```

pub mod user_repo;

use async_trait::async_trait;
use crate::core::errors::AppResult;
use crate::domain::dto::users::request::{FieldUpdate, UserField};
use crate::domain::entities::accounts::{
    OverwatchAccount, RunescapeAccount, SummonerRegistration, ValveAccount,
};
use crate::domain::entities::users::{Game, User};

pub use user_repo::UserRepository;

/// 필드 단위 병합 갱신
///
/// `Unchanged` 필드는 저장소에 전달되지 않고, `Clear`는 필드 삭제,
/// `Set`은 덮어쓰기입니다. `games`/`totalGameTime`/`admin`은 표현할 수 없습니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub public: Option<bool>,
    pub lol: FieldUpdate<SummonerRegistration>,
    pub overwatch: FieldUpdate<OverwatchAccount>,
    pub valve: FieldUpdate<ValveAccount>,
    pub runescape: FieldUpdate<RunescapeAccount>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.public.is_none()
            && self.lol.is_unchanged()
            && self.overwatch.is_unchanged()
            && self.valve.is_unchanged()
            && self.runescape.is_unchanged()
    }

    /// 변경 내용을 메모리 상의 사용자에 적용합니다.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(public) = self.public {
            user.public = public;
        }
        self.lol.apply_to(&mut user.lol);
        self.overwatch.apply_to(&mut user.overwatch);
        self.valve.apply_to(&mut user.valve);
        self.runescape.apply_to(&mut user.runescape);
    }
}

/// 사용자 문서 저장소 계약
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// 소문자로 정규화된 이름으로 조회합니다. 일치하는 문서가 둘 이상이면 내부 에러입니다.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<User>>;

    /// 없을 때만 빈 사용자를 만듭니다. 새로 만들었으면 `true`.
    async fn create_if_absent(&self, id: &str) -> AppResult<bool>;

    /// 지정된 필드만 병합합니다. 문서가 없으면 만듭니다.
    async fn merge_fields(&self, id: &str, changes: &UserChanges) -> AppResult<()>;

    /// 게임 목록과 총 플레이 시간을 한 번에 기록합니다.
    async fn set_games(&self, id: &str, games: &[Game]) -> AppResult<()>;

    /// 다른 사용자가 쓰는 이름이면 `ConflictError`입니다.
    async fn claim_name(&self, id: &str, name: &str) -> AppResult<()>;

    async fn delete(&self, id: &str) -> AppResult<()>;

    async fn delete_fields(&self, id: &str, fields: &[UserField]) -> AppResult<()>;

    async fn exists(&self, id: &str) -> AppResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
