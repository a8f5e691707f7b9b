//! # 사용자 프로필 서비스
//!
//! 프로필 재조정 엔진과 플레이 시간 새로고침을 담당하는 핵심 서비스입니다.
//!
//! ## 재조정 (`set_user`)
//!
//! ```text
//! 저장된 사용자 로드 (없으면 빈 사용자)
//!        │
//!        ▼
//! 이름 ─► lol ─► overwatch ─► valve ─► runescape     ← 고정 순서, 첫 실패에서 중단
//!        │         │ 저장된 계정과 다를 때만 외부 API 검증
//!        ▼
//! 이름 확보 + 필드 병합 저장 (검증이 모두 끝난 뒤 한 번)
//!        │
//!        ▼
//! 연결 계정이 바뀌었으면 플레이 시간 새로고침
//! ```
//!
//! ## 새로고침 (`update_games`)
//!
//! 연결된 모든 제공자를 동시에 조회하고, 하나라도 실패하면 아무것도 기록하지 않습니다.
//! 게임 목록은 Steam 항목들 뒤에 League, Overwatch, RuneScape 순으로 구성됩니다.
//!
//! 이 서비스는 저장소와 제공자를 trait 객체로 주입받으므로 `#[service]` 매크로 대신
//! `main`에서 직접 조립해 [`ServiceLocator`](crate::core::registry::ServiceLocator)에 등록합니다.

use std::sync::Arc;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::users::request::{is_valid_display_name, FieldUpdate, UpdateUserRequest, UserField},
        entities::accounts::LinkedAccount,
        entities::users::{total_time, Game, User},
    },
    providers::{AccountValidator, GameProviders, PlaytimeFetcher},
    repositories::users::{UserChanges, UserStore},
};

pub struct UserService {
    store: Arc<dyn UserStore>,
    providers: GameProviders,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, providers: GameProviders) -> Self {
        Self { store, providers }
    }

    pub async fn get_user_by_id(&self, id: &str) -> AppResult<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))
    }

    /// 공개 사용자만 이름으로 조회할 수 있습니다. 비공개 사용자는 없는 사용자와 같게 취급합니다.
    pub async fn get_user_by_name(&self, name: &str) -> AppResult<User> {
        self.store
            .find_by_name(&name.to_lowercase())
            .await?
            .filter(|user| user.public)
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))
    }

    pub async fn create_user_if_absent(&self, id: &str) -> AppResult<bool> {
        self.store.create_if_absent(id).await
    }

    pub async fn is_user(&self, id: &str) -> AppResult<bool> {
        self.store.exists(id).await
    }

    /// 부분 프로필을 검증하고 저장합니다.
    ///
    /// 반환값은 플레이 시간 새로고침을 수행했는지 여부입니다.
    pub async fn set_user(&self, id: &str, request: UpdateUserRequest) -> AppResult<bool> {
        let stored = self
            .store
            .find_by_id(id)
            .await?
            .unwrap_or_else(|| User::new(id));

        let name = self.reconcile_name(id, &stored, request.requested_name()).await?;

        let mut refresh = false;
        let changes = UserChanges {
            public: request.public,
            lol: reconcile_account(request.lol, &stored.lol, self.providers.lol.as_ref(), &mut refresh).await?,
            overwatch: reconcile_account(request.overwatch, &stored.overwatch, self.providers.overwatch.as_ref(), &mut refresh).await?,
            valve: reconcile_account(request.valve, &stored.valve, self.providers.valve.as_ref(), &mut refresh).await?,
            runescape: reconcile_account(request.runescape, &stored.runescape, self.providers.runescape.as_ref(), &mut refresh).await?,
        };

        if let Some(name) = &name {
            self.store.claim_name(id, name).await?;
        }
        self.store.merge_fields(id, &changes).await?;
        log::info!("프로필 저장: {} (새로고침: {})", id, refresh);

        if refresh {
            self.update_games(id).await?;
        }
        Ok(refresh)
    }

    /// 바꿔야 할 이름을 돌려줍니다. 저장된 이름과 같으면 `None`입니다.
    async fn reconcile_name(&self, id: &str, stored: &User, requested: Option<&str>) -> AppResult<Option<String>> {
        let Some(requested) = requested else {
            return Ok(None);
        };

        if !is_valid_display_name(requested) {
            return Err(AppError::ValidationError("invalid username".to_string()));
        }

        let name = requested.to_lowercase();
        if stored.name.as_deref() == Some(name.as_str()) {
            return Ok(None);
        }

        if let Some(holder) = self.store.find_by_name(&name).await? {
            if holder.id != id {
                return Err(AppError::ConflictError("username already taken".to_string()));
            }
        }
        Ok(Some(name))
    }

    /// 연결된 모든 제공자에서 플레이 시간을 다시 읽어 게임 목록을 재구성합니다.
    pub async fn update_games(&self, id: &str) -> AppResult<Vec<Game>> {
        let user = self.get_user_by_id(id).await?;

        let (valve, lol, overwatch, runescape) = futures_util::try_join!(
            fetch_linked(self.providers.valve.as_ref(), user.valve.as_ref()),
            fetch_linked(self.providers.lol.as_ref(), user.lol.as_ref()),
            fetch_linked(self.providers.overwatch.as_ref(), user.overwatch.as_ref()),
            fetch_linked(self.providers.runescape.as_ref(), user.runescape.as_ref()),
        )?;

        let games: Vec<Game> = [valve, lol, overwatch, runescape].into_iter().flatten().collect();
        self.store.set_games(id, &games).await?;

        log::info!("플레이 시간 갱신: {} ({}개 게임, {}시간)", id, games.len(), total_time(&games));
        Ok(games)
    }

    /// 필드 목록이 비어 있으면 사용자 전체를, 아니면 지정한 필드만 삭제합니다.
    pub async fn delete_user(&self, id: &str, fields: &[UserField]) -> AppResult<()> {
        if fields.is_empty() {
            return self.store.delete(id).await;
        }

        self.store.delete_fields(id, fields).await?;
        if fields.iter().any(UserField::is_linked_account) {
            self.update_games(id).await?;
        }
        Ok(())
    }

    pub async fn update_riot_api_key(&self, caller_id: &str, key: &str) -> AppResult<()> {
        let caller = self.get_user_by_id(caller_id).await?;
        if !caller.admin {
            log::warn!("관리자가 아닌 사용자의 키 교체 시도: {}", caller_id);
            return Err(AppError::AuthorizationError("admin privileges required".to_string()));
        }

        self.providers.lol_key.update_key(key).await
    }
}

/// 연결 계정 필드 하나를 재조정합니다.
///
/// - 요청 없음: 그대로
/// - 해제: 연결되어 있었다면 삭제하고 새로고침 표시
/// - 값: 저장된 계정과 같으면 그대로, 다르면 검증 후 채택하고 새로고침 표시
async fn reconcile_account<A, V>(
    update: FieldUpdate<A>,
    stored: &Option<A>,
    validator: &V,
    refresh: &mut bool,
) -> AppResult<FieldUpdate<A>>
where
    A: LinkedAccount,
    V: AccountValidator<A> + ?Sized,
{
    match update {
        FieldUpdate::Unchanged => Ok(FieldUpdate::Unchanged),
        FieldUpdate::Clear if stored.is_none() => Ok(FieldUpdate::Unchanged),
        FieldUpdate::Clear => {
            *refresh = true;
            Ok(FieldUpdate::Clear)
        }
        FieldUpdate::Set(account) => match stored {
            Some(current) if account.is_same_account(current) => Ok(FieldUpdate::Unchanged),
            _ => {
                let validated = validator.validate(account).await?;
                *refresh = true;
                Ok(FieldUpdate::Set(validated))
            }
        },
    }
}

async fn fetch_linked<A, F>(fetcher: &F, account: Option<&A>) -> AppResult<Vec<Game>>
where
    A: LinkedAccount,
    F: PlaytimeFetcher<A> + ?Sized,
{
    match account {
        Some(account) => fetcher.fetch_playtime(account).await,
        None => Ok(Vec::new()),
    }
}
