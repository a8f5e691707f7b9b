//! # 사용자 리포지토리 구현
//!
//! `users` 컬렉션에 대한 [`UserStore`] 구현입니다. MongoDB를 주 저장소로,
//! Redis를 `find_by_id` 읽기 캐시로 사용합니다.
//!
//! ## 캐시 정책
//!
//! - 키: `user_repository:{id}` (`#[repository]` 매크로의 `cache_key`)
//! - TTL: `USER_CACHE_TTL_SECS` (기본 600초)
//! - 모든 쓰기 경로는 해당 사용자의 캐시 항목을 무효화합니다.
//! - 캐시 에러는 요청을 실패시키지 않습니다.
//!
//! ## 문서 형태
//!
//! ```json
//! {
//!   "_id": "108123...",
//!   "name": "johan",
//!   "public": true,
//!   "admin": false,
//!   "totalGameTime": 130,
//!   "lol": { "summonerName": "Loper", "summonerRegion": "EUW1", "accountId": "..." },
//!   "games": [ { "name": "Dota 2", "time": 100, "providerKey": "570" } ]
//! }
//! ```

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    IndexModel,
};
use serde::Serialize;
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    config::CacheConfig,
    core::errors::{AppError, AppResult},
    core::registry::Repository,
    db::Database,
    domain::dto::users::request::{FieldUpdate, UserField},
    domain::entities::users::{total_time, Game, User},
};
use super::{UserChanges, UserStore};

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY: i32 = 11000;

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// 이름 고유 인덱스를 만듭니다.
    ///
    /// 이름이 없는 문서가 여럿 있을 수 있으므로 문자열 값에만 적용되는 부분 인덱스입니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("name_unique".to_string())
                .partial_filter_expression(doc! { "name": { "$type": "string" } })
                .build())
            .build();

        self.collection::<User>()
            .create_indexes([name_index])
            .await
            .map_err(db_error)?;

        log::info!("users 컬렉션 인덱스 확인 완료");
        Ok(())
    }

    async fn evict(&self, id: &str) {
        let _ = self.invalidate_cache(id).await;
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let cache_key = self.cache_key(id);

        match self.redis.get::<User>(&cache_key).await {
            Ok(Some(cached)) => return Ok(Some(cached)),
            Ok(None) => {}
            Err(e) => log::debug!("사용자 캐시 조회 실패 {}: {}", id, e),
        }

        let user = self.collection::<User>()
            .find_one(doc! { "_id": id })
            .await
            .map_err(db_error)?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, CacheConfig::user_cache_ttl_secs())
                .await;
        }

        Ok(user)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<User>> {
        let mut matches: Vec<User> = self.collection::<User>()
            .find(doc! { "name": name.to_lowercase() })
            .limit(2)
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)?;

        if matches.len() > 1 {
            log::error!("이름 {:?}을 가진 사용자가 둘 이상입니다", name);
            return Err(AppError::InternalError(format!("multiple users named {}", name)));
        }

        Ok(matches.pop())
    }

    async fn create_if_absent(&self, id: &str) -> AppResult<bool> {
        let result = self.collection::<User>()
            .update_one(
                doc! { "_id": id },
                doc! { "$setOnInsert": {
                    "public": false,
                    "admin": false,
                    "totalGameTime": 0i64,
                    "games": [],
                } },
            )
            .upsert(true)
            .await
            .map_err(db_error)?;

        let created = result.upserted_id.is_some();
        if created {
            log::info!("새 사용자 생성: {}", id);
        }
        Ok(created)
    }

    async fn merge_fields(&self, id: &str, changes: &UserChanges) -> AppResult<()> {
        let update = merge_document(changes)?;
        if update.is_empty() {
            return Ok(());
        }

        self.collection::<User>()
            .update_one(doc! { "_id": id }, update)
            .upsert(true)
            .await
            .map_err(db_error)?;

        self.evict(id).await;
        Ok(())
    }

    async fn set_games(&self, id: &str, games: &[Game]) -> AppResult<()> {
        let games_bson = to_bson(&games)?;

        let result = self.collection::<User>()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "games": games_bson, "totalGameTime": total_time(games) } },
            )
            .await
            .map_err(db_error)?;

        self.evict(id).await;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("user {}", id)));
        }
        Ok(())
    }

    async fn claim_name(&self, id: &str, name: &str) -> AppResult<()> {
        let name = name.to_lowercase();

        if let Some(holder) = self.find_by_name(&name).await? {
            if holder.id != id {
                return Err(name_taken());
            }
        }

        self.collection::<User>()
            .update_one(doc! { "_id": id }, doc! { "$set": { "name": name.as_str() } })
            .upsert(true)
            .await
            .map_err(|e| if is_duplicate_key(&e) { name_taken() } else { db_error(e) })?;

        self.evict(id).await;
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection::<User>()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(db_error)?;

        self.evict(id).await;
        log::info!("사용자 삭제: {} ({}건)", id, result.deleted_count);
        Ok(())
    }

    async fn delete_fields(&self, id: &str, fields: &[UserField]) -> AppResult<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let unset: Document = fields.iter().map(|field| (field.key().to_string(), bson::Bson::from(""))).collect();

        self.collection::<User>()
            .update_one(doc! { "_id": id }, doc! { "$unset": unset })
            .await
            .map_err(db_error)?;

        self.evict(id).await;
        Ok(())
    }
}

/// `UserChanges`를 `$set`/`$unset` 갱신 문서로 변환합니다. 변경이 없으면 빈 문서입니다.
fn merge_document(changes: &UserChanges) -> AppResult<Document> {
    let mut set = Document::new();
    let mut unset = Document::new();

    if let Some(public) = changes.public {
        set.insert("public", public);
    }
    stage("lol", &changes.lol, &mut set, &mut unset)?;
    stage("overwatch", &changes.overwatch, &mut set, &mut unset)?;
    stage("valve", &changes.valve, &mut set, &mut unset)?;
    stage("runescape", &changes.runescape, &mut set, &mut unset)?;

    let mut update = Document::new();
    if !set.is_empty() {
        update.insert("$set", set);
    }
    if !unset.is_empty() {
        update.insert("$unset", unset);
    }
    Ok(update)
}

fn stage<T: Serialize>(
    key: &str,
    field: &FieldUpdate<T>,
    set: &mut Document,
    unset: &mut Document,
) -> AppResult<()> {
    match field {
        FieldUpdate::Unchanged => {}
        FieldUpdate::Clear => {
            unset.insert(key, "");
        }
        FieldUpdate::Set(value) => {
            set.insert(key, to_bson(value)?);
        }
    }
    Ok(())
}

fn to_bson<T: Serialize>(value: &T) -> AppResult<bson::Bson> {
    bson::to_bson(value).map_err(|e| AppError::InternalError(format!("BSON 변환 실패: {}", e)))
}

fn db_error(e: mongodb::error::Error) -> AppError {
    AppError::DatabaseError(e.to_string())
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

fn name_taken() -> AppError {
    AppError::ConflictError("username already taken".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::accounts::{OverwatchAccount, SummonerRegistration};

    #[test]
    fn test_empty_changes_produce_no_update() {
        assert!(merge_document(&UserChanges::default()).unwrap().is_empty());
    }

    #[test]
    fn test_set_and_clear_are_split() {
        let changes = UserChanges {
            public: Some(true),
            lol: FieldUpdate::Set(SummonerRegistration::new("Loper", "EUW1")),
            overwatch: FieldUpdate::<OverwatchAccount>::Clear,
            ..Default::default()
        };

        let update = merge_document(&changes).unwrap();
        let set = update.get_document("$set").unwrap();
        let unset = update.get_document("$unset").unwrap();

        assert_eq!(set.get_bool("public").unwrap(), true);
        assert_eq!(
            set.get_document("lol").unwrap().get_str("summonerName").unwrap(),
            "Loper"
        );
        assert!(unset.contains_key("overwatch"));
        assert!(!set.contains_key("valve") && !unset.contains_key("valve"));
        assert!(!set.contains_key("games") && !set.contains_key("admin"));
    }
}
