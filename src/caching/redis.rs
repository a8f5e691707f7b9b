//! # Redis 캐시 클라이언트 구현
//!
//! 사용자 문서를 JSON으로 직렬화해 보관하는 읽기 캐시입니다.
//! 캐시는 언제나 보조 수단이므로 호출자는 여기서 나온 에러로 요청을
//! 실패시키지 않고 저장소로 바로 넘어갑니다.
//!
//! ## 연결 관리
//!
//! 매 호출마다 멀티플렉싱 연결을 얻어 단일 TCP 연결에서 여러 동시 요청을
//! 처리합니다.

use redis::{AsyncCommands, Client, RedisError};
use serde::{Serialize, de::DeserializeOwned};
use log::info;
use crate::config::CacheConfig;

/// Redis 캐시 클라이언트 래퍼
///
/// `#[repository]` 매크로는 `redis` 필드에 이 타입을 주입하고
/// `invalidate_cache` 등 무효화 헬퍼를 생성할 때 `del`, `keys`,
/// `del_multiple`을 사용합니다.
///
/// ```rust,ignore
/// let redis = RedisClient::new().await?;
/// redis.set_with_expiry("user_repository:abc", &user, 600).await?;
/// let cached: Option<User> = redis.get("user_repository:abc").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// `REDIS_URL`로 연결하고 `PING`으로 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::open(CacheConfig::redis_url())?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        value.map(|json| from_json(&json)).transpose()
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), RedisError> {
        let json = to_json(value)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex(key, json, seconds as u64).await
    }

    pub async fn del(&self, key: &str) -> Result<(), RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(key).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(keys).await
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.keys(pattern).await
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, RedisError> {
    serde_json::to_string(value)
        .map_err(|e| RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))
}

fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, RedisError> {
    serde_json::from_str(json)
        .map_err(|e| RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Cached {
        id: String,
        hours: i64,
    }

    #[test]
    fn test_json_helpers_preserve_value() {
        let value = Cached { id: "abc".to_string(), hours: 12 };
        let json = to_json(&value).unwrap();

        assert_eq!(from_json::<Cached>(&json).unwrap(), value);
    }

    #[test]
    fn test_corrupt_entry_is_type_error() {
        let err = from_json::<Cached>("{not json").unwrap_err();
        assert_eq!(err.kind(), redis::ErrorKind::TypeError);
    }
}
