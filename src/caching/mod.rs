//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 사용자 문서 읽기 캐시를 제공합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("user_repository:abc", &user, 600).await?;
//! let cached: Option<User> = cache.get("user_repository:abc").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! USER_CACHE_TTL_SECS=600           # 기본값
//! ```

pub mod redis;
