//! 데이터 액세스 계층
//!
//! `#[repository]` 매크로로 싱글톤이 되는 MongoDB 리포지토리와, 서비스가
//! 의존하는 저장소 trait을 제공합니다. 사용자 조회는 Redis 읽기 캐시를 거칩니다.
//!
//! ```rust,ignore
//! use crate::repositories::users::{UserRepository, UserStore};
//!
//! let user_repo = UserRepository::instance();
//! let user = user_repo.find_by_name("johan").await?;
//! ```

pub mod users;
