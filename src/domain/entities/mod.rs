//! 영속성 엔티티 모듈
//!
//! - [`users`] - 사용자 문서와 게임 레코드
//! - [`accounts`] - 게임 제공자별 연결 계정 레코드

pub mod users;
pub mod accounts;

pub use users::*;
pub use accounts::*;
