//! Users Entity Module
//!
//! 사용자 문서([`User`])와 게임별 플레이 시간 레코드([`Game`])를 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{Game, User, total_time};
//!
//! let mut user = User::new("108123");
//! user.games = vec![Game::new("Overwatch", 12)];
//! user.total_game_time = total_time(&user.games);
//! ```

pub mod user;

pub use user::{total_time, Game, User};
