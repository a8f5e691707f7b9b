//! 게임 플레이 시간 백엔드
//!
//! 사용자가 여러 게임 계정(League of Legends, Overwatch, Steam, RuneScape)을
//! 연결하면 각 게임 API에서 플레이 시간을 모아 하나의 프로필로 보여주는 서비스입니다.
//! Google OAuth로 로그인하고 HS512 서명 토큰으로 API를 호출합니다.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ Routes/Handlers │ ← REST API, 인증 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │    Services     │ ──► │    Providers    │ ← Riot, Blizzard, Steam, Jagex API
//! └─────────────────┘     └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 사용자 문서 저장
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │
//! └─────────────────┘
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod providers;
pub mod repositories;
pub mod services;
pub mod middlewares;
pub mod handlers;
pub mod routes;
