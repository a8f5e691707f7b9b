//! 도메인 계층
//!
//! - [`entities`] - 저장되는 사용자 문서와 연결 계정
//! - [`dto`] - HTTP 요청/응답 형태
//! - [`models`] - 요청 처리 중에만 쓰이는 값 객체

pub mod entities;
pub mod dto;
pub mod models;
