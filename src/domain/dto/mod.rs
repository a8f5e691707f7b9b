//! 데이터 전송 객체 (요청/응답)

pub mod users;
pub mod admin;

pub use users::*;
pub use admin::*;
