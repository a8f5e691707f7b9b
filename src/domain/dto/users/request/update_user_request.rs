//! 프로필 갱신 요청 DTO
//!
//! `POST /api/v1/user` 본문입니다. 연결 계정 필드는 세 가지 상태를 구분합니다.
//!
//! | JSON | [`FieldUpdate`] | 의미 |
//! |------|-----------------|------|
//! | 필드 없음 | `Unchanged` | 변경 요청 없음 |
//! | `null` | `Clear` | 연결 해제 |
//! | 객체 | `Set(record)` | 저장된 계정과 다르면 재검증 후 채택 |
//!
//! `games`, `totalPlayTime`, `admin`, `id` 같은 필드는 정의되어 있지 않으므로
//! 역직렬화 단계에서 무시됩니다.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};
use crate::domain::entities::accounts::{
    OverwatchAccount, RunescapeAccount, SummonerRegistration, ValveAccount,
};

static DISPLAY_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9 ]{1,15}$").expect("display name pattern is valid")
});

/// 표시 이름 문자 집합 검사 (영문, 숫자, 공백 1~15자)
pub fn is_valid_display_name(name: &str) -> bool {
    DISPLAY_NAME.is_match(name)
}

fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    // 빈 문자열은 "변경 없음"
    if name.is_empty() || is_valid_display_name(name) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_username").with_message("invalid username".into()))
    }
}

/// 부분 갱신 필드의 세 가지 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Unchanged
    }
}

impl<T> FieldUpdate<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldUpdate::Unchanged)
    }
}

impl<T: Clone> FieldUpdate<T> {
    pub fn apply_to(&self, target: &mut Option<T>) {
        match self {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Clear => *target = None,
            FieldUpdate::Set(value) => *target = Some(value.clone()),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // 필드가 없는 경우는 #[serde(default)]가 Unchanged로 처리
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_display_name"))]
    pub name: Option<String>,

    #[serde(default)]
    pub public: Option<bool>,

    #[serde(default)]
    pub lol: FieldUpdate<SummonerRegistration>,

    #[serde(default)]
    pub overwatch: FieldUpdate<OverwatchAccount>,

    #[serde(default)]
    pub valve: FieldUpdate<ValveAccount>,

    #[serde(default)]
    pub runescape: FieldUpdate<RunescapeAccount>,
}

impl UpdateUserRequest {
    /// 비어 있지 않은 이름
    pub fn requested_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
