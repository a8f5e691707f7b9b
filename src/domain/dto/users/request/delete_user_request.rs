use serde::Deserialize;

/// `DELETE /api/v1/user` 본문에서 지울 수 있는 필드
///
/// 본문이 없거나 빈 배열이면 사용자 문서 전체를 삭제합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserField {
    Name,
    Public,
    Lol,
    Overwatch,
    Valve,
    Runescape,
}

impl UserField {
    /// 저장소 문서의 필드 이름
    pub fn key(&self) -> &'static str {
        match self {
            UserField::Name => "name",
            UserField::Public => "public",
            UserField::Lol => "lol",
            UserField::Overwatch => "overwatch",
            UserField::Valve => "valve",
            UserField::Runescape => "runescape",
        }
    }

    pub fn is_linked_account(&self) -> bool {
        matches!(
            self,
            UserField::Lol | UserField::Overwatch | UserField::Valve | UserField::Runescape
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_list_parses() {
        let fields: Vec<UserField> = serde_json::from_str(r#"["overwatch", "name"]"#).unwrap();

        assert_eq!(fields, vec![UserField::Overwatch, UserField::Name]);
        assert!(fields[0].is_linked_account());
        assert!(!fields[1].is_linked_account());
    }

    #[test]
    fn test_privileged_fields_are_rejected() {
        assert!(serde_json::from_str::<Vec<UserField>>(r#"["admin"]"#).is_err());
        assert!(serde_json::from_str::<Vec<UserField>>(r#"["games"]"#).is_err());
    }
}
