use std::sync::{Arc, RwLock};

/// 교체 가능한 API 키
///
/// 요청은 시작 시점의 키 스냅샷을 사용하고, 교체는 원자적으로 이루어집니다.
/// 교체 도중 출발한 요청은 이전 키로 끝까지 진행됩니다.
pub struct ApiKeyHolder {
    key: RwLock<Arc<str>>,
}

impl ApiKeyHolder {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self {
            key: RwLock::new(key.into()),
        }
    }

    pub fn snapshot(&self) -> Arc<str> {
        match self.key.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn swap(&self, key: impl Into<Arc<str>>) {
        let key = key.into();
        match self.key.write() {
            Ok(mut guard) => *guard = key,
            Err(poisoned) => *poisoned.into_inner() = key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_survives_swap() {
        let holder = ApiKeyHolder::new("RGAPI-old");
        let before = holder.snapshot();

        holder.swap("RGAPI-new");

        assert_eq!(&*before, "RGAPI-old");
        assert_eq!(&*holder.snapshot(), "RGAPI-new");
    }
}
