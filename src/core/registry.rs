//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! `singleton_macro`의 `#[service]` / `#[repository]` 속성이 생성하는 코드가
//! 의존하는 전역 컨테이너입니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[service] 매크로 → ServiceRegistration 생성
//!    ├─ #[repository] 매크로 → RepositoryRegistration 생성
//!    └─ inventory::collect! → 전역 레지스트리에 등록
//!
//! 2. 런타임 초기화
//!    ├─ Database, RedisClient 등 인프라 컴포넌트 직접 등록 (ServiceLocator::set)
//!    ├─ 트레잇 객체를 주입받는 UserService 직접 조립 후 등록
//!    └─ ServiceLocator::initialize_all()로 매크로 컴포넌트 일괄 생성
//!
//! 3. 의존성 해결
//!    ├─ Arc<T> 필드 감지 → ServiceLocator::get::<T>() 호출
//!    ├─ 캐시에 없으면 타입 이름으로 등록 정보 검색 후 생성
//!    └─ 이후 동일 타입 요청 시 캐시된 인스턴스 반환
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! #[repository(name = "user", collection = "users")]
//! pub struct UserRepository {
//!     db: Arc<Database>,
//!     redis: Arc<RedisClient>,
//! }
//!
//! #[service(name = "googleauth")]
//! pub struct GoogleAuthService {
//!     user_repo: Arc<UserRepository>,
//! }
//!
//! let service = GoogleAuthService::instance();
//! ```
//!
//! 생성자가 다른 컴포넌트를 요청하는 동안에는 컨테이너의 락을 잡지 않으므로
//! 중첩 의존성(서비스 → 리포지토리 → 데이터베이스)도 안전하게 해결됩니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use async_trait::async_trait;
use log::{debug, error, info};
use once_cell::sync::Lazy;

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
///
/// 모든 `#[service]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 레지스트리에서 사용하는 서비스 이름 (`token_service` 형태)
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
///
/// 모든 `#[repository]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[service]` 매크로가 생성하는 등록 메타데이터
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// `#[repository]` 매크로가 생성하는 등록 메타데이터
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 정규화된 이름 → 서비스 등록 정보
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (extract_clean_name_static(registration.name), registration))
        .collect();

    debug!("Service 레지스트리 캐시 구성: {}개", cache.len());
    cache
});

/// 정규화된 이름 → 리포지토리 등록 정보
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (extract_clean_name_static(registration.name), registration))
        .collect();

    debug!("Repository 레지스트리 캐시 구성: {}개", cache.len());
    cache
});

/// `user_service`, `user_repository` 형태의 등록 이름을 `user`로 정규화합니다.
fn extract_clean_name_static(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// 싱글톤 의존성 주입 컨테이너
///
/// 타입별로 정확히 하나의 인스턴스를 보관합니다. 매크로 컴포넌트는 첫 요청 시
/// 지연 생성되고, 인프라 컴포넌트와 수동 조립 컴포넌트는 [`ServiceLocator::set`]으로
/// 등록됩니다.
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    fn instances_read(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
        self.instances.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn instances_write(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
        self.instances.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn initializing_write(&self) -> RwLockWriteGuard<'_, HashSet<TypeId>> {
        self.initializing.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 이미 등록된 인스턴스만 조회합니다.
    ///
    /// 지연 생성을 시도하지 않으므로 수동 조립 컴포넌트가 아직 등록되지 않은
    /// 상황을 요청 처리 중에 에러로 다룰 때 사용합니다.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        LOCATOR
            .instances_read()
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 타입에 해당하는 싱글톤 인스턴스를 반환합니다.
    ///
    /// # Panics
    ///
    /// 등록되지 않은 타입이거나 순환 의존성이 감지되면 패닉합니다.
    /// 매크로가 생성한 생성자에서 호출되므로 시작 시점의 설정 오류를 조기에 드러냅니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::try_get::<T>() {
            return instance;
        }

        {
            let mut initializing = LOCATOR.initializing_write();
            if !initializing.insert(type_id) {
                error!("순환 의존성 감지: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        // 생성자가 다른 컴포넌트를 요청할 수 있으므로 락 밖에서 생성
        let created = Self::construct::<T>(type_name);

        LOCATOR.initializing_write().remove(&type_id);

        match created {
            Some(instance) => {
                let mut instances = LOCATOR.instances_write();
                let stored = instances
                    .entry(type_id)
                    .or_insert_with(|| instance as Arc<dyn Any + Send + Sync>)
                    .clone();
                drop(instances);

                match stored.downcast::<T>() {
                    Ok(instance) => instance,
                    Err(_) => panic!("Type mismatch in ServiceLocator for {}", type_name),
                }
            }
            None => {
                error!("등록되지 않은 컴포넌트 요청: {}", type_name);
                panic!(
                    "Service not found: {}. Register it with #[service]/#[repository] or ServiceLocator::set()",
                    type_name
                );
            }
        }
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Option<Arc<T>> {
        let clean_type_name = Self::extract_clean_type_name(type_name);

        let boxed = if let Some(entity) = clean_type_name.strip_suffix("Repository") {
            REPOSITORY_NAME_CACHE
                .get(&entity.to_lowercase())
                .map(|registration| (registration.constructor)())
        } else if let Some(entity) = clean_type_name.strip_suffix("Service") {
            SERVICE_NAME_CACHE
                .get(&entity.to_lowercase())
                .map(|registration| (registration.constructor)())
        } else {
            None
        }?;

        boxed.downcast::<Arc<T>>().ok().map(|instance| *instance)
    }

    fn extract_clean_type_name(type_name: &str) -> String {
        match type_name.rfind("::") {
            Some(pos) => type_name[pos + 2..].to_string(),
            None => type_name.to_string(),
        }
    }

    /// 인스턴스를 직접 등록합니다. 같은 타입이 이미 있으면 교체합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        debug!("컴포넌트 등록: {}", Self::extract_clean_type_name(type_name));

        LOCATOR
            .instances_write()
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 매크로로 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저 생성하여 서비스 생성자가 주입받을 수 있게 합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        info!("🔄 서비스 레지스트리 초기화");

        let mut repo_count = 0;
        for registration in inventory::iter::<RepositoryRegistration>() {
            let _instance = (registration.constructor)();
            debug!("  ✓ {}", registration.name);
            repo_count += 1;
        }

        let mut service_count = 0;
        for registration in inventory::iter::<ServiceRegistration>() {
            let _instance = (registration.constructor)();
            debug!("  ✓ {}", registration.name);
            service_count += 1;
        }

        info!("✅ 레지스트리 초기화 완료: 리포지토리 {}개, 서비스 {}개", repo_count, service_count);
        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualComponent {
        value: u32,
    }

    struct NeverRegistered;

    #[test]
    fn test_clean_name_strips_suffix() {
        assert_eq!(extract_clean_name_static("token_service"), "token");
        assert_eq!(extract_clean_name_static("user_repository"), "user");
        assert_eq!(extract_clean_name_static("plain"), "plain");
    }

    #[test]
    fn test_clean_type_name() {
        assert_eq!(
            ServiceLocator::extract_clean_type_name("game_time_backend::services::users::UserService"),
            "UserService"
        );
        assert_eq!(ServiceLocator::extract_clean_type_name("Database"), "Database");
    }

    #[test]
    fn test_set_then_get_returns_same_instance() {
        ServiceLocator::set(Arc::new(ManualComponent { value: 7 }));

        let first = ServiceLocator::get::<ManualComponent>();
        let second = ServiceLocator::try_get::<ManualComponent>().unwrap();

        assert_eq!(first.value, 7);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_try_get_unregistered_is_none() {
        assert!(ServiceLocator::try_get::<NeverRegistered>().is_none());
    }
}
