//! # Service Registry
//!
//! `#[service]` / `#[repository]` 매크로가 `inventory`로 제출한 생성자를 모아
//! 타입별 싱글톤을 만들어 주는 서비스 로케이터입니다.
//!
//! 인프라 객체(`Database`, `RedisClient`)는 매크로로 만들 수 없으므로
//! 시작 시 [`ServiceLocator::set`]으로 직접 등록합니다.
//!
//! ```rust,ignore
//! ServiceLocator::set(database);
//! ServiceLocator::set(redis_client);
//! ServiceLocator::initialize_all().await?;
//!
//! let user_service = ServiceLocator::get::<UserService>();
//! ```
//!
//! ## 이름 규칙
//!
//! 타입 이름에서 `Service` / `Repository` 접미사를 떼고 소문자로 바꾼 값이
//! 등록 이름과 같아야 합니다. `VerificationService`는 `"verification"`,
//! `CodeRepository`는 `"code"`로 찾습니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{
    print_boxed_title, print_cache_initialized, print_final_summary,
    print_step_complete, print_step_start, print_sub_task,
};

/// 비즈니스 서비스 공통 trait
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 접근 계층 공통 trait
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;
    fn collection_name(&self) -> &str;
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `inventory`에 제출되는 서비스 생성자
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// `inventory`에 제출되는 리포지토리 생성자
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 정규화된 이름 → 서비스 생성자
static SERVICE_CONSTRUCTORS: Lazy<HashMap<String, fn() -> Box<dyn Any + Send + Sync>>> = Lazy::new(|| {
    let table: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|r| (normalize_registration_name(r.name), r.constructor))
        .collect();
    print_cache_initialized("Service", table.len());
    table
});

/// 정규화된 이름 → 리포지토리 생성자
static REPOSITORY_CONSTRUCTORS: Lazy<HashMap<String, fn() -> Box<dyn Any + Send + Sync>>> = Lazy::new(|| {
    let table: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|r| (normalize_registration_name(r.name), r.constructor))
        .collect();
    print_cache_initialized("Repository", table.len());
    table
});

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

/// `mail_service` 처럼 접미사가 붙은 수동 등록 이름을 `mail`로 맞춥니다.
fn normalize_registration_name(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// `crate::services::auth::TokenService` → `TokenService`
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 등록 테이블 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Repository,
    Service,
}

impl Kind {
    fn of(short_name: &str) -> Option<(Kind, String)> {
        if let Some(entity) = short_name.strip_suffix("Repository") {
            return Some((Kind::Repository, entity.to_lowercase()));
        }
        if let Some(entity) = short_name.strip_suffix("Service") {
            return Some((Kind::Service, entity.to_lowercase()));
        }
        None
    }

    fn constructor(self, key: &str) -> Option<fn() -> Box<dyn Any + Send + Sync>> {
        match self {
            Kind::Repository => REPOSITORY_CONSTRUCTORS.get(key).copied(),
            Kind::Service => SERVICE_CONSTRUCTORS.get(key).copied(),
        }
    }
}

/// 타입별 싱글톤 저장소
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

    fn cached<T: 'static + Send + Sync>(type_id: TypeId) -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap_or_else(|e| e.into_inner());
        instances
            .get(&type_id)
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    /// 타입 `T`의 싱글톤을 반환합니다.
    ///
    /// 처음 요청될 때 등록된 생성자로 만들고 이후에는 같은 `Arc`를 돌려줍니다.
    ///
    /// # Panics
    ///
    /// 등록되지 않은 타입이거나 생성 중 자기 자신을 다시 요청하는 순환 의존성이
    /// 있으면 패닉합니다. 둘 다 배선 오류이므로 시작 단계에서 드러납니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::cached::<T>(type_id) {
            return instance;
        }

        {
            let mut initializing = LOCATOR.initializing.write().unwrap_or_else(|e| e.into_inner());
            if !initializing.insert(type_id) {
                log::error!("❌ 순환 의존성 감지: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        // 생성자 안에서 다른 의존성을 get() 하므로 instances 락을 잡지 않은 채 생성합니다.
        let created = Self::construct::<T>(type_name);

        LOCATOR.initializing.write().unwrap_or_else(|e| e.into_inner()).remove(&type_id);

        let instance = match created {
            Ok(instance) => instance,
            Err(message) => panic!("{}", message),
        };

        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        let stored = instances
            .entry(type_id)
            .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>)
            .clone();

        stored.downcast::<T>().unwrap_or(instance)
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Result<Arc<T>, String> {
        let short_name = short_type_name(type_name);
        let (kind, key) = Kind::of(short_name).ok_or_else(|| {
            format!(
                "Service not found: {}. Register it with #[service] / #[repository] or ServiceLocator::set()",
                type_name
            )
        })?;

        let constructor = kind
            .constructor(&key)
            .ok_or_else(|| format!("No {:?} registered under '{}' ({})", kind, key, type_name))?;

        constructor()
            .downcast::<Arc<T>>()
            .map(|boxed| *boxed)
            .map_err(|_| format!("Type mismatch for {:?} '{}'", kind, key))
    }

    /// 인스턴스를 직접 등록합니다. 이미 있으면 교체합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        log::info!("📦 Registering: {}", short_type_name(type_name));

        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 타입인지 확인합니다.
    pub fn contains<T: 'static + Send + Sync>() -> bool {
        Self::cached::<T>(TypeId::of::<T>()).is_some()
    }

    /// 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저 만들어 서비스 생성자가 주입받을 수 있게 합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repositories: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        if !repositories.is_empty() {
            print_step_start(1, "Creating Repository instances");
            for registration in &repositories {
                print_sub_task(registration.name, "Creating...");
                let _ = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(1, "Repository instances created", repositories.len());
        }

        let services: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        if !services.is_empty() {
            print_step_start(2, "Creating Service instances");
            for registration in &services {
                print_sub_task(registration.name, "Creating...");
                let _ = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(2, "Service instances created", services.len());
        }

        print_final_summary(repositories.len(), services.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ProbeClient {
        id: u32,
    }

    #[test]
    fn test_normalize_registration_name() {
        assert_eq!(normalize_registration_name("mail_service"), "mail");
        assert_eq!(normalize_registration_name("code_repository"), "code");
        assert_eq!(normalize_registration_name("verification"), "verification");
    }

    #[test]
    fn test_kind_from_type_name() {
        assert_eq!(
            Kind::of("VerificationService"),
            Some((Kind::Service, "verification".to_string()))
        );
        assert_eq!(Kind::of("CodeRepository"), Some((Kind::Repository, "code".to_string())));
        assert_eq!(Kind::of("RedisClient"), None);
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("crate::services::auth::TokenService"), "TokenService");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn test_set_then_get_returns_same_instance() {
        ServiceLocator::set(Arc::new(ProbeClient { id: 7 }));

        assert!(ServiceLocator::contains::<ProbeClient>());
        let first = ServiceLocator::get::<ProbeClient>();
        let second = ServiceLocator::get::<ProbeClient>();
        assert_eq!(first.id, 7);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
