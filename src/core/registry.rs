//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! 타입별로 하나의 `Arc` 인스턴스를 보관하는 전역 컨테이너입니다.
//! Spring Framework의 ApplicationContext와 비슷한 역할을 합니다.
//!
//! | Spring 개념 | 이 시스템 | 비고 |
//! |-------------|-----------|------|
//! | `ApplicationContext` | `ServiceLocator` | 전역 DI 컨테이너 |
//! | `@Component` | `inventory::submit!` + `ServiceRegistration` | 컴포넌트 자동 등록 |
//! | `@Autowired` | `ServiceLocator::get::<T>()` | 의존성 조회 |
//! | `@Scope("singleton")` | 기본 동작 | 모든 컴포넌트가 싱글톤 |
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 컴파일 타임
//!    └─ inventory::submit! → ServiceRegistration 수집
//!
//! 2. 런타임 초기화 (main)
//!    ├─ Infrastructure 직접 등록: ServiceLocator::set()
//!    └─ ServiceLocator::initialize_all() → 등록된 서비스 전부 생성
//!
//! 3. 조회
//!    ├─ 등록된 인스턴스가 있으면 반환
//!    └─ 없으면 타입 이름으로 ServiceRegistration을 찾아 생성 후 저장
//! ```
//!
//! ## 서비스 등록 예제
//!
//! ```rust,ignore
//! fn product_service_constructor() -> Arc<dyn Any + Send + Sync> {
//!     ProductService::instance()
//! }
//!
//! inventory::submit! {
//!     ServiceRegistration {
//!         name: "product_service",
//!         constructor: product_service_constructor,
//!     }
//! }
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use log::debug;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{
    print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete,
    print_step_start, print_sub_task,
};

/// 서비스 등록 정보
///
/// `name`은 `{entity}_service` 형식이며, 타입 이름 `{Entity}Service`와 대응됩니다.
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Arc<dyn Any + Send + Sync>,
}

// 컴파일 타임에 모든 ServiceRegistration을 수집
inventory::collect!(ServiceRegistration);

/// "product_service" → "product" 형태의 조회 캐시
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<String, &'static ServiceRegistration> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (clean_registration_name(registration.name), registration))
        .collect();

    print_cache_initialized("Service", cache.len());
    cache
});

fn clean_registration_name(name: &str) -> String {
    name.strip_suffix("_service").unwrap_or(name).to_string()
}

/// `crate::services::products::ProductService` → "product"
fn entity_name_of(type_name: &str) -> String {
    let short = type_name.rsplit("::").next().unwrap_or(type_name);
    short.strip_suffix("Service").unwrap_or(short).to_lowercase()
}

/// 전역 서비스 컨테이너
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(|| ServiceLocator {
    instances: RwLock::new(HashMap::new()),
});

impl ServiceLocator {
    /// 인스턴스를 직접 등록합니다. 같은 타입이 있으면 교체됩니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        println!("📦 Registering: {}", type_name.rsplit("::").next().unwrap_or(type_name));

        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 인스턴스를 조회합니다.
    ///
    /// 등록된 인스턴스가 없으면 `ServiceRegistration`으로 생성을 시도합니다.
    /// 생성자는 잠금 밖에서 호출되므로 다른 서비스를 조회해도 교착되지 않습니다.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let type_id = TypeId::of::<T>();

        {
            let instances = LOCATOR.instances.read().unwrap_or_else(|e| e.into_inner());
            if let Some(instance) = instances.get(&type_id) {
                return instance.clone().downcast::<T>().ok();
            }
        }

        let entity_name = entity_name_of(std::any::type_name::<T>());
        let registration = SERVICE_NAME_CACHE.get(&entity_name)?;
        let instance = (registration.constructor)().downcast::<T>().ok()?;
        debug!("서비스 생성: {}", registration.name);

        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        let stored = instances
            .entry(type_id)
            .or_insert_with(|| instance as Arc<dyn Any + Send + Sync>)
            .clone();
        stored.downcast::<T>().ok()
    }

    /// 인스턴스를 조회하고, 없으면 패닉합니다.
    ///
    /// 애플리케이션 조립 단계에서만 사용합니다. 필수 의존성이 빠진 설정은
    /// 기동 시점에 바로 드러나야 합니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        match Self::try_get::<T>() {
            Some(instance) => instance,
            None => panic!(
                "Service not found: {}. Register it with ServiceLocator::set() or inventory::submit!",
                std::any::type_name::<T>()
            ),
        }
    }

    /// 등록된 모든 서비스를 즉시 생성합니다.
    ///
    /// 서비스 생성자는 `Infrastructure`를 조회하므로 먼저 등록되어 있어야 합니다.
    pub async fn initialize_all() -> Result<usize, Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let registrations: Vec<&ServiceRegistration> = inventory::iter::<ServiceRegistration>().collect();
        let count = registrations.len();

        if count > 0 {
            print_step_start(1, "Creating Service instances");
            for registration in registrations {
                print_sub_task(registration.name, "Creating...");
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(1, "Service instances created", count);
        }

        print_final_summary(count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestComponent {
        value: u32,
    }

    #[test]
    fn test_set_and_get() {
        ServiceLocator::set(Arc::new(TestComponent { value: 7 }));

        let component = ServiceLocator::get::<TestComponent>();
        assert_eq!(component.value, 7);
    }

    #[test]
    fn test_try_get_missing_returns_none() {
        struct NeverRegistered;
        assert!(ServiceLocator::try_get::<NeverRegistered>().is_none());
    }

    #[test]
    fn test_name_helpers() {
        assert_eq!(clean_registration_name("product_service"), "product");
        assert_eq!(entity_name_of("crud_service_backend::services::products::ProductService"), "product");
        assert_eq!(entity_name_of("EmployeeService"), "employee");
    }
}
