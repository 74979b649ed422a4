//! Integration tests for the registration builder
//!
//! Covers the call-once ledger, the backend gating of the data context and
//! identity steps, and the argument bundles registered for business services.

use std::sync::Arc;

use async_trait::async_trait;
use celerik_core::builder::{add_core_services, ApiBehaviorOptions, ApiBuilder, ApiConfig, IdentityOptions, SetupStep};
use celerik_core::config::{Configuration, ServiceType};
use celerik_core::container::{ServiceRegistry, ServiceScope};
use celerik_core::data::{DbContext, DbContextOptions, DbProvider, IdentityStoreOptions};
use celerik_core::errors::{CoreError, CoreResult};
use celerik_core::localization::StringLocalizerFactory;
use celerik_core::logging::LoggerFactory;
use celerik_core::mapper::{Mapper, MapperConfiguration};
use celerik_core::{ServiceArgs, ServiceArgsEf};

struct OrdersCategory;

#[derive(Debug)]
struct ShopContext {
    options: Arc<DbContextOptions>,
}

#[async_trait]
impl DbContext for ShopContext {
    fn from_options(options: Arc<DbContextOptions>) -> CoreResult<Self> {
        Ok(Self { options })
    }

    async fn save_changes(&self) -> CoreResult<usize> {
        Ok(0)
    }

    fn detach_all(&self, _excluded: &[&str]) -> usize {
        0
    }
}

type ShopBuilder<'a> = ApiBuilder<'a, OrdersCategory, ShopContext>;

type ValidatorsCallback = fn(&mut ServiceRegistry) -> CoreResult<()>;
type BusinessCallback = fn(&mut ServiceRegistry, &Configuration) -> CoreResult<()>;

fn config(pairs: &[(&str, &str)]) -> Arc<Configuration> {
    Arc::new(Configuration::from_pairs(pairs.iter().copied()))
}

fn no_validators(_: &mut ServiceRegistry) -> CoreResult<()> {
    Ok(())
}

fn no_business_services(_: &mut ServiceRegistry, _: &Configuration) -> CoreResult<()> {
    Ok(())
}

fn run_step(builder: &mut ShopBuilder<'_>, step: SetupStep) -> CoreResult<()> {
    match step {
        SetupStep::AddLocalization => builder.add_localization(None).map(|_| ()),
        SetupStep::AddLogging => builder.add_logging(None).map(|_| ()),
        SetupStep::AddSqlServer => builder.add_sql_server().map(|_| ()),
        SetupStep::AddIdentity => builder.add_identity(None).map(|_| ()),
        SetupStep::AddCosmosDb => builder.add_cosmos_db().map(|_| ()),
        SetupStep::AddAutomapper => builder
            .add_automapper(None::<fn(&mut MapperConfiguration)>)
            .map(|_| ()),
        SetupStep::AddValidators => builder.add_validators(Some(no_validators)).map(|_| ()),
        SetupStep::AddBusinesServices => builder
            .add_business_services(Some(no_business_services))
            .map(|_| ()),
    }
}

#[test]
fn test_every_step_rejects_a_second_call() {
    use celerik_core::describe::Described;

    for service_type in ["ServiceEF", "ServiceHttp", "ServiceMock"] {
        let mut services = ServiceRegistry::new();
        let mut builder = ShopBuilder::new(
            &mut services,
            config(&[
                ("ServiceType", service_type),
                ("ConnectionStrings:SqlServer", "Server=.;Database=Shop"),
                ("ConnectionStrings:AspNetIdentity", "Server=.;Database=Identity"),
                ("ConnectionStrings:CosmosDb", "AccountEndpoint=https://localhost:8081/;AccountKey=a2V5;"),
            ]),
        )
        .unwrap();

        for step in SetupStep::variants() {
            run_step(&mut builder, step).unwrap();
            assert!(builder.is_invoked(step));

            let err = run_step(&mut builder, step).unwrap_err();
            assert!(err.is_duplicate_step(), "{} on {}: {}", step, service_type, err);
            assert_eq!(err.to_string(), format!("This method was already called: '{}'", step));
        }

        assert_eq!(builder.ledger().len(), SetupStep::DESCRIPTIONS.len());
    }
}

#[test]
fn test_duplicate_check_precedes_argument_check() {
    let mut services = ServiceRegistry::new();
    let mut builder = ShopBuilder::new(&mut services, config(&[("ServiceType", "ServiceMock")])).unwrap();

    builder.add_validators(Some(no_validators)).unwrap();
    let err = builder.add_validators(None::<ValidatorsCallback>).unwrap_err();
    assert!(err.is_duplicate_step());

    builder.add_business_services(Some(no_business_services)).unwrap();
    let err = builder.add_business_services(None::<BusinessCallback>).unwrap_err();
    assert!(err.is_duplicate_step());
}

#[test]
fn test_service_type_resolution_errors() {
    let mut services = ServiceRegistry::new();
    let mut builder = ShopBuilder::new(&mut services, config(&[])).unwrap();
    let err = builder.add_sql_server().unwrap_err();
    assert!(matches!(err, CoreError::MissingConfig { ref key } if key == "ServiceType"));

    let mut services = ServiceRegistry::new();
    let builder = ShopBuilder::new(&mut services, config(&[("ServiceType", "")])).unwrap();
    assert!(matches!(builder.service_type(), Err(CoreError::MissingConfig { .. })));

    let mut services = ServiceRegistry::new();
    let mut builder = ShopBuilder::new(&mut services, config(&[("ServiceType", "bogus")])).unwrap();
    let err = builder.add_identity(None).unwrap_err();
    assert!(matches!(err, CoreError::InvalidConfig { ref value, .. } if value == "bogus"));
    assert!(!builder.is_invoked(SetupStep::AddIdentity));
}

#[test]
fn test_service_type_is_case_insensitive() {
    let mut services = ServiceRegistry::new();
    let builder = ShopBuilder::new(&mut services, config(&[("ServiceType", "serviceef")])).unwrap();
    assert_eq!(builder.service_type().unwrap(), ServiceType::ServiceEf);
}

#[test]
fn test_sql_server_skipped_for_mock_backend() {
    let mut services = ServiceRegistry::new();
    ShopBuilder::new(
        &mut services,
        config(&[
            ("ServiceType", "ServiceMock"),
            ("ConnectionStrings:SqlServer", "Server=.;Database=Shop"),
        ]),
    )
    .unwrap()
    .add_sql_server()
    .unwrap();

    assert!(!services.contains::<DbContextOptions>());
    assert!(!services.contains::<ShopContext>());
}

#[test]
fn test_sql_server_skipped_without_connection_string() {
    let mut services = ServiceRegistry::new();
    let mut builder = ShopBuilder::new(
        &mut services,
        config(&[("ServiceType", "ServiceEF"), ("ConnectionStrings:SqlServer", "")]),
    )
    .unwrap();
    builder.add_sql_server().unwrap();
    assert!(builder.is_invoked(SetupStep::AddSqlServer));

    assert!(!services.contains::<ShopContext>());
}

#[test]
fn test_sql_server_binds_data_context() {
    let mut services = ServiceRegistry::new();
    ShopBuilder::new(
        &mut services,
        config(&[
            ("ServiceType", "ServiceEF"),
            ("ConnectionStrings:SqlServer", "Server=.;Database=Shop"),
            ("ConnectionStrings:AspNetIdentity", "Server=.;Database=Identity"),
        ]),
    )
    .unwrap()
    .add_sql_server()
    .unwrap();

    assert_eq!(services.scope_of::<ShopContext>(), Some(ServiceScope::Transient));
    let context = services.resolve::<ShopContext>().unwrap();
    assert_eq!(
        context.options.provider,
        DbProvider::SqlServer {
            connection_string: "Server=.;Database=Shop".to_string()
        }
    );
    assert!(context.options.context_type.ends_with("ShopContext"));
}

#[test]
fn test_sql_server_falls_back_to_identity_connection_string() {
    let mut services = ServiceRegistry::new();
    ShopBuilder::new(
        &mut services,
        config(&[
            ("ServiceType", "ServiceEF"),
            ("ConnectionStrings:SqlServer", ""),
            ("ConnectionStrings:AspNetIdentity", "Server=.;Database=Identity"),
        ]),
    )
    .unwrap()
    .add_sql_server()
    .unwrap();

    let options = services.resolve::<DbContextOptions>().unwrap();
    assert_eq!(
        options.provider,
        DbProvider::SqlServer {
            connection_string: "Server=.;Database=Identity".to_string()
        }
    );
}

#[test]
fn test_identity_requires_identity_connection_string() {
    let mut services = ServiceRegistry::new();
    ShopBuilder::new(
        &mut services,
        config(&[
            ("ServiceType", "ServiceEF"),
            ("ConnectionStrings:SqlServer", "Server=.;Database=Shop"),
        ]),
    )
    .unwrap()
    .add_identity(None)
    .unwrap();
    assert!(!services.contains::<IdentityOptions>());

    let mut services = ServiceRegistry::new();
    ShopBuilder::new(
        &mut services,
        config(&[
            ("ServiceType", "ServiceEF"),
            ("ConnectionStrings:AspNetIdentity", "Server=.;Database=Identity"),
        ]),
    )
    .unwrap()
    .add_identity(Some(ApiConfig::default().identity_options))
    .unwrap();

    let identity = services.resolve::<IdentityOptions>().unwrap();
    assert_eq!(identity.password.as_ref().map(|p| p.required_length), Some(8));
    assert!(identity.lockout.is_some());
    let stores = services.resolve::<IdentityStoreOptions>().unwrap();
    assert!(stores.context_type.ends_with("ShopContext"));
}

#[test]
fn test_cosmos_db_binds_document_store() {
    let mut services = ServiceRegistry::new();
    ShopBuilder::new(
        &mut services,
        config(&[
            ("ServiceType", "ServiceEF"),
            ("ConnectionStrings:CosmosDb", "AccountEndpoint=https://localhost:8081/;AccountKey=a2V5;"),
            ("CosmosDb:DatabaseName", "Shop"),
        ]),
    )
    .unwrap()
    .add_cosmos_db()
    .unwrap();

    let context = services.resolve::<ShopContext>().unwrap();
    assert_eq!(
        context.options.provider,
        DbProvider::Cosmos {
            service_endpoint: Some("https://localhost:8081/".to_string()),
            auth_key: Some("a2V5".to_string()),
            database_name: Some("Shop".to_string()),
        }
    );
}

#[test]
fn test_cosmos_db_skipped_for_http_backend() {
    let mut services = ServiceRegistry::new();
    ShopBuilder::new(
        &mut services,
        config(&[
            ("ServiceType", "ServiceHttp"),
            ("ConnectionStrings:CosmosDb", "AccountEndpoint=https://localhost:8081/;AccountKey=a2V5;"),
        ]),
    )
    .unwrap()
    .add_cosmos_db()
    .unwrap();

    assert!(!services.contains::<ShopContext>());
}

#[test]
fn test_automapper_registers_configured_maps() {
    let mut services = ServiceRegistry::new();
    ShopBuilder::new(&mut services, config(&[("ServiceType", "ServiceMock")]))
        .unwrap()
        .add_automapper(Some(|maps: &mut MapperConfiguration| {
            maps.create_map(|id: &u32| format!("order-{}", id));
        }))
        .unwrap();

    let mapper = services.resolve::<Mapper>().unwrap();
    assert_eq!(mapper.map::<u32, String>(&42).unwrap(), "order-42");
}

#[test]
fn test_validators_require_callback() {
    let mut services = ServiceRegistry::new();
    let mut builder = ShopBuilder::new(&mut services, config(&[("ServiceType", "ServiceMock")])).unwrap();

    let err = builder.add_validators(None::<ValidatorsCallback>).unwrap_err();
    assert!(matches!(err, CoreError::Argument { ref name } if name == "configure"));
    assert!(!builder.is_invoked(SetupStep::AddValidators));

    let mut calls = 0;
    builder
        .add_validators(Some(|services: &mut ServiceRegistry| {
            calls += 1;
            services.register_singleton(String::from("order validator"))
        }))
        .unwrap();

    assert_eq!(calls, 1);
    let behavior = services.resolve::<ApiBehaviorOptions>().unwrap();
    assert!(behavior.suppress_model_state_invalid_filter);
    assert!(services.contains::<String>());
}

#[test]
fn test_business_services_require_callback() {
    let mut services = ServiceRegistry::new();
    let mut builder = ShopBuilder::new(&mut services, config(&[("ServiceType", "ServiceMock")])).unwrap();

    let err = builder.add_business_services(None::<BusinessCallback>).unwrap_err();
    assert!(err.is_argument());
    assert!(!builder.is_invoked(SetupStep::AddBusinesServices));
}

#[test]
fn test_business_services_callback_receives_configuration_once() {
    let mut services = ServiceRegistry::new();
    let mut builder = ShopBuilder::new(
        &mut services,
        config(&[("ServiceType", "ServiceHttp"), ("Orders:BaseAddress", "http://orders")]),
    )
    .unwrap();

    let mut seen = Vec::new();
    builder
        .add_business_services(Some(|_: &mut ServiceRegistry, config: &Configuration| {
            seen.push(config.get("Orders:BaseAddress").map(str::to_string));
            Ok(())
        }))
        .unwrap();

    assert_eq!(seen, vec![Some("http://orders".to_string())]);
    assert_eq!(services.scope_of::<ServiceArgs<OrdersCategory>>(), Some(ServiceScope::Transient));
    assert!(!services.contains::<ServiceArgsEf<OrdersCategory, ShopContext>>());
}

#[test]
fn test_business_services_for_entity_framework_backend() {
    let mut services = ServiceRegistry::new();
    let mut builder = ShopBuilder::new(
        &mut services,
        config(&[
            ("ServiceType", "ServiceEF"),
            ("ConnectionStrings:SqlServer", "Server=.;Database=Shop"),
        ]),
    )
    .unwrap();

    builder
        .add_localization(None)
        .unwrap()
        .add_logging(None)
        .unwrap()
        .add_sql_server()
        .unwrap()
        .add_automapper(None::<fn(&mut MapperConfiguration)>)
        .unwrap()
        .add_business_services(Some(no_business_services))
        .unwrap();

    assert!(!services.contains::<ServiceArgs<OrdersCategory>>());
    let args = services.resolve::<ServiceArgsEf<OrdersCategory, ShopContext>>().unwrap();
    assert!(args.logger.category().ends_with("OrdersCategory"));
    assert_eq!(args.config.get("ServiceType"), Some("ServiceEF"));
    assert_eq!(args.db_context.options.provider.name(), "SqlServer");
}

#[test]
fn test_service_args_require_registered_collaborators() {
    let mut services = ServiceRegistry::new();
    ShopBuilder::new(&mut services, config(&[("ServiceType", "ServiceMock")]))
        .unwrap()
        .add_business_services(Some(no_business_services))
        .unwrap();

    let err = services.resolve::<ServiceArgs<OrdersCategory>>().unwrap_err();
    assert!(err.is_service());
}

#[test]
fn test_add_core_services() {
    let mut services = ServiceRegistry::new();
    let config = config(&[
        ("ServiceType", "ServiceEF"),
        ("Logging:Provider", "debug"),
        ("ConnectionStrings:AspNetIdentity", "Server=.;Database=Identity"),
    ]);

    let mut builder = add_core_services::<OrdersCategory, ShopContext>(&mut services, config, ApiConfig::default()).unwrap();
    for step in [
        SetupStep::AddLocalization,
        SetupStep::AddLogging,
        SetupStep::AddSqlServer,
        SetupStep::AddIdentity,
    ] {
        assert!(builder.is_invoked(step));
    }
    assert!(builder.add_logging(None).unwrap_err().is_duplicate_step());
    builder.add_automapper(None::<fn(&mut MapperConfiguration)>).unwrap();

    let localizer_factory = services.resolve::<StringLocalizerFactory>().unwrap();
    assert_eq!(localizer_factory.resources_path().to_str(), Some("Resources"));
    let logger_factory = services.resolve::<LoggerFactory>().unwrap();
    assert_eq!(logger_factory.providers().len(), 1);
    assert!(services.contains::<ShopContext>());
    assert!(services.contains::<IdentityOptions>());
}
