use crate::args::{ServiceArgs, ServiceArgsEf};
use crate::builder::ledger::{RegistrationLedger, SetupStep};
use crate::builder::options::{ApiBehaviorOptions, ApiConfig, IdentityOptions};
use crate::config::{ApiConfigKeys, Configuration, CosmosConnectionString, ServiceType};
use crate::container::ServiceRegistry;
use crate::data::{DbContext, DbContextOptions, IdentityStoreOptions, NoDbContext};
use crate::errors::{CoreError, CoreResult};
use crate::localization::{LocalizationOptions, StringLocalizerFactory};
use crate::logging::{ConsoleLoggerOptions, LoggerFactory};
use crate::mapper::MapperConfiguration;
use once_cell::unsync::OnceCell;
use std::marker::PhantomData;
use std::sync::Arc;

/// Fluent builder that registers each cross-cutting concern once
///
/// `L` is the logger category type and `C` the data context bound for the
/// entity framework backend. Every step checks the ledger first, then its
/// arguments, then applies its effect; the step is recorded only when the
/// effect succeeds.
pub struct ApiBuilder<'a, L, C = NoDbContext> {
    services: &'a mut ServiceRegistry,
    config: Arc<Configuration>,
    ledger: RegistrationLedger,
    service_type: OnceCell<ServiceType>,
    types: PhantomData<fn() -> (L, C)>,
}

impl<'a, L: 'static, C: DbContext> ApiBuilder<'a, L, C> {
    /// Bind a builder to a registry and configuration
    ///
    /// The configuration is registered as a singleton so runtime services
    /// can resolve it.
    pub fn new(services: &'a mut ServiceRegistry, config: Arc<Configuration>) -> CoreResult<Self> {
        services.register_shared(Arc::clone(&config))?;
        Ok(Self {
            services,
            config,
            ledger: RegistrationLedger::new(),
            service_type: OnceCell::new(),
            types: PhantomData,
        })
    }

    /// Backend kind from `ServiceType`, read once and cached
    pub fn service_type(&self) -> CoreResult<ServiceType> {
        self.service_type
            .get_or_try_init(|| self.config.service_type())
            .copied()
    }

    pub fn is_invoked(&self, step: SetupStep) -> bool {
        self.ledger.is_invoked(step.identifier())
    }

    pub fn ledger(&self) -> &RegistrationLedger {
        &self.ledger
    }

    pub fn services(&self) -> &ServiceRegistry {
        &*self.services
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Register the string localizer factory
    pub fn add_localization(&mut self, options: Option<LocalizationOptions>) -> CoreResult<&mut Self> {
        self.begin(SetupStep::AddLocalization)?;

        let options = options.unwrap_or_default();
        self.services
            .register_singleton(StringLocalizerFactory::new(&options.resources_path))?;

        self.complete(SetupStep::AddLocalization)
    }

    /// Register the logger factory built from the `Logging` section
    pub fn add_logging(&mut self, options: Option<ConsoleLoggerOptions>) -> CoreResult<&mut Self> {
        self.begin(SetupStep::AddLogging)?;

        let factory = LoggerFactory::from_configuration(&self.config, &options.unwrap_or_default())?;
        self.services.register_singleton(factory)?;

        self.complete(SetupStep::AddLogging)
    }

    /// Bind a SQL Server data context
    ///
    /// Only installs when the backend is entity framework and a `SqlServer`
    /// or, failing that, `AspNetIdentity` connection string is set.
    pub fn add_sql_server(&mut self) -> CoreResult<&mut Self> {
        self.begin(SetupStep::AddSqlServer)?;

        if self.service_type()?.is_entity_framework() {
            let connection_string = self
                .non_empty_connection_string(ApiConfigKeys::SQL_SERVER_CONNECTION_STRING_NAME)
                .or_else(|| self.non_empty_connection_string(ApiConfigKeys::ASP_NET_IDENTITY_CONNECTION_STRING_NAME))
                .map(str::to_string);

            match connection_string {
                Some(connection_string) => {
                    self.bind_db_context(DbContextOptions::sql_server::<C>(connection_string))?;
                }
                None => tracing::debug!(step = %SetupStep::AddSqlServer, "no connection string, skipping data context"),
            }
        }

        self.complete(SetupStep::AddSqlServer)
    }

    /// Register identity options and stores
    ///
    /// Only installs when the backend is entity framework and the
    /// `AspNetIdentity` connection string is set.
    pub fn add_identity(&mut self, options: Option<IdentityOptions>) -> CoreResult<&mut Self> {
        self.begin(SetupStep::AddIdentity)?;

        let should_add = self.service_type()?.is_entity_framework()
            && self
                .non_empty_connection_string(ApiConfigKeys::ASP_NET_IDENTITY_CONNECTION_STRING_NAME)
                .is_some();

        if should_add {
            self.services
                .register_singleton(options.unwrap_or_default().with_defaults())?;
            self.services
                .register_singleton(IdentityStoreOptions::for_context::<C>())?;
        } else {
            tracing::debug!(step = %SetupStep::AddIdentity, "identity not applicable, skipping");
        }

        self.complete(SetupStep::AddIdentity)
    }

    /// Bind a Cosmos DB data context
    pub fn add_cosmos_db(&mut self) -> CoreResult<&mut Self> {
        self.begin(SetupStep::AddCosmosDb)?;

        if self.service_type()?.is_entity_framework() {
            let connection_string = self
                .non_empty_connection_string(ApiConfigKeys::COSMOS_DB_CONNECTION_STRING_NAME)
                .map(CosmosConnectionString::parse);

            match connection_string {
                Some(parsed) => {
                    let database_name = self
                        .config
                        .get(ApiConfigKeys::COSMOS_DB_DATABASE_NAME)
                        .map(str::to_string);
                    self.bind_db_context(DbContextOptions::cosmos::<C>(
                        parsed.service_endpoint,
                        parsed.auth_key,
                        database_name,
                    ))?;
                }
                None => tracing::debug!(step = %SetupStep::AddCosmosDb, "no connection string, skipping data context"),
            }
        }

        self.complete(SetupStep::AddCosmosDb)
    }

    /// Build and register the object mapper
    pub fn add_automapper<F>(&mut self, configure: Option<F>) -> CoreResult<&mut Self>
    where
        F: FnOnce(&mut MapperConfiguration),
    {
        self.begin(SetupStep::AddAutomapper)?;

        let mut mapper_config = MapperConfiguration::new();
        if let Some(configure) = configure {
            configure(&mut mapper_config);
        }
        self.services.register_singleton(mapper_config.build())?;

        self.complete(SetupStep::AddAutomapper)
    }

    /// Register validators through `configure`
    pub fn add_validators<F>(&mut self, configure: Option<F>) -> CoreResult<&mut Self>
    where
        F: FnOnce(&mut ServiceRegistry) -> CoreResult<()>,
    {
        self.begin(SetupStep::AddValidators)?;
        let configure = configure.ok_or_else(|| CoreError::argument("configure"))?;

        self.services.register_singleton(ApiBehaviorOptions {
            suppress_model_state_invalid_filter: true,
        })?;
        configure(&mut *self.services)?;

        self.complete(SetupStep::AddValidators)
    }

    /// Register the service argument bundle for the backend, then `configure`
    pub fn add_business_services<F>(&mut self, configure: Option<F>) -> CoreResult<&mut Self>
    where
        F: FnOnce(&mut ServiceRegistry, &Configuration) -> CoreResult<()>,
    {
        self.begin(SetupStep::AddBusinesServices)?;
        let configure = configure.ok_or_else(|| CoreError::argument("configure"))?;

        match self.service_type()? {
            ServiceType::ServiceHttp | ServiceType::ServiceMock => {
                self.services
                    .register_transient::<ServiceArgs<L>, _>(ServiceArgs::<L>::from_registry)?;
            }
            ServiceType::ServiceEf => {
                self.services
                    .register_transient::<ServiceArgsEf<L, C>, _>(ServiceArgsEf::<L, C>::from_registry)?;
            }
        }
        configure(&mut *self.services, &self.config)?;

        self.complete(SetupStep::AddBusinesServices)
    }

    fn begin(&self, step: SetupStep) -> CoreResult<()> {
        self.ledger.ensure_not_invoked(step.identifier())
    }

    fn complete(&mut self, step: SetupStep) -> CoreResult<&mut Self> {
        self.ledger.record(step.identifier())?;
        tracing::debug!(step = %step, services = self.services.service_count(), "setup step completed");
        Ok(self)
    }

    fn non_empty_connection_string(&self, name: &str) -> Option<&str> {
        self.config
            .connection_string(name)
            .filter(|connection_string| !connection_string.is_empty())
    }

    fn bind_db_context(&mut self, options: DbContextOptions) -> CoreResult<()> {
        let options = Arc::new(options);
        tracing::debug!(
            provider = options.provider.name(),
            context = options.context_type,
            "binding data context"
        );

        self.services.register_shared(Arc::clone(&options))?;
        self.services
            .register_transient::<C, _>(move |_| C::from_options(Arc::clone(&options)))
    }
}

impl<L, C> std::fmt::Debug for ApiBuilder<'_, L, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiBuilder")
            .field("ledger", &self.ledger)
            .field("service_type", &self.service_type.get())
            .finish()
    }
}

/// Register localization, logging, the SQL Server context and identity with `api_config`
///
/// Returns the builder so the remaining steps can be chained.
pub fn add_core_services<L: 'static, C: DbContext>(
    services: &mut ServiceRegistry,
    config: Arc<Configuration>,
    api_config: ApiConfig,
) -> CoreResult<ApiBuilder<'_, L, C>> {
    let mut builder = ApiBuilder::new(services, config)?;
    builder
        .add_localization(Some(api_config.localization_options))?
        .add_logging(Some(api_config.console_logger_options))?
        .add_sql_server()?
        .add_identity(Some(api_config.identity_options))?;
    Ok(builder)
}
