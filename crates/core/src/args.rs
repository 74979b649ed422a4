use crate::config::Configuration;
use crate::container::ServiceRegistry;
use crate::data::DbContext;
use crate::errors::CoreResult;
use crate::localization::StringLocalizerFactory;
use crate::logging::{Logger, LoggerFactory};
use crate::mapper::Mapper;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

/// Collaborators every business service is constructed with
///
/// `L` names the logger category.
pub struct ServiceArgs<L> {
    pub services: ServiceRegistry,
    pub config: Arc<Configuration>,
    pub logger: Logger,
    pub mapper: Arc<Mapper>,
    pub localizer_factory: Arc<StringLocalizerFactory>,
    category: PhantomData<fn() -> L>,
}

impl<L: 'static> ServiceArgs<L> {
    /// Resolve the bundle from registered services
    pub fn from_registry(services: &ServiceRegistry) -> CoreResult<Self> {
        let logger = services.resolve::<LoggerFactory>()?.create_logger_for::<L>();
        Ok(Self {
            services: services.clone(),
            config: services.resolve::<Configuration>()?,
            logger,
            mapper: services.resolve::<Mapper>()?,
            localizer_factory: services.resolve::<StringLocalizerFactory>()?,
            category: PhantomData,
        })
    }
}

impl<L> Clone for ServiceArgs<L> {
    fn clone(&self) -> Self {
        Self {
            services: self.services.clone(),
            config: Arc::clone(&self.config),
            logger: self.logger.clone(),
            mapper: Arc::clone(&self.mapper),
            localizer_factory: Arc::clone(&self.localizer_factory),
            category: PhantomData,
        }
    }
}

impl<L> std::fmt::Debug for ServiceArgs<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceArgs")
            .field("category", &self.logger.category())
            .field("services", &self.services.service_count())
            .finish()
    }
}

/// Service arguments plus the data context for the entity framework backend
pub struct ServiceArgsEf<L, C> {
    pub args: ServiceArgs<L>,
    pub db_context: Arc<C>,
}

impl<L: 'static, C: DbContext> ServiceArgsEf<L, C> {
    pub fn from_registry(services: &ServiceRegistry) -> CoreResult<Self> {
        Ok(Self {
            args: ServiceArgs::from_registry(services)?,
            db_context: services.resolve::<C>()?,
        })
    }
}

impl<L, C> Deref for ServiceArgsEf<L, C> {
    type Target = ServiceArgs<L>;

    fn deref(&self) -> &Self::Target {
        &self.args
    }
}

impl<L, C> Clone for ServiceArgsEf<L, C> {
    fn clone(&self) -> Self {
        Self {
            args: self.args.clone(),
            db_context: Arc::clone(&self.db_context),
        }
    }
}

impl<L, C> std::fmt::Debug for ServiceArgsEf<L, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceArgsEf")
            .field("args", &self.args)
            .field("db_context", &std::any::type_name::<C>())
            .finish()
    }
}
