//! Data context abstraction for the entity framework backend
//!
//! The registration builder only decides *whether* a data context is bound
//! and with which [`DbContextOptions`]; the persistence engine behind a
//! [`DbContext`] implementation is up to the application.

use crate::errors::CoreResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Storage provider selected during registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbProvider {
    /// Relational store reached through a connection string
    SqlServer { connection_string: String },
    /// Document store addressed by account endpoint, key and database name
    Cosmos {
        service_endpoint: Option<String>,
        auth_key: Option<String>,
        database_name: Option<String>,
    },
}

impl DbProvider {
    pub fn name(&self) -> &'static str {
        match self {
            DbProvider::SqlServer { .. } => "SqlServer",
            DbProvider::Cosmos { .. } => "Cosmos",
        }
    }
}

/// Options a data context is constructed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbContextOptions {
    pub provider: DbProvider,
    /// Type name of the data context these options were registered for
    pub context_type: &'static str,
}

impl DbContextOptions {
    pub fn sql_server<C: ?Sized>(connection_string: impl Into<String>) -> Self {
        Self {
            provider: DbProvider::SqlServer {
                connection_string: connection_string.into(),
            },
            context_type: std::any::type_name::<C>(),
        }
    }

    pub fn cosmos<C: ?Sized>(
        service_endpoint: Option<String>,
        auth_key: Option<String>,
        database_name: Option<String>,
    ) -> Self {
        Self {
            provider: DbProvider::Cosmos {
                service_endpoint,
                auth_key,
                database_name,
            },
            context_type: std::any::type_name::<C>(),
        }
    }
}

/// A unit of persistence work created per resolution
#[async_trait]
pub trait DbContext: Send + Sync + Sized + 'static {
    /// Build a context from the registered options
    fn from_options(options: Arc<DbContextOptions>) -> CoreResult<Self>;

    /// Flush pending changes, returning the number of affected entities
    async fn save_changes(&self) -> CoreResult<usize>;

    /// Stop tracking every entity except those whose key is in `excluded`
    ///
    /// Returns the number of entities detached.
    fn detach_all(&self, excluded: &[&str]) -> usize;
}

/// Change tracking for one entity type
pub trait UnitOfWork<E>: DbContext {
    fn add(&self, entity: E) -> CoreResult<()>;
    fn update(&self, entity: E) -> CoreResult<()>;
    fn remove(&self, entity: E) -> CoreResult<()>;
}

/// Placeholder context for services that never touch a database
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDbContext;

#[async_trait]
impl DbContext for NoDbContext {
    fn from_options(_options: Arc<DbContextOptions>) -> CoreResult<Self> {
        Ok(NoDbContext)
    }

    async fn save_changes(&self) -> CoreResult<usize> {
        Ok(0)
    }

    fn detach_all(&self, _excluded: &[&str]) -> usize {
        0
    }
}

/// Identity stores are kept in the data context `context_type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityStoreOptions {
    pub context_type: &'static str,
}

impl IdentityStoreOptions {
    pub fn for_context<C: ?Sized>() -> Self {
        Self {
            context_type: std::any::type_name::<C>(),
        }
    }
}
