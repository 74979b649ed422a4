pub mod args;
pub mod builder;
pub mod config;
pub mod container;
pub mod data;
pub mod describe;
pub mod errors;
pub mod localization;
pub mod logging;
pub mod mapper;

// Re-export key types for convenience
pub use args::{ServiceArgs, ServiceArgsEf};
pub use builder::{add_core_services, ApiBuilder, ApiConfig, RegistrationLedger, SetupStep};
pub use config::{ApiConfigKeys, Configuration, ConfigurationBuilder, ServiceType};
pub use container::{ServiceRegistry, ServiceScope};
pub use data::{DbContext, DbContextOptions, DbProvider, NoDbContext, UnitOfWork};
pub use describe::Described;
pub use errors::{CoreError, CoreResult};
pub use localization::{ServiceResources, StringLocalizer, StringLocalizerFactory};
pub use logging::{Logger, LoggerFactory};
pub use mapper::{Mapper, MapperConfiguration};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version
pub fn version() -> &'static str {
    VERSION
}
