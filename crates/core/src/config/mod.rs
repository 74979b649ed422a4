pub mod builder;
pub mod configuration;
pub mod connection;
pub mod keys;
pub mod service_type;
pub mod sources;

pub use builder::ConfigurationBuilder;
pub use configuration::{ConfigSection, Configuration};
pub use connection::CosmosConnectionString;
pub use keys::ApiConfigKeys;
pub use service_type::ServiceType;
pub use sources::ConfigSource;
