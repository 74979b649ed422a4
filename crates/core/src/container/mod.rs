pub mod registry;
pub mod scope;

pub use registry::{Factory, ServiceEntry, ServiceRegistry};
pub use scope::ServiceScope;
