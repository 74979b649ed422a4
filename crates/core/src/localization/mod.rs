pub mod localizer;
pub mod resources;

pub use localizer::{LocalizationOptions, StringLocalizer, StringLocalizerFactory};
pub use resources::{format_resource, ServiceResources};
