use crate::errors::{CoreError, CoreResult};
use crate::localization::resources::{format_resource, ServiceResources};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Programmatic configuration for localization
#[derive(Debug, Clone)]
pub struct LocalizationOptions {
    /// Directory holding `<base name>.json` resource files
    pub resources_path: PathBuf,
}

impl Default for LocalizationOptions {
    fn default() -> Self {
        Self {
            resources_path: PathBuf::from("Resources"),
        }
    }
}

/// Creates localizers backed by flat JSON resource files
#[derive(Debug, Clone)]
pub struct StringLocalizerFactory {
    resources_path: PathBuf,
}

impl StringLocalizerFactory {
    pub fn new(resources_path: impl AsRef<Path>) -> Self {
        Self {
            resources_path: resources_path.as_ref().to_path_buf(),
        }
    }

    pub fn resources_path(&self) -> &Path {
        &self.resources_path
    }

    /// Load the localizer for `base_name`
    ///
    /// A missing file yields an empty localizer; a malformed file is an error.
    pub fn create(&self, base_name: &str) -> CoreResult<StringLocalizer> {
        let path = self.resources_path.join(format!("{}.json", base_name));
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|err| CoreError::localization(path.display().to_string(), err.to_string()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no resource file, using an empty localizer");
                HashMap::new()
            }
            Err(err) => return Err(err.into()),
        };

        Ok(StringLocalizer {
            base_name: base_name.to_string(),
            entries,
        })
    }

    /// Load the localizer named after the last path segment of `T`
    pub fn create_for<T: ?Sized>(&self) -> CoreResult<StringLocalizer> {
        let type_name = std::any::type_name::<T>();
        let base_name = type_name
            .split('<')
            .next()
            .and_then(|path| path.rsplit("::").next())
            .unwrap_or(type_name);
        self.create(base_name)
    }
}

/// Resource strings of one base name
#[derive(Debug, Clone, Default)]
pub struct StringLocalizer {
    base_name: String,
    entries: HashMap<String, String>,
}

impl StringLocalizer {
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Raw entry for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Localize `name`, falling back to the built-in service resources
    pub fn localize(&self, name: &str, args: &[&dyn Display]) -> String {
        match self.get(name) {
            Some(template) => format_resource(template, args),
            None => ServiceResources::get(name, args),
        }
    }
}
