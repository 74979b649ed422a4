use std::path::PathBuf;

/// One layer of a [`Configuration`](crate::config::Configuration), kept for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Pairs supplied in code
    Programmatic,
    /// Inline JSON document
    Json,
    /// JSON file on disk
    JsonFile { path: PathBuf, optional: bool },
    /// YAML file on disk
    YamlFile { path: PathBuf, optional: bool },
    /// Process environment, optionally filtered by prefix
    EnvVars { prefix: Option<String> },
}

impl ConfigSource {
    /// Check if source is environment variables
    pub fn is_env_var(&self) -> bool {
        matches!(self, ConfigSource::EnvVars { .. })
    }

    /// Check if source is a file
    pub fn is_file(&self) -> bool {
        matches!(self, ConfigSource::JsonFile { .. } | ConfigSource::YamlFile { .. })
    }

    /// Get source description
    pub fn description(&self) -> String {
        match self {
            ConfigSource::Programmatic => "Programmatically set".to_string(),
            ConfigSource::Json => "Inline JSON".to_string(),
            ConfigSource::JsonFile { path, .. } => format!("JSON file: {}", path.display()),
            ConfigSource::YamlFile { path, .. } => format!("YAML file: {}", path.display()),
            ConfigSource::EnvVars { prefix: Some(prefix) } => format!("Environment variables: {}*", prefix),
            ConfigSource::EnvVars { prefix: None } => "Environment variables".to_string(),
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
