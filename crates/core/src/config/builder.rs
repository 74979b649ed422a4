use crate::config::keys::combine;
use crate::config::{ConfigSource, Configuration};
use crate::errors::CoreError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Separator used by environment variables in place of `:`
const ENV_DELIMITER: &str = "__";

enum Layer {
    Pairs(Vec<(String, String)>),
    Json(String),
    JsonFile { path: PathBuf, optional: bool },
    YamlFile { path: PathBuf, optional: bool },
    EnvVars { prefix: Option<String> },
}

/// Layered builder for [`Configuration`]
///
/// Layers are applied in the order they were added; a key defined by a
/// later layer replaces the earlier value.
#[derive(Default)]
pub struct ConfigurationBuilder {
    layers: Vec<Layer>,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add already flattened key/value pairs
    pub fn add_in_memory<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let pairs = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.layers.push(Layer::Pairs(pairs));
        self
    }

    /// Add an inline JSON document
    pub fn add_json_str(mut self, json: impl Into<String>) -> Self {
        self.layers.push(Layer::Json(json.into()));
        self
    }

    /// Add a JSON file; a missing optional file is skipped
    pub fn add_json_file(mut self, path: impl AsRef<Path>, optional: bool) -> Self {
        self.layers.push(Layer::JsonFile {
            path: path.as_ref().to_path_buf(),
            optional,
        });
        self
    }

    /// Add a YAML file; a missing optional file is skipped
    pub fn add_yaml_file(mut self, path: impl AsRef<Path>, optional: bool) -> Self {
        self.layers.push(Layer::YamlFile {
            path: path.as_ref().to_path_buf(),
            optional,
        });
        self
    }

    /// Add process environment variables, `__` standing for `:`
    ///
    /// With a prefix only matching variables are read and the prefix is
    /// stripped from the key.
    pub fn add_env_vars(mut self, prefix: Option<&str>) -> Self {
        self.layers.push(Layer::EnvVars {
            prefix: prefix.map(str::to_string),
        });
        self
    }

    /// Load every layer and flatten it into a [`Configuration`]
    pub fn build(self) -> Result<Configuration, CoreError> {
        let mut values = BTreeMap::new();
        let mut sources = Vec::with_capacity(self.layers.len());

        for layer in self.layers {
            match layer {
                Layer::Pairs(pairs) => {
                    values.extend(pairs);
                    sources.push(ConfigSource::Programmatic);
                }
                Layer::Json(json) => {
                    let document: Value = serde_json::from_str(&json)?;
                    flatten_into(&mut values, "", &document);
                    sources.push(ConfigSource::Json);
                }
                Layer::JsonFile { path, optional } => {
                    if let Some(content) = read_layer(&path, optional)? {
                        let document: Value = serde_json::from_str(&content)?;
                        flatten_into(&mut values, "", &document);
                        sources.push(ConfigSource::JsonFile { path, optional });
                    }
                }
                Layer::YamlFile { path, optional } => {
                    if let Some(content) = read_layer(&path, optional)? {
                        let document: serde_yaml::Value = serde_yaml::from_str(&content)?;
                        let document = serde_json::to_value(document)?;
                        flatten_into(&mut values, "", &document);
                        sources.push(ConfigSource::YamlFile { path, optional });
                    }
                }
                Layer::EnvVars { prefix } => {
                    values.extend(env_pairs(utf8_vars(std::env::vars_os()), prefix.as_deref()));
                    sources.push(ConfigSource::EnvVars { prefix });
                }
            }
        }

        tracing::debug!(keys = values.len(), layers = sources.len(), "configuration built");
        Ok(Configuration::from_layers(values, sources))
    }
}

fn read_layer(path: &Path, optional: bool) -> Result<Option<String>, CoreError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if optional && err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Drop variables whose name or value is not valid UTF-8
fn utf8_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter().filter_map(|(key, value)| {
        let key = key.into_string().ok()?;
        let value = value.into_string().ok()?;
        Some((key, value))
    })
}

/// Map environment variables to configuration keys
fn env_pairs<I>(vars: I, prefix: Option<&str>) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (String, String)>,
{
    vars.into_iter()
        .filter_map(|(name, value)| {
            let key = match prefix {
                Some(prefix) => name.strip_prefix(prefix)?.to_string(),
                None => name,
            };
            if key.is_empty() {
                return None;
            }
            Some((key.replace(ENV_DELIMITER, ":"), value))
        })
        .collect()
}

/// Flatten a JSON tree into `:` separated keys
fn flatten_into(values: &mut BTreeMap<String, String>, prefix: &str, node: &Value) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(values, &combine(prefix, key), child);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(values, &combine(prefix, &index.to_string()), child);
            }
        }
        Value::String(s) => {
            values.insert(prefix.to_string(), s.clone());
        }
        Value::Null => {
            values.insert(prefix.to_string(), String::new());
        }
        other => {
            values.insert(prefix.to_string(), other.to_string());
        }
    }
}
