use crate::config::keys::{combine, ApiConfigKeys, KEY_DELIMITER};
use crate::config::{ConfigSource, ServiceType};
use crate::describe::Described;
use crate::errors::CoreError;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Immutable, hierarchical key/value configuration
///
/// Keys are flattened with `:` between levels (`Logging:LogLevel:Default`)
/// and matched exactly, including case.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    values: BTreeMap<String, String>,
    sources: Vec<ConfigSource>,
}

impl Configuration {
    /// Create a configuration from already flattened pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            sources: vec![ConfigSource::Programmatic],
        }
    }

    pub(crate) fn from_layers(values: BTreeMap<String, String>, sources: Vec<ConfigSource>) -> Self {
        Self { values, sources }
    }

    /// Look up a value by its full key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up a value and parse it
    pub fn get_value<T>(&self, key: &str) -> Result<Option<T>, CoreError>
    where
        T: FromStr,
    {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|_| CoreError::invalid_config(key, raw)),
        }
    }

    /// Get the sub-section rooted at `key`
    pub fn section(&self, key: &str) -> ConfigSection<'_> {
        ConfigSection {
            config: self,
            path: key.to_string(),
        }
    }

    /// Look up a named connection string under `ConnectionStrings`
    pub fn connection_string(&self, name: &str) -> Option<&str> {
        self.get(&combine(ApiConfigKeys::CONNECTION_STRINGS, name))
    }

    /// Resolve the backend kind configured under `ServiceType`
    pub fn service_type(&self) -> Result<ServiceType, CoreError> {
        let key = ApiConfigKeys::SERVICE_TYPE;
        let value = match self.get(key) {
            Some(value) if !value.is_empty() => value,
            _ => return Err(CoreError::missing_config(key)),
        };

        ServiceType::from_description(value).ok_or_else(|| CoreError::invalid_config(key, value))
    }

    /// Number of flattened keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate every flattened pair in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The layers this configuration was built from, in load order
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }
}

/// A view over the keys below a path of a [`Configuration`]
#[derive(Debug, Clone)]
pub struct ConfigSection<'a> {
    config: &'a Configuration,
    path: String,
}

impl<'a> ConfigSection<'a> {
    /// Full path of this section
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last segment of the path
    pub fn key(&self) -> &str {
        self.path.rsplit(KEY_DELIMITER).next().unwrap_or_default()
    }

    /// Value stored directly at the section path
    pub fn value(&self) -> Option<&'a str> {
        self.config.get(&self.path)
    }

    /// Look up a value relative to this section
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.config.get(&combine(&self.path, key))
    }

    /// Nested section relative to this one
    pub fn section(&self, key: &str) -> ConfigSection<'a> {
        ConfigSection {
            config: self.config,
            path: combine(&self.path, key),
        }
    }

    /// Whether the section has a value or any descendant keys
    pub fn exists(&self) -> bool {
        self.value().is_some() || self.entries().next().is_some()
    }

    /// Every descendant pair, keyed relative to this section
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        let prefix = format!("{}{}", self.path, KEY_DELIMITER);
        self.config
            .values
            .iter()
            .filter_map(move |(k, v)| k.strip_prefix(prefix.as_str()).map(|rest| (rest, v.as_str())))
    }

    /// Names of the immediate children, deduplicated and in key order
    pub fn children(&self) -> Vec<String> {
        // Keys are sorted, so entries sharing a head are adjacent
        let mut names: Vec<String> = self
            .entries()
            .map(|(relative, _)| relative.split(KEY_DELIMITER).next().unwrap_or_default().to_string())
            .collect();
        names.dedup();
        names
    }
}
