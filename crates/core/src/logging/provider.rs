use crate::describe::Described;

/// Log outputs that can be listed under `Logging:Provider`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogProvider {
    /// Human readable lines on stdout
    Console,
    /// Compact, uncoloured lines on stderr
    Debug,
    /// Structured JSON events on stdout
    EventSource,
}

impl Described for LogProvider {
    const DESCRIPTIONS: &'static [(Self, &'static str)] = &[
        (LogProvider::Console, "console"),
        (LogProvider::Debug, "debug"),
        (LogProvider::EventSource, "eventsource"),
    ];
}

impl LogProvider {
    /// Parse a comma separated provider list
    ///
    /// Tokens are trimmed and compared without case; empty and unknown
    /// tokens are dropped, duplicates collapse to one entry.
    pub fn parse_list(raw: &str) -> Vec<LogProvider> {
        let mut providers = Vec::new();
        for token in raw.split(',').map(str::trim).filter(|token| !token.is_empty()) {
            match LogProvider::from_description(token) {
                Some(provider) if !providers.contains(&provider) => providers.push(provider),
                Some(_) => {}
                None => tracing::warn!(provider = token, "ignoring unknown log provider"),
            }
        }
        providers
    }
}
