use crate::config::{ApiConfigKeys, Configuration};
use crate::errors::{CoreError, CoreResult};
use crate::logging::LogProvider;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, Level};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Programmatic options for the console provider
#[derive(Debug, Clone)]
pub struct ConsoleLoggerOptions {
    /// Strip ANSI colours from console output
    pub disable_colors: bool,
    /// `strftime` pattern for the timestamp; `None` omits it
    pub timestamp_format: Option<String>,
    /// Events at this level or more severe go to stderr instead of stdout
    pub log_to_standard_error_threshold: Option<Level>,
    /// Print the event target next to the message
    pub include_target: bool,
}

impl Default for ConsoleLoggerOptions {
    fn default() -> Self {
        Self {
            disable_colors: false,
            timestamp_format: None,
            log_to_standard_error_threshold: None,
            include_target: true,
        }
    }
}

/// Owns the logging dispatch built from configuration
#[derive(Debug, Clone)]
pub struct LoggerFactory {
    dispatch: Dispatch,
    providers: Vec<LogProvider>,
    directives: String,
}

impl LoggerFactory {
    /// Build the dispatch from the `Logging` section
    ///
    /// An unrecognized `Logging:LogLevel` value is a [`CoreError::Logging`].
    pub fn from_configuration(config: &Configuration, options: &ConsoleLoggerOptions) -> CoreResult<Self> {
        let providers = LogProvider::parse_list(config.get(ApiConfigKeys::LOGGING_PROVIDER).unwrap_or_default());
        let directives = filter_directives(config)?;

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .parse_lossy(&directives);

        let layers: Vec<BoxedLayer> = providers
            .iter()
            .map(|provider| match provider {
                LogProvider::Console => console_layer(options),
                LogProvider::Debug => tracing_subscriber::fmt::layer()
                    .compact()
                    .with_ansi(false)
                    .with_writer(std::io::stderr)
                    .boxed(),
                LogProvider::EventSource => tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stdout)
                    .boxed(),
            })
            .collect();

        let subscriber = tracing_subscriber::registry().with(layers).with(filter);

        tracing::debug!(
            providers = ?providers,
            filter = %directives,
            "logger factory configured"
        );

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            providers,
            directives,
        })
    }

    /// Providers that produced an output layer
    pub fn providers(&self) -> &[LogProvider] {
        &self.providers
    }

    /// Filter directives derived from `Logging:LogLevel`
    pub fn filter_directives(&self) -> &str {
        &self.directives
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Create a logger for a named category
    pub fn create_logger(&self, category: impl Into<String>) -> Logger {
        Logger {
            category: Arc::from(category.into()),
            dispatch: self.dispatch.clone(),
        }
    }

    /// Create a logger whose category is the type name of `T`
    pub fn create_logger_for<T: ?Sized>(&self) -> Logger {
        self.create_logger(std::any::type_name::<T>())
    }

    /// Make this dispatch the process-wide default
    ///
    /// Fails when another global subscriber is already installed.
    pub fn install_global(&self) -> CoreResult<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone()).map_err(|err| CoreError::logging(err.to_string()))
    }
}

/// A category-tagged handle that emits through the factory dispatch
#[derive(Debug, Clone)]
pub struct Logger {
    category: Arc<str>,
    dispatch: Dispatch,
}

impl Logger {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn trace(&self, message: &str) {
        tracing::dispatcher::with_default(&self.dispatch, || {
            tracing::trace!(category = %self.category, "{}", message)
        });
    }

    pub fn debug(&self, message: &str) {
        tracing::dispatcher::with_default(&self.dispatch, || {
            tracing::debug!(category = %self.category, "{}", message)
        });
    }

    pub fn info(&self, message: &str) {
        tracing::dispatcher::with_default(&self.dispatch, || {
            tracing::info!(category = %self.category, "{}", message)
        });
    }

    pub fn warn(&self, message: &str) {
        tracing::dispatcher::with_default(&self.dispatch, || {
            tracing::warn!(category = %self.category, "{}", message)
        });
    }

    pub fn error(&self, message: &str) {
        tracing::dispatcher::with_default(&self.dispatch, || {
            tracing::error!(category = %self.category, "{}", message)
        });
    }
}

fn console_layer(options: &ConsoleLoggerOptions) -> BoxedLayer {
    let writer = match options.log_to_standard_error_threshold {
        Some(threshold) => BoxMakeWriter::new(std::io::stderr.with_max_level(threshold).or_else(std::io::stdout)),
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(!options.disable_colors)
        .with_target(options.include_target)
        .with_writer(writer);

    match &options.timestamp_format {
        Some(format) => layer.with_timer(ChronoLocal::new(format.clone())).boxed(),
        None => layer.without_time().boxed(),
    }
}

/// Translate `Logging:LogLevel` entries into `EnvFilter` directives
///
/// `Default` is the base level; any other entry is a category, with `.`
/// separators mapped to `::` module paths.
fn filter_directives(config: &Configuration) -> CoreResult<String> {
    let levels = config.section(ApiConfigKeys::LOGGING_LOG_LEVEL);
    let mut directives = Vec::new();

    if let Some(value) = levels.get("Default") {
        directives.push(directive_level("Default", value)?.to_string());
    }

    for (category, value) in levels.entries() {
        if category == "Default" || category.contains(':') {
            continue;
        }
        let level = directive_level(category, value)?;
        directives.push(format!("{}={}", category.replace('.', "::"), level));
    }

    Ok(directives.join(","))
}

fn directive_level(category: &str, value: &str) -> CoreResult<&'static str> {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "information" | "info" => Ok("info"),
        "warning" | "warn" => Ok("warn"),
        "error" | "critical" => Ok("error"),
        "none" | "off" => Ok("off"),
        _ => Err(CoreError::logging(format!(
            "unknown log level '{}' for category '{}'",
            value, category
        ))),
    }
}
