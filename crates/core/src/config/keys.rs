/// Key conventions read from the configuration source
pub struct ApiConfigKeys;

impl ApiConfigKeys {
    /// Key where the service type is defined
    pub const SERVICE_TYPE: &'static str = "ServiceType";

    /// Section holding the logging configuration
    pub const LOGGING: &'static str = "Logging";

    /// Comma separated list of log providers
    pub const LOGGING_PROVIDER: &'static str = "Logging:Provider";

    /// Section holding per-category log levels
    pub const LOGGING_LOG_LEVEL: &'static str = "Logging:LogLevel";

    /// Section holding named connection strings
    pub const CONNECTION_STRINGS: &'static str = "ConnectionStrings";

    pub const SQL_SERVER_CONNECTION_STRING_NAME: &'static str = "SqlServer";

    pub const ASP_NET_IDENTITY_CONNECTION_STRING_NAME: &'static str = "AspNetIdentity";

    pub const COSMOS_DB_CONNECTION_STRING_NAME: &'static str = "CosmosDb";

    pub const COSMOS_DB_DATABASE_NAME: &'static str = "CosmosDb:DatabaseName";
}

/// Separator between levels of a hierarchical key
pub const KEY_DELIMITER: &str = ":";

/// Join two key segments with the hierarchy separator
pub fn combine(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else if key.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}{KEY_DELIMITER}{key}")
    }
}
