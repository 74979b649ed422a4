/// Endpoint and key extracted from a Cosmos DB connection string
///
/// The string is a `;` separated list of `Name=Value` pairs; names are
/// matched case-insensitively and values may themselves contain `=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CosmosConnectionString {
    pub service_endpoint: Option<String>,
    pub auth_key: Option<String>,
}

impl CosmosConnectionString {
    pub fn parse(connection_string: &str) -> Self {
        let mut parsed = Self::default();

        for pair in connection_string.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"').to_string();
            match name.trim().to_ascii_lowercase().as_str() {
                "accountendpoint" => parsed.service_endpoint = Some(value),
                "accountkey" => parsed.auth_key = Some(value),
                _ => {}
            }
        }

        parsed
    }
}
