use crate::describe::Described;
use std::fmt;

/// Which storage or transport strategy backs the business services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    /// Entity-framework style data access against a database
    ServiceEf,
    /// Remote calls through an HTTP client
    ServiceHttp,
    /// In-process mock data
    ServiceMock,
}

impl Described for ServiceType {
    const DESCRIPTIONS: &'static [(Self, &'static str)] = &[
        (ServiceType::ServiceEf, "ServiceEF"),
        (ServiceType::ServiceHttp, "ServiceHttp"),
        (ServiceType::ServiceMock, "ServiceMock"),
    ];
}

impl ServiceType {
    pub fn is_entity_framework(&self) -> bool {
        matches!(self, ServiceType::ServiceEf)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::errors::CoreError;

    fn resolve(value: Option<&str>) -> Result<ServiceType, CoreError> {
        let pairs: Vec<(&str, &str)> = value.map(|v| ("ServiceType", v)).into_iter().collect();
        Configuration::from_pairs(pairs).service_type()
    }

    #[test]
    fn test_known_descriptions() {
        assert_eq!(resolve(Some("ServiceEF")).unwrap(), ServiceType::ServiceEf);
        assert_eq!(resolve(Some("ServiceHttp")).unwrap(), ServiceType::ServiceHttp);
        assert_eq!(resolve(Some("ServiceMock")).unwrap(), ServiceType::ServiceMock);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(resolve(Some("serviceef")).unwrap(), ServiceType::ServiceEf);
        assert_eq!(resolve(Some("SERVICEMOCK")).unwrap(), ServiceType::ServiceMock);
    }

    #[test]
    fn test_missing_or_empty() {
        assert!(matches!(resolve(None), Err(CoreError::MissingConfig { ref key }) if key == "ServiceType"));
        assert!(matches!(resolve(Some("")), Err(CoreError::MissingConfig { .. })));
    }

    #[test]
    fn test_invalid_value_is_named() {
        match resolve(Some("bogus")) {
            Err(CoreError::InvalidConfig { key, value }) => {
                assert_eq!(key, "ServiceType");
                assert_eq!(value, "bogus");
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_display_uses_description() {
        assert_eq!(ServiceType::ServiceEf.to_string(), "ServiceEF");
    }
}
