use crate::localization::LocalizationOptions;
use crate::logging::ConsoleLoggerOptions;
use std::collections::HashMap;
use std::time::Duration;

/// Options for the identity system
///
/// Each group left as `None` keeps the framework default when the options
/// are registered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityOptions {
    pub claims_identity: Option<ClaimsIdentityOptions>,
    pub user: Option<UserOptions>,
    pub password: Option<PasswordOptions>,
    pub lockout: Option<LockoutOptions>,
    pub sign_in: Option<SignInOptions>,
    pub tokens: Option<TokenOptions>,
    pub stores: Option<StoreOptions>,
}

impl IdentityOptions {
    /// Fill every missing group with its default
    pub fn with_defaults(self) -> Self {
        Self {
            claims_identity: Some(self.claims_identity.unwrap_or_default()),
            user: Some(self.user.unwrap_or_default()),
            password: Some(self.password.unwrap_or_default()),
            lockout: Some(self.lockout.unwrap_or_default()),
            sign_in: Some(self.sign_in.unwrap_or_default()),
            tokens: Some(self.tokens.unwrap_or_default()),
            stores: Some(self.stores.unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimsIdentityOptions {
    pub role_claim_type: String,
    pub user_name_claim_type: String,
    pub user_id_claim_type: String,
    pub security_stamp_claim_type: String,
}

impl Default for ClaimsIdentityOptions {
    fn default() -> Self {
        Self {
            role_claim_type: "http://schemas.microsoft.com/ws/2008/06/identity/claims/role".to_string(),
            user_name_claim_type: "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name".to_string(),
            user_id_claim_type: "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier".to_string(),
            security_stamp_claim_type: "AspNet.Identity.SecurityStamp".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOptions {
    pub allowed_user_name_characters: String,
    pub require_unique_email: bool,
}

impl Default for UserOptions {
    fn default() -> Self {
        Self {
            allowed_user_name_characters: "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-._@+".to_string(),
            require_unique_email: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordOptions {
    pub required_length: usize,
    pub required_unique_chars: usize,
    pub require_non_alphanumeric: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_digit: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            required_length: 6,
            required_unique_chars: 1,
            require_non_alphanumeric: true,
            require_lowercase: true,
            require_uppercase: true,
            require_digit: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockoutOptions {
    pub allowed_for_new_users: bool,
    pub max_failed_access_attempts: u32,
    pub default_lockout_time_span: Duration,
}

impl Default for LockoutOptions {
    fn default() -> Self {
        Self {
            allowed_for_new_users: true,
            max_failed_access_attempts: 5,
            default_lockout_time_span: Duration::from_secs(5 * 60),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInOptions {
    pub require_confirmed_email: bool,
    pub require_confirmed_phone_number: bool,
    pub require_confirmed_account: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOptions {
    /// Token provider name to provider type name
    pub provider_map: HashMap<String, String>,
    pub email_confirmation_token_provider: String,
    pub password_reset_token_provider: String,
    pub change_email_token_provider: String,
    pub change_phone_number_token_provider: String,
    pub authenticator_token_provider: String,
    pub authenticator_issuer: String,
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            provider_map: HashMap::new(),
            email_confirmation_token_provider: "Default".to_string(),
            password_reset_token_provider: "Default".to_string(),
            change_email_token_provider: "Default".to_string(),
            change_phone_number_token_provider: "Phone".to_string(),
            authenticator_token_provider: "Authenticator".to_string(),
            authenticator_issuer: "Microsoft.AspNetCore.Identity.UI".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Zero means no limit
    pub max_length_for_keys: usize,
    pub protect_personal_data: bool,
}

/// Request pipeline behaviour toggled by the validators step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApiBehaviorOptions {
    /// Leave invalid models to the service validators instead of rejecting them up front
    pub suppress_model_state_invalid_filter: bool,
}

/// Defaults used by [`add_core_services`](super::add_core_services)
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub localization_options: LocalizationOptions,
    pub console_logger_options: ConsoleLoggerOptions,
    pub identity_options: IdentityOptions,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            localization_options: LocalizationOptions::default(),
            console_logger_options: ConsoleLoggerOptions {
                timestamp_format: Some("[%Y-%m-%d %H:%M:%S]".to_string()),
                ..ConsoleLoggerOptions::default()
            },
            identity_options: IdentityOptions {
                user: Some(UserOptions {
                    allowed_user_name_characters: "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789#$^+=!*()@%&"
                        .to_string(),
                    require_unique_email: true,
                }),
                password: Some(PasswordOptions {
                    required_length: 8,
                    ..PasswordOptions::default()
                }),
                sign_in: Some(SignInOptions {
                    require_confirmed_email: true,
                    require_confirmed_account: true,
                    ..SignInOptions::default()
                }),
                ..IdentityOptions::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_defaults_keeps_supplied_groups() {
        let options = IdentityOptions {
            password: Some(PasswordOptions {
                required_length: 12,
                ..PasswordOptions::default()
            }),
            ..IdentityOptions::default()
        }
        .with_defaults();

        assert_eq!(options.password.as_ref().map(|p| p.required_length), Some(12));
        assert_eq!(options.lockout, Some(LockoutOptions::default()));
        assert_eq!(options.user.map(|u| u.require_unique_email), Some(false));
    }

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.localization_options.resources_path.to_str(), Some("Resources"));
        assert_eq!(
            config.console_logger_options.timestamp_format.as_deref(),
            Some("[%Y-%m-%d %H:%M:%S]")
        );

        let identity = config.identity_options;
        assert!(identity.user.as_ref().is_some_and(|user| user.require_unique_email));
        assert_eq!(identity.password.map(|p| p.required_length), Some(8));
        let sign_in = identity.sign_in.unwrap_or_default();
        assert!(sign_in.require_confirmed_email && sign_in.require_confirmed_account);
        assert!(!sign_in.require_confirmed_phone_number);
        assert!(identity.tokens.is_none());
    }
}
