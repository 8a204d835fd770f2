//! Internal-service authentication settings.
//!
//! Other backends in the deployment (report generators, schedulers) call this
//! API with a shared secret in the `x-api-key` header instead of a user token.
//! The secret is read from `INTERNAL_SERVICE_API_KEY`.

use std::env;

#[derive(Clone, Default)]
pub struct ServiceAuthConfig {
    internal_api_key: Option<String>,
}

impl ServiceAuthConfig {
    /// An unset or blank secret disables the internal-service bypass.
    pub fn new(internal_api_key: Option<String>) -> Self {
        Self {
            internal_api_key: internal_api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(env::var("INTERNAL_SERVICE_API_KEY").ok())
    }

    pub fn internal_api_key(&self) -> Option<&str> {
        self.internal_api_key.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.internal_api_key.is_some()
    }
}

// Never print the secret itself.
impl std::fmt::Debug for ServiceAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAuthConfig")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_key() {
        let config = ServiceAuthConfig::new(Some("SECRET123".to_string()));
        assert!(config.is_enabled());
        assert_eq!(config.internal_api_key(), Some("SECRET123"));
    }

    #[test]
    fn test_missing_key_disables_bypass() {
        let config = ServiceAuthConfig::new(None);
        assert!(!config.is_enabled());
        assert_eq!(config.internal_api_key(), None);
    }

    #[test]
    fn test_blank_key_disables_bypass() {
        let config = ServiceAuthConfig::new(Some("   ".to_string()));
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ServiceAuthConfig::new(Some("SECRET123".to_string()));
        let printed = format!("{:?}", config);
        assert!(!printed.contains("SECRET123"));
        assert!(printed.contains("enabled: true"));
    }
}
