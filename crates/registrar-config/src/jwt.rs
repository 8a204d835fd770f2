use std::env;

use anyhow::{Context, bail};

const DEFAULT_ACCESS_EXPIRY: i64 = 3600; // 1 hour

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    /// Fails when `JWT_SECRET` is unset or blank; there is no fallback secret.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_values(
            env::var("JWT_SECRET").ok(),
            env::var("JWT_ACCESS_EXPIRY").ok(),
        )
    }

    fn from_values(secret: Option<String>, expiry: Option<String>) -> anyhow::Result<Self> {
        let secret = match secret {
            Some(secret) if !secret.trim().is_empty() => secret,
            _ => bail!("JWT_SECRET must be set"),
        };

        let access_token_expiry = match expiry.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_ACCESS_EXPIRY,
            Some(raw) => raw.parse().with_context(|| {
                format!("JWT_ACCESS_EXPIRY must be a number of seconds, got {}", raw)
            })?,
        };

        Ok(Self {
            secret,
            access_token_expiry,
        })
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_secret_is_an_error() {
        assert!(JwtConfig::from_values(None, None).is_err());
        assert!(JwtConfig::from_values(Some("   ".to_string()), None).is_err());
    }

    #[test]
    fn test_default_expiry() {
        let config = JwtConfig::from_values(Some("s3cret".to_string()), None).unwrap();
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.access_token_expiry, 3600);
    }

    #[test]
    fn test_explicit_expiry() {
        let config =
            JwtConfig::from_values(Some("s3cret".to_string()), Some("900".to_string())).unwrap();
        assert_eq!(config.access_token_expiry, 900);

        assert!(
            JwtConfig::from_values(Some("s3cret".to_string()), Some("soon".to_string())).is_err()
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = JwtConfig::from_values(Some("s3cret".to_string()), None).unwrap();
        assert!(!format!("{:?}", config).contains("s3cret"));
    }
}
