//! Roles and access-token claims.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role carried by a request identity.
///
/// `Service` is reserved for the internal-service bypass; every other role is
/// issued to users inside their access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Service,
    Admin,
    Teacher,
    Student,
    Parent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Service => "service",
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Service).unwrap(), r#""service""#);
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), r#""teacher""#);
    }

    #[test]
    fn test_role_display_matches_serde() {
        for role in [
            Role::Service,
            Role::Admin,
            Role::Teacher,
            Role::Student,
            Role::Parent,
        ] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role));
        }
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":"7","email":"admin@school.test","role":"admin","exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp, 9999999999);
    }

    #[test]
    fn test_claims_unknown_role_rejected() {
        let json = r#"{"sub":"7","email":"a@b.test","role":"janitor","exp":1,"iat":1}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }
}
