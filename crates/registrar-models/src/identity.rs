//! Caller identity attached to each authenticated request.

use registrar_auth::{Claims, Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How the caller authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    /// Another backend presenting the shared internal-service key.
    Internal,
    /// A person presenting a bearer token.
    User,
}

/// Identity established by authentication and read by handlers.
///
/// Lives only for the request it was attached to; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RequestIdentity {
    pub id: String,
    pub role: Role,
    #[serde(rename = "type")]
    pub kind: IdentityKind,
}

impl RequestIdentity {
    pub const SERVICE_ID: &'static str = "service";

    /// The fixed identity granted to internal-service callers.
    pub fn internal_service() -> Self {
        Self {
            id: Self::SERVICE_ID.to_string(),
            role: Role::Service,
            kind: IdentityKind::Internal,
        }
    }

    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub.clone(),
            role: claims.role,
            kind: IdentityKind::User,
        }
    }
}
