use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use registrar_auth::{Role, verify_token};
use registrar_config::JwtConfig;
use registrar_core::AppError;
use registrar_models::RequestIdentity;

use crate::metrics::track_auth_failure;

/// The delegated authentication step.
///
/// Receives the request and the continuation untouched. An implementation
/// either attaches an identity and runs `next`, or answers with its own
/// rejection; nothing upstream inspects the outcome.
#[async_trait]
pub trait TokenAuthenticator: Send + Sync {
    async fn authenticate(&self, req: Request, next: Next) -> Response;
}

/// Bearer JWT authenticator.
pub struct JwtAuthenticator {
    jwt_config: JwtConfig,
}

impl JwtAuthenticator {
    pub fn new(jwt_config: JwtConfig) -> Self {
        Self { jwt_config }
    }

    /// Resolves the identity carried by `Authorization: Bearer <token>`.
    pub fn identify(&self, headers: &HeaderMap) -> Result<RequestIdentity, AppError> {
        let auth_header = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &self.jwt_config)?;

        // The service role belongs to the API-key path only.
        if claims.role == Role::Service {
            return Err(AppError::unauthorized("Invalid or expired token"));
        }

        Ok(RequestIdentity::from_claims(&claims))
    }
}

#[async_trait]
impl TokenAuthenticator for JwtAuthenticator {
    async fn authenticate(&self, mut req: Request, next: Next) -> Response {
        match self.identify(req.headers()) {
            Ok(identity) => {
                debug!(user_id = %identity.id, role = %identity.role, "Token authenticated");
                attach_identity(&mut req, identity);
                next.run(req).await
            }
            Err(err) => {
                track_auth_failure("token");
                err.into_response()
            }
        }
    }
}

/// Stores `identity` in the request extensions.
///
/// An identity that is already attached is kept and `false` is returned;
/// nothing later in the pipeline can replace it.
pub fn attach_identity(req: &mut Request, identity: RequestIdentity) -> bool {
    if let Some(existing) = req.extensions().get::<RequestIdentity>() {
        warn!(
            existing_id = %existing.id,
            rejected_id = %identity.id,
            "Identity already attached; keeping the original"
        );
        return false;
    }

    req.extensions_mut().insert(identity);
    true
}

/// Extractor handing the authenticated identity to a handler.
#[derive(Debug, Clone)]
pub struct AuthIdentity(pub RequestIdentity);

impl<S> FromRequestParts<S> for AuthIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestIdentity>()
            .cloned()
            .map(AuthIdentity)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::HeaderValue;
    use registrar_auth::create_access_token;
    use registrar_models::IdentityKind;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_identify_valid_token() {
        let config = jwt_config();
        let token = create_access_token("7", "admin@school.test", Role::Admin, &config).unwrap();

        let identity = JwtAuthenticator::new(config).identify(&bearer(&token)).unwrap();
        assert_eq!(identity.id, "7");
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.kind, IdentityKind::User);
    }

    #[test]
    fn test_identify_missing_header() {
        let err = JwtAuthenticator::new(jwt_config())
            .identify(&HeaderMap::new())
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.error.to_string(), "Missing authorization header");
    }

    #[test]
    fn test_identify_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));

        let err = JwtAuthenticator::new(jwt_config())
            .identify(&headers)
            .unwrap_err();
        assert_eq!(err.error.to_string(), "Invalid authorization header format");
    }

    #[test]
    fn test_identify_rejects_service_role_token() {
        let config = jwt_config();
        let token =
            create_access_token("service", "svc@school.test", Role::Service, &config).unwrap();

        assert!(JwtAuthenticator::new(config).identify(&bearer(&token)).is_err());
    }

    #[test]
    fn test_attach_identity_never_overwrites() {
        let mut req = Request::new(Body::empty());

        assert!(attach_identity(&mut req, RequestIdentity::internal_service()));

        let user = RequestIdentity {
            id: "7".to_string(),
            role: Role::Admin,
            kind: IdentityKind::User,
        };
        assert!(!attach_identity(&mut req, user));

        let attached = req.extensions().get::<RequestIdentity>().unwrap();
        assert_eq!(attached, &RequestIdentity::internal_service());
    }

    #[tokio::test]
    async fn test_extractor_requires_identity() {
        let (mut parts, _) = Request::new(Body::empty()).into_parts();
        let result = AuthIdentity::from_request_parts(&mut parts, &()).await;
        assert!(result.is_err());

        parts.extensions.insert(RequestIdentity::internal_service());
        let AuthIdentity(identity) = AuthIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(identity.id, "service");
    }
}
