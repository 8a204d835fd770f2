//! Internal-service authentication dispatch.
//!
//! Requests carrying the configured shared secret in `x-api-key` are accepted
//! as the internal service without touching the token authenticator. Every
//! other request (no header, wrong key, non-ASCII value, bypass disabled) is
//! passed unchanged to the delegated [`TokenAuthenticator`].

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use constant_time_eq::constant_time_eq;
use tracing::debug;

use registrar_config::ServiceAuthConfig;
use registrar_models::RequestIdentity;

use crate::metrics::track_auth_method;
use crate::middleware::auth::{TokenAuthenticator, attach_identity};
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

pub async fn authenticate_service(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let presented_key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if is_internal_service_key(&state.service_auth, presented_key) {
        debug!("Internal service request; skipping token authentication");
        track_auth_method("service_key");
        attach_identity(&mut req, RequestIdentity::internal_service());
        return next.run(req).await;
    }

    track_auth_method("token");
    state.token_authenticator.authenticate(req, next).await
}

/// Exact match of the presented key against the configured secret.
///
/// An empty header never matches, and nothing matches while no secret is
/// configured.
pub fn is_internal_service_key(config: &ServiceAuthConfig, presented: Option<&str>) -> bool {
    match (config.internal_api_key(), presented) {
        (Some(expected), Some(key)) if !key.is_empty() => {
            constant_time_eq(expected.as_bytes(), key.as_bytes())
        }
        _ => false,
    }
}
