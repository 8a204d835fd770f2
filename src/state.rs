use std::sync::Arc;

use anyhow::Context;

use registrar_config::{CorsConfig, JwtConfig, ServiceAuthConfig};

use crate::db::init_db_pool;
use crate::middleware::auth::{JwtAuthenticator, TokenAuthenticator};
use crate::modules::students::service::{PgStudentService, StudentService};

/// Shared, immutable application state.
///
/// Cloned into every request; the student service and the token
/// authenticator sit behind trait objects so tests can substitute them.
#[derive(Clone)]
pub struct AppState {
    pub service_auth: ServiceAuthConfig,
    pub cors_config: CorsConfig,
    pub students: Arc<dyn StudentService>,
    pub token_authenticator: Arc<dyn TokenAuthenticator>,
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env().context("Invalid JWT configuration")?;
    let db = init_db_pool().await?;

    Ok(AppState {
        token_authenticator: Arc::new(JwtAuthenticator::new(jwt_config)),
        students: Arc::new(PgStudentService::new(db)),
        service_auth: ServiceAuthConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    })
}
