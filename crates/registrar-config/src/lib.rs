//! # Registrar Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: bearer token verification settings
//! - [`service_auth`]: the shared secret for internal-service requests
//! - [`cors`]: allowed browser origins
//! - [`server`]: listen addresses
//!
//! Call `dotenvy::dotenv()` before any `from_env()` so a local `.env` file is
//! honoured.
//!
//! # Example
//!
//! ```ignore
//! use registrar_config::{CorsConfig, JwtConfig, ServerConfig, ServiceAuthConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let service_auth = ServiceAuthConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;
pub mod service_auth;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use service_auth::ServiceAuthConfig;
