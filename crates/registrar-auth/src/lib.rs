//! # Registrar Auth
//!
//! Roles, JWT claims and token helpers.
//!
//! - [`claims`]: [`Role`] and the access-token [`Claims`]
//! - [`jwt`]: [`create_access_token`] and [`verify_token`]
//!
//! User tokens are HS256 JWTs signed with `JWT_SECRET`. Internal services do
//! not use tokens at all; they present the shared API key handled by the
//! service-auth middleware in the main crate.
//!
//! # Example
//!
//! ```ignore
//! use registrar_auth::{Role, create_access_token, verify_token};
//! use registrar_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token("7", "admin@school.test", Role::Admin, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, "7");
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, Role};
pub use jwt::{create_access_token, verify_token};
