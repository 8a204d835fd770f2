//! Request authentication.
//!
//! # Modules
//!
//! - [`service_auth`]: the entry middleware; recognizes the internal-service
//!   API key or delegates to token authentication
//! - [`auth`]: the delegated [`TokenAuthenticator`](auth::TokenAuthenticator),
//!   its JWT implementation and the [`AuthIdentity`](auth::AuthIdentity)
//!   extractor
//!
//! # Authentication Flow
//!
//! 1. `authenticate_service` reads `x-api-key`
//! 2. A matching key attaches the fixed internal-service identity and the
//!    request continues without any token check
//! 3. Otherwise the configured `TokenAuthenticator` runs and either attaches
//!    a user identity or answers 401
//! 4. Handlers receive the identity as an explicit `AuthIdentity` argument
//!
//! ```ignore
//! async fn set_status(AuthIdentity(identity): AuthIdentity) -> impl IntoResponse {
//!     // identity.id is the reviewer
//! }
//! ```

pub mod auth;
pub mod service_auth;
