//! Student data models and DTOs.
//!
//! Re-exports the student models from the `registrar-models` crate.

pub use registrar_models::common::MessageResponse;
pub use registrar_models::students::*;
