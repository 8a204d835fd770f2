//! # Registrar Core
//!
//! Foundational types shared by every Registrar crate.
//!
//! - [`errors`]: the application error type and its HTTP rendering
//!
//! # Example
//!
//! ```ignore
//! use registrar_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//! ```

pub mod errors;

pub use errors::{AppError, ErrorResponse};
