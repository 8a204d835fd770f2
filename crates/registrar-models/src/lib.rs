//! # Registrar Models
//!
//! Data structures shared by the Registrar API.
//!
//! - [`identity`]: the per-request caller identity
//! - [`students`]: student records, request payloads and filters
//! - [`common`]: small response envelopes
//!
//! Request DTOs mirror what clients send: every field is optional and the
//! HTTP layer performs no validation. Rules about required fields and allowed
//! values belong to the student service.

pub mod common;
pub mod identity;
pub mod students;

pub use common::MessageResponse;
pub use identity::{IdentityKind, RequestIdentity};
pub use students::{
    Student, StudentListQuery, StudentListResponse, StudentPayload, StudentStatus,
    StudentStatusChange, StudentStatusDto, StudentUpdate,
};
