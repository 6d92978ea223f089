//! Caller requests and their validation

mod data;
mod validate;
pub mod loader;

pub use data::{AgeSpan, ProjectionRequest, TargetRequest, ValidatedRequest, ValidatedTarget};
pub use loader::{load_requests, load_requests_from_reader, RequestRow};
pub use validate::{whole_years, Validator};
