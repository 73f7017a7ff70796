//! # API Shared
//!
//! Shared definitions for the doclist HTTP surface.
//!
//! Contains:
//! - Response types (`responses` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the `doclist-run` binary.

pub mod health;
pub mod responses;

pub use health::HealthService;
pub use responses::*;
