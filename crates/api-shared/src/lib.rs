//! # API Shared
//!
//! Wire types and shared services for the clinic portal APIs.
//!
//! Contains:
//! - Request/response DTOs with OpenAPI schemas (`dto` module)
//! - `HealthService`
//!
//! Field names are camelCase on the wire, matching what the portal front-end sends and expects.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
