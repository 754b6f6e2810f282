//! # API Shared
//!
//! Shared wire definitions for the NeoLung questionnaire APIs.
//!
//! Contains:
//! - Request/response bodies for `/api/questionnaire` (`wire` module)
//! - The anonymized record shape served to research consumers
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` on the server side and `neolung-client` on the client side, so both ends
//! agree on field names without depending on each other.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
