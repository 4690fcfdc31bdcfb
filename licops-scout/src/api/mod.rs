//! HTTP API for licops-scout
//!
//! Route groups:
//! - `POST /redundancy`, `GET /catalog` - redundancy check and catalog view
//! - `POST /compliance`, `POST /redact` - source verification and PII redaction
//! - `GET /health` - service health

pub mod compliance;
pub mod health;
pub mod redundancy;

pub use compliance::compliance_routes;
pub use health::health_routes;
pub use redundancy::redundancy_routes;
