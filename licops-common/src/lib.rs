//! # LicOps Common Library
//!
//! Shared code for the LicOps services including:
//! - Domain model (IntakeRecord, DataType, RiskLevel, DealStatus)
//! - Common error types
//! - Configuration loading

pub mod config;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{DataType, DealStatus, ExtractedFields, IntakeRecord, RiskLevel, UNKNOWN_PARTNER};
