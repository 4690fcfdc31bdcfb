//! Canonical domain model for LicOps
//!
//! The two extraction strategies historically produced slightly different
//! category vocabularies ("Image/Video" vs "Multimodal", "Unstructured Text"
//! vs "Text"). Both are mapped onto one canonical enumeration at the
//! boundary via [`DataType::from_label`]; unknown labels are rejected there
//! rather than stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Canonical data-type categories for licensed datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Text,
    Audio,
    Video,
    Code,
    Image,
    Multimodal,
}

impl DataType {
    /// Map a raw category label onto the canonical enumeration
    ///
    /// Accepts both the model-path vocabulary ("Audio", "Text", "Video",
    /// "Code", "Multimodal") and the rule-based vocabulary ("Image/Video",
    /// "Unstructured Text"), case-insensitively. Returns `None` for labels
    /// outside either vocabulary.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "text" | "unstructured text" => Some(Self::Text),
            "audio" => Some(Self::Audio),
            "video" => Some(Self::Video),
            "code" => Some(Self::Code),
            "image" | "image/video" => Some(Self::Image),
            "multimodal" => Some(Self::Multimodal),
            _ => None,
        }
    }

    /// Canonical display label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::Code => "Code",
            Self::Image => "Image",
            Self::Multimodal => "Multimodal",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk assessment for an inbound licensing inquiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Parse a risk label case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.write_str(s)
    }
}

/// Workflow state of a stored intake record
///
/// Every record starts in `NeedsReview`; transitions happen only through
/// explicit user edits on the record store surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealStatus {
    #[serde(rename = "Needs Review")]
    NeedsReview,
    #[serde(rename = "Legal Clearance")]
    LegalClearance,
    Signed,
}

impl fmt::Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NeedsReview => "Needs Review",
            Self::LegalClearance => "Legal Clearance",
            Self::Signed => "Signed",
        };
        f.write_str(s)
    }
}

/// Sentinel partner name used when no partner is detectable
pub const UNKNOWN_PARTNER: &str = "Unknown Partner";

/// Structured fields produced by an extraction strategy
///
/// An `ExtractedFields` value is complete by construction: every field has
/// been populated or defaulted by the extractor before it reaches the
/// record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub partner_name: String,
    pub data_type: DataType,
    pub risk_level: RiskLevel,
    /// Monetary units; 0 means "undetermined", not "free"
    pub estimated_value: u64,
    /// One-sentence description of the inquiry
    pub summary: String,
}

/// One inbound licensing inquiry, as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeRecord {
    pub id: Uuid,
    pub partner_name: String,
    pub data_type: DataType,
    pub risk_level: RiskLevel,
    pub estimated_value: u64,
    pub summary: String,
    pub status: DealStatus,
    pub created_at: DateTime<Utc>,
}

impl IntakeRecord {
    /// Mint a new record from extracted fields
    ///
    /// Assigns a fresh id, the `NeedsReview` initial status, and the
    /// creation timestamp. Records are created exactly once, here.
    pub fn from_extraction(fields: ExtractedFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            partner_name: fields.partner_name,
            data_type: fields.data_type,
            risk_level: fields.risk_level,
            estimated_value: fields.estimated_value,
            summary: fields.summary,
            status: DealStatus::NeedsReview,
            created_at: Utc::now(),
        }
    }
}
