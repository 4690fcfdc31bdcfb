//! Session-scoped record store
//!
//! Append-only, ordered, in-memory. Each interactive session gets its own
//! store; there is no process-wide singleton and no cross-session sharing.
//! Records are appended whole (every field populated) or not at all, and
//! the only in-place mutations allowed are the explicit user edits of
//! `status` and `risk_level`.

use licops_common::{DealStatus, ExtractedFields, IntakeRecord, RiskLevel};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Per-session dashboard summary, computed on demand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    /// Sum of estimated values across all records
    pub total_pipeline_value: u64,
    /// Records still in `Needs Review`
    pub pending_count: usize,
    /// Records assessed `High` risk
    pub high_risk_count: usize,
    /// Estimated value summed per canonical data type
    pub value_by_data_type: BTreeMap<String, u64>,
}

/// Append-only record store for one session
#[derive(Debug, Default)]
pub struct SessionStore {
    records: Vec<IntakeRecord>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a record from extracted fields and append it
    ///
    /// Returns a clone of the stored record. Records are never removed.
    pub fn append(&mut self, fields: ExtractedFields) -> IntakeRecord {
        let record = IntakeRecord::from_extraction(fields);
        self.records.push(record.clone());
        record
    }

    /// All records in insertion order
    pub fn records(&self) -> &[IntakeRecord] {
        &self.records
    }

    /// Look up one record by id
    pub fn get(&self, id: Uuid) -> Option<&IntakeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Apply a user edit to the editable fields of one record
    ///
    /// Only `status` and `risk_level` are editable; everything else is
    /// immutable after append. Returns the updated record, or `None` if the
    /// id is unknown.
    pub fn update(
        &mut self,
        id: Uuid,
        status: Option<DealStatus>,
        risk_level: Option<RiskLevel>,
    ) -> Option<IntakeRecord> {
        let record = self.records.iter_mut().find(|r| r.id == id)?;
        if let Some(status) = status {
            record.status = status;
        }
        if let Some(risk_level) = risk_level {
            record.risk_level = risk_level;
        }
        Some(record.clone())
    }

    /// Compute the dashboard summary over the current records
    pub fn metrics(&self) -> MetricsSummary {
        let mut value_by_data_type = BTreeMap::new();
        let mut total = 0u64;
        let mut pending = 0usize;
        let mut high_risk = 0usize;

        for record in &self.records {
            total = total.saturating_add(record.estimated_value);
            if record.status == DealStatus::NeedsReview {
                pending += 1;
            }
            if record.risk_level == RiskLevel::High {
                high_risk += 1;
            }
            *value_by_data_type
                .entry(record.data_type.to_string())
                .or_insert(0u64) += record.estimated_value;
        }

        MetricsSummary {
            total_pipeline_value: total,
            pending_count: pending,
            high_risk_count: high_risk,
            value_by_data_type,
        }
    }
}
