//! Price fairness evaluation
//!
//! Compares a proposed price against the historical per-unit average for the
//! same data type. The deal book is read-only reference data, loaded once
//! at startup; a missing or corrupt deals file disables benchmarking for
//! the life of the process without taking the service down.

use licops_common::{DataType, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// One row of reference pricing data
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalDeal {
    pub data_type: DataType,
    /// Price per unit, strictly positive
    pub unit_price: f64,
}

/// CSV row shape: `data_type,unit_price`
#[derive(Debug, Deserialize)]
struct DealRow {
    data_type: String,
    unit_price: f64,
}

/// Fairness comparison outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum FairnessOutcome {
    /// No historical deals for this data type; comparison impossible
    NoBenchmark,
    /// Comparison against the historical average
    Benchmarked {
        /// `avg_unit_price * volume`
        fair_price: f64,
        /// `proposed_price - fair_price`; negative means underpaying
        difference: f64,
        /// Strict `difference > 0`; break-even is not overpaying
        is_overpaying: bool,
    },
}

/// Read-only collection of historical deals
#[derive(Debug, Clone, Default)]
pub struct DealBook {
    deals: Vec<HistoricalDeal>,
}

impl DealBook {
    /// Build a deal book from in-memory rows
    pub fn from_deals(deals: Vec<HistoricalDeal>) -> Self {
        Self { deals }
    }

    /// Load the deal book from a CSV file with `data_type,unit_price` columns
    ///
    /// Rows with unknown data-type labels or non-positive unit prices are
    /// skipped with a warning rather than failing the whole load.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| Error::Config(format!("Open {} failed: {}", path.display(), e)))?;

        let mut deals = Vec::new();
        for row in reader.deserialize::<DealRow>() {
            let row = row
                .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

            let Some(data_type) = DataType::from_label(&row.data_type) else {
                warn!(label = %row.data_type, "Skipping deal row with unknown data type");
                continue;
            };
            if row.unit_price <= 0.0 || !row.unit_price.is_finite() {
                warn!(unit_price = row.unit_price, "Skipping deal row with invalid unit price");
                continue;
            }

            deals.push(HistoricalDeal {
                data_type,
                unit_price: row.unit_price,
            });
        }

        info!(rows = deals.len(), path = %path.display(), "Loaded historical deals");
        Ok(Self { deals })
    }

    /// Number of reference deals loaded
    pub fn len(&self) -> usize {
        self.deals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    /// Compare a proposed price against the historical average for the type
    ///
    /// `volume = 0` is deliberate boundary behavior: the fair price collapses
    /// to 0 and any positive proposal is flagged as overpaying by the full
    /// amount. The evaluator does not special-case it.
    pub fn evaluate(
        &self,
        data_type: DataType,
        proposed_price: f64,
        volume: u64,
    ) -> FairnessOutcome {
        let matching: Vec<f64> = self
            .deals
            .iter()
            .filter(|deal| deal.data_type == data_type)
            .map(|deal| deal.unit_price)
            .collect();

        if matching.is_empty() {
            return FairnessOutcome::NoBenchmark;
        }

        let avg_unit_price = matching.iter().sum::<f64>() / matching.len() as f64;
        let fair_price = avg_unit_price * volume as f64;
        let difference = proposed_price - fair_price;

        FairnessOutcome::Benchmarked {
            fair_price,
            difference,
            is_overpaying: difference > 0.0,
        }
    }
}
