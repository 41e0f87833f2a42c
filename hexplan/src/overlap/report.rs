//! Overlap computation outcome.

use crate::overlap::OverlapRecord;
use std::fmt;

/// A non-fatal condition raised during overlap computation.
///
/// Conditions are warnings the caller can inspect programmatically. None of
/// them abort the computation.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputeCondition {
    /// No feature layers were supplied.
    NoLayers,
    /// The grid holds no cells.
    EmptyGrid,
    /// A layer holds no features and was skipped. Raised once per layer,
    /// never per partition.
    EmptyLayer {
        /// Name of the skipped layer.
        layer: String,
    },
    /// A geometry operation failed for one (partition × layer) unit of
    /// work; that unit contributed nothing, siblings were unaffected.
    GeometryFailure {
        /// Index of the affected partition.
        partition: usize,
        /// Name of the affected layer.
        layer: String,
        /// What went wrong.
        message: String,
    },
}

impl fmt::Display for ComputeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputeCondition::NoLayers => write!(f, "no conservation feature layers loaded"),
            ComputeCondition::EmptyGrid => write!(f, "no planning unit grid loaded"),
            ComputeCondition::EmptyLayer { layer } => {
                write!(f, "skipping empty conservation layer '{}'", layer)
            }
            ComputeCondition::GeometryFailure {
                partition,
                layer,
                message,
            } => write!(
                f,
                "geometry failure in partition {} against layer '{}': {}",
                partition, layer, message
            ),
        }
    }
}

/// The result of one overlap computation.
///
/// Carries the flat record collection (completion order, no ordering
/// guarantee) and every condition raised along the way. An all-units-failed
/// run still returns a report; the caller decides whether an empty result
/// is an error.
#[derive(Debug, Default)]
pub struct OverlapReport {
    pub(crate) records: Vec<OverlapRecord>,
    pub(crate) conditions: Vec<ComputeCondition>,
    /// Dispatched (partition × layer) units.
    pub(crate) units: usize,
    /// Units that failed with a geometry error.
    pub(crate) failed_units: usize,
}

impl OverlapReport {
    /// The overlap records, in completion order.
    pub fn records(&self) -> &[OverlapRecord] {
        &self.records
    }

    /// Every condition raised during the computation.
    pub fn conditions(&self) -> &[ComputeCondition] {
        &self.conditions
    }

    /// True when no records were produced.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when work was dispatched and every unit failed.
    pub fn total_failure(&self) -> bool {
        self.units > 0 && self.failed_units == self.units
    }

    /// The records sorted by (PUID, feature, amount).
    ///
    /// The engine itself never sorts; collaborators that need a
    /// deterministic export order call this explicitly.
    pub fn sorted_records(&self) -> Vec<OverlapRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| {
            a.puid
                .cmp(&b.puid)
                .then_with(|| a.feature_id.to_string().cmp(&b.feature_id.to_string()))
                .then_with(|| a.amount.cmp(&b.amount))
        });
        sorted
    }
}
