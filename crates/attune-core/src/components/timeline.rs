use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::config::PolicyConfig;
use crate::model::{AlignmentStatus, DecisionEntry, DecisionId, DivergenceAnalysis};

/// Append-only log of decisions and their purpose alignment.
///
/// Divergence points are indices into the log, fixed when the entry is
/// recorded; changing the floor later does not reclassify old entries.
#[derive(Debug)]
pub struct DecisionTimeline {
    entries: Vec<DecisionEntry>,
    divergence: Vec<usize>,
    divergence_floor: f64,
    aligned_above: f64,
    window: usize,
    clock: Arc<dyn Clock>,
}

impl DecisionTimeline {
    pub fn new(policy: &PolicyConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Vec::new(),
            divergence: Vec::new(),
            divergence_floor: policy.divergence_floor,
            aligned_above: policy.aligned_above,
            // A zero window would average an empty slice.
            window: policy.analysis_window.max(1),
            clock,
        }
    }

    pub fn record(&mut self, decision: Value, alignment: f64) -> DecisionId {
        let id = DecisionId::new();
        let index = self.entries.len();
        self.entries.push(DecisionEntry {
            id: id.clone(),
            timestamp: self.clock.now(),
            decision,
            purpose_alignment: alignment,
        });

        if alignment < self.divergence_floor {
            warn!(%id, alignment, floor = self.divergence_floor, "divergence point recorded");
            self.divergence.push(index);
        } else {
            debug!(%id, alignment, "decision recorded");
        }
        id
    }

    pub fn analyze(&self) -> DivergenceAnalysis {
        if self.entries.is_empty() {
            return DivergenceAnalysis {
                total: 0,
                divergence_count: 0,
                recent_avg_alignment: None,
                status: AlignmentStatus::NoData,
            };
        }

        let start = self.entries.len().saturating_sub(self.window);
        let recent = &self.entries[start..];
        let avg = recent.iter().map(|e| e.purpose_alignment).sum::<f64>() / recent.len() as f64;

        DivergenceAnalysis {
            total: self.entries.len(),
            divergence_count: self.divergence.len(),
            recent_avg_alignment: Some(avg),
            status: if avg > self.aligned_above {
                AlignmentStatus::Aligned
            } else {
                AlignmentStatus::Diverging
            },
        }
    }

    pub fn entries(&self) -> &[DecisionEntry] {
        &self.entries
    }

    pub fn divergence_points(&self) -> impl Iterator<Item = &DecisionEntry> + '_ {
        self.divergence.iter().map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
