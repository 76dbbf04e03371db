use std::sync::Arc;

use tracing::{trace, warn};

use crate::clock::Clock;
use crate::config::PolicyConfig;
use crate::model::{ComplianceRecord, ComplianceStatus, Input};

/// Enforces the harmonic threshold on every evaluated operation.
/// A failed enforcement is terminal; there are no retries.
#[derive(Debug)]
pub struct ComplianceGuard {
    threshold: f64,
    violations: Vec<ComplianceRecord>,
    compliant: Vec<ComplianceRecord>,
    clock: Arc<dyn Clock>,
}

impl ComplianceGuard {
    pub fn new(policy: &PolicyConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            threshold: policy.harmonic_threshold,
            violations: Vec::new(),
            compliant: Vec::new(),
            clock,
        }
    }

    /// Log the operation as compliant (`resonance >= threshold`) or as a violation.
    pub fn enforce(&mut self, operation: &Input, resonance: f64) -> bool {
        let passed = resonance >= self.threshold;
        let record = ComplianceRecord {
            timestamp: self.clock.now(),
            operation: operation.clone(),
            resonance,
            threshold: self.threshold,
            status: if passed {
                ComplianceStatus::Compliant
            } else {
                ComplianceStatus::Violation
            },
        };

        if passed {
            trace!(resonance, threshold = self.threshold, "operation compliant");
            self.compliant.push(record);
        } else {
            warn!(
                source_type = operation.source_type(),
                resonance,
                threshold = self.threshold,
                "harmonic violation"
            );
            self.violations.push(record);
        }
        passed
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn violations(&self) -> &[ComplianceRecord] {
        &self.violations
    }

    pub fn compliant(&self) -> &[ComplianceRecord] {
        &self.compliant
    }
}
