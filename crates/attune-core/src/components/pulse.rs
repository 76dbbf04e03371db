use std::sync::Arc;

use tracing::debug;

use crate::clock::Clock;
use crate::config::PolicyConfig;
use crate::error::CoreError;
use crate::model::{InputContext, PulseId, PulseObservation};

/// What one call to [`PulseMonitor::record`] observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseReading {
    pub id: PulseId,
    pub value: f64,
    /// The reading this one was compared against (the baseline for the first).
    pub previous: f64,
    pub varied: bool,
}

/// Ethical-pulse history with explicit, id-based variation queries.
///
/// Recording a pulse and comparing it to its predecessor is a single step,
/// so there is no "last value" that a query can silently move.
#[derive(Debug)]
pub struct PulseMonitor {
    history: Vec<PulseObservation>,
    baseline: f64,
    default_intensity: f64,
    sensitivity: f64,
    clock: Arc<dyn Clock>,
}

impl PulseMonitor {
    pub fn new(policy: &PolicyConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            history: Vec::new(),
            baseline: policy.initial_pulse,
            default_intensity: policy.default_ethical_intensity,
            sensitivity: policy.pulse_sensitivity,
            clock,
        }
    }

    /// Extract `ethical_intensity` from the context, append it, and compare
    /// it against the previous reading.
    pub fn record(&mut self, context: &InputContext) -> PulseReading {
        let value = context.ethical_intensity_or(self.default_intensity);
        let previous = self.last_value();
        let id = PulseId(self.history.len() as u64 + 1);

        self.history.push(PulseObservation {
            id,
            timestamp: self.clock.now(),
            value,
            context: context.clone(),
        });

        let varied = self.exceeds_sensitivity(previous, value);
        debug!(%id, value, previous, varied, "pulse recorded");

        PulseReading {
            id,
            value,
            previous,
            varied,
        }
    }

    /// Whether the pulse moved by at least the sensitivity between two readings.
    pub fn variation_since(&self, from: PulseId, to: PulseId) -> Result<bool, CoreError> {
        let a = self.value_of(from).ok_or(CoreError::UnknownPulse(from))?;
        let b = self.value_of(to).ok_or(CoreError::UnknownPulse(to))?;
        Ok(self.exceeds_sensitivity(a, b))
    }

    /// Value of a reading; `PulseId::BASELINE` resolves to the initial pulse.
    pub fn value_of(&self, id: PulseId) -> Option<f64> {
        if id.is_baseline() {
            return Some(self.baseline);
        }
        let index = usize::try_from(id.0 - 1).ok()?;
        self.history.get(index).map(|o| o.value)
    }

    pub fn latest_id(&self) -> PulseId {
        self.history
            .last()
            .map(|o| o.id)
            .unwrap_or(PulseId::BASELINE)
    }

    pub fn last_value(&self) -> f64 {
        self.history
            .last()
            .map(|o| o.value)
            .unwrap_or(self.baseline)
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    pub fn history(&self) -> &[PulseObservation] {
        &self.history
    }

    fn exceeds_sensitivity(&self, a: f64, b: f64) -> bool {
        (b - a).abs() >= self.sensitivity
    }
}
