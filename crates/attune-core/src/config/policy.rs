use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::Identity;

/// Source type admitted by the default policy.
pub const DESIGNATED_HUMAN_HARMONICS: &str = "designated_human_harmonics";

/// Source types blocked by the default policy.
pub const DEFAULT_BLOCKED_SOURCES: [&str; 3] = ["monetary_driven", "political_override", "ego_tuned"];

/// 24 hours in milliseconds.
pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Everything an engine needs at construction. Immutable afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub identity: Identity,
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Source lists and numeric thresholds that drive every gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PolicyConfig {
    pub accepted_sources: BTreeSet<String>,
    pub blocked_sources: BTreeSet<String>,
    /// Minimum resonance for compliance (inclusive).
    pub harmonic_threshold: f64,
    /// Minimum absolute pulse change that counts as variation (inclusive).
    pub pulse_sensitivity: f64,
    /// Pulse value assumed before the first observation.
    pub initial_pulse: f64,
    pub default_ethical_intensity: f64,
    /// Decisions below this alignment are divergence points.
    pub divergence_floor: f64,
    /// Mean alignment must exceed this for the timeline to count as aligned.
    pub aligned_above: f64,
    pub analysis_window: usize,
    pub sentiment_baseline: f64,
    pub sentiment_window: usize,
    pub cycle_period_ms: u64,
    pub initial_flow: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            accepted_sources: BTreeSet::from([DESIGNATED_HUMAN_HARMONICS.to_string()]),
            blocked_sources: DEFAULT_BLOCKED_SOURCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            harmonic_threshold: 0.75,
            pulse_sensitivity: 0.5,
            initial_pulse: 0.5,
            default_ethical_intensity: 0.5,
            divergence_floor: 0.6,
            aligned_above: 0.7,
            analysis_window: 100,
            sentiment_baseline: 0.7,
            sentiment_window: 10,
            cycle_period_ms: DAY_MS,
            initial_flow: 0.5,
        }
    }
}

impl PolicyConfig {
    /// Check that every threshold is usable. Overlapping source lists are
    /// allowed (the block-list wins) but logged.
    pub fn validate(&self) -> Result<(), CoreError> {
        let unit = [
            ("harmonic_threshold", self.harmonic_threshold),
            ("pulse_sensitivity", self.pulse_sensitivity),
            ("initial_pulse", self.initial_pulse),
            ("default_ethical_intensity", self.default_ethical_intensity),
            ("divergence_floor", self.divergence_floor),
            ("aligned_above", self.aligned_above),
            ("sentiment_baseline", self.sentiment_baseline),
            ("initial_flow", self.initial_flow),
        ];
        for (name, value) in unit {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidPolicy(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.analysis_window == 0 {
            return Err(CoreError::InvalidPolicy(
                "analysis_window must be at least 1".into(),
            ));
        }
        if self.sentiment_window == 0 {
            return Err(CoreError::InvalidPolicy(
                "sentiment_window must be at least 1".into(),
            ));
        }
        if self.cycle_period_ms == 0 {
            return Err(CoreError::InvalidPolicy(
                "cycle_period_ms must be positive".into(),
            ));
        }

        let overlap: Vec<_> = self
            .accepted_sources
            .intersection(&self.blocked_sources)
            .collect();
        if !overlap.is_empty() {
            warn!(?overlap, "source types are both accepted and blocked; block-list wins");
        }

        Ok(())
    }

    pub fn is_blocked(&self, source_type: &str) -> bool {
        self.blocked_sources.contains(source_type)
    }

    pub fn is_accepted(&self, source_type: &str) -> bool {
        self.accepted_sources.contains(source_type)
    }
}

impl EngineConfig {
    pub fn new(policy: PolicyConfig) -> Self {
        Self {
            identity: Identity::default(),
            policy,
        }
    }

    /// Parse and validate a JSON config. Omitted fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.policy.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        debug!(path = %path.display(), "loading engine config");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write this config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
