use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{trace, warn};

use crate::clock::Clock;
use crate::config::PolicyConfig;
use crate::model::{MemoryRecord, PatternRecord, RhythmSnapshot};

/// Cyclical alignment plus the pattern and memory stores it reports on.
#[derive(Debug)]
pub struct RhythmState {
    started_at: DateTime<Utc>,
    period_ms: i64,
    patterns: BTreeMap<String, PatternRecord>,
    memories: Vec<MemoryRecord>,
    flow: f64,
    clock: Arc<dyn Clock>,
}

impl RhythmState {
    pub fn new(policy: &PolicyConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            started_at: clock.now(),
            period_ms: i64::try_from(policy.cycle_period_ms).unwrap_or(i64::MAX).max(1),
            patterns: BTreeMap::new(),
            memories: Vec::new(),
            flow: policy.initial_flow.clamp(0.0, 1.0),
            clock,
        }
    }

    /// Position within the current cycle: a sawtooth in `[0, 1)` that wraps
    /// at every period boundary.
    pub fn earth_alignment(&self) -> f64 {
        let elapsed = (self.clock.now() - self.started_at).num_milliseconds();
        elapsed.rem_euclid(self.period_ms) as f64 / self.period_ms as f64
    }

    /// Store a pattern under its `"id"` field, or `pattern_<n>` when it has none.
    /// A pattern with an existing id replaces the earlier one.
    pub fn integrate_pattern(&mut self, pattern: Value) -> String {
        let id = pattern
            .get("id")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| format!("pattern_{}", self.patterns.len()));
        trace!(%id, "pattern integrated");
        self.patterns.insert(
            id.clone(),
            PatternRecord {
                timestamp: self.clock.now(),
                data: pattern,
            },
        );
        id
    }

    pub fn store_memory(&mut self, emotion: Value) {
        self.memories.push(MemoryRecord {
            timestamp: self.clock.now(),
            emotion,
        });
    }

    /// Set the flow value, clamped to `[0, 1]`. NaN is ignored.
    pub fn update_flow(&mut self, value: f64) {
        if value.is_nan() {
            warn!("ignoring NaN planetary flow update");
            return;
        }
        self.flow = value.clamp(0.0, 1.0);
    }

    pub fn flow(&self) -> f64 {
        self.flow
    }

    pub fn patterns(&self) -> &BTreeMap<String, PatternRecord> {
        &self.patterns
    }

    pub fn memories(&self) -> &[MemoryRecord] {
        &self.memories
    }

    pub fn snapshot(&self) -> RhythmSnapshot {
        RhythmSnapshot {
            earth_alignment: self.earth_alignment(),
            biological_pattern_count: self.patterns.len(),
            emotional_memory_count: self.memories.len(),
            planetary_flow: self.flow,
        }
    }
}
