use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::input::{Input, InputContext};

/// Identifies one recorded ethical-pulse reading within a monitor.
///
/// `PulseId::BASELINE` names the configured initial pulse that precedes
/// every real observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PulseId(pub u64);

impl PulseId {
    pub const BASELINE: PulseId = PulseId(0);

    pub fn is_baseline(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for PulseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_baseline() {
            write!(f, "pulse#baseline")
        } else {
            write!(f, "pulse#{}", self.0)
        }
    }
}

/// Unique identifier of a timeline entry. UUID v4 hex, no dashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecisionId(pub String);

impl DecisionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().as_simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DecisionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DecisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentObservation {
    pub timestamp: DateTime<Utc>,
    pub score: f64,
    pub raw_input: Input,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PulseObservation {
    pub id: PulseId,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub context: InputContext,
}

/// Audit record of one source classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcceptanceOutcome {
    pub timestamp: DateTime<Utc>,
    pub input: Input,
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    Violation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplianceRecord {
    pub timestamp: DateTime<Utc>,
    pub operation: Input,
    pub resonance: f64,
    pub threshold: f64,
    pub status: ComplianceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionEntry {
    pub id: DecisionId,
    pub timestamp: DateTime<Utc>,
    pub decision: Value,
    pub purpose_alignment: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatternRecord {
    pub timestamp: DateTime<Utc>,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryRecord {
    pub timestamp: DateTime<Utc>,
    pub emotion: Value,
}
