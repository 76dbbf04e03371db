use serde::{Deserialize, Serialize};

use super::identity::Identity;
use super::input::InputContext;
use super::records::DecisionId;
use super::status::RhythmSnapshot;

/// Result of evaluating one input. Rejection is a normal outcome, not an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Evaluation {
    Accepted(Acceptance),
    Rejected(Rejection),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Acceptance {
    pub identity: Identity,
    pub decision_id: DecisionId,
    pub sentiment: f64,
    pub ethical_pulse: f64,
    pub resonance: f64,
    pub pulse_variation_detected: bool,
    pub purpose_alignment: f64,
    pub rhythm: RhythmSnapshot,
}

/// Which gate turned the input away.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RejectionStage {
    Source,
    Compliance,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rejection {
    pub stage: RejectionStage,
    pub reason: String,
    pub source_type: String,
    /// Only set for compliance rejections; a source rejection never computes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resonance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl Evaluation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Evaluation::Accepted(_))
    }

    pub fn status(&self) -> &'static str {
        match self {
            Evaluation::Accepted(_) => "accepted",
            Evaluation::Rejected(_) => "rejected",
        }
    }

    pub fn resonance(&self) -> Option<f64> {
        match self {
            Evaluation::Accepted(a) => Some(a.resonance),
            Evaluation::Rejected(r) => r.resonance,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Evaluation::Accepted(_) => None,
            Evaluation::Rejected(r) => Some(&r.reason),
        }
    }
}

/// Result of asking whether the system may grow new internal logic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Development {
    NoDevelopment {
        reason: String,
        ethical_pulse: f64,
        previous_pulse: f64,
    },
    DevelopmentRejected {
        reason: String,
        ethical_pulse: f64,
        sentiment: f64,
        resonance: f64,
        threshold: f64,
    },
    DevelopmentApproved {
        ethical_pulse: f64,
        sentiment: f64,
        resonance: f64,
        trigger: InputContext,
    },
}

impl Development {
    pub fn status(&self) -> &'static str {
        match self {
            Development::NoDevelopment { .. } => "no_development",
            Development::DevelopmentRejected { .. } => "development_rejected",
            Development::DevelopmentApproved { .. } => "development_approved",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Development::DevelopmentApproved { .. })
    }

    pub fn resonance(&self) -> Option<f64> {
        match self {
            Development::NoDevelopment { .. } => None,
            Development::DevelopmentRejected { resonance, .. }
            | Development::DevelopmentApproved { resonance, .. } => Some(*resonance),
        }
    }
}
