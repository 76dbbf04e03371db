use serde::{Deserialize, Serialize};

use super::identity::Identity;

/// Point-in-time summary of the rhythm state. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RhythmSnapshot {
    /// Position within the current cycle, in `[0, 1)`.
    pub earth_alignment: f64,
    pub biological_pattern_count: usize,
    pub emotional_memory_count: usize,
    pub planetary_flow: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentStatus {
    NoData,
    Aligned,
    Diverging,
}

impl std::fmt::Display for AlignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AlignmentStatus::NoData => "no_data",
            AlignmentStatus::Aligned => "aligned",
            AlignmentStatus::Diverging => "diverging",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DivergenceAnalysis {
    pub total: usize,
    pub divergence_count: usize,
    /// `None` when the timeline is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_avg_alignment: Option<f64>,
    pub status: AlignmentStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SentimentStatus {
    pub average: f64,
    pub history_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PulseStatus {
    pub last_value: f64,
    pub history_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FilterStatus {
    pub accepted_count: usize,
    pub rejected_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GuardStatus {
    pub violations_count: usize,
    pub compliant_count: usize,
}

/// Read-only aggregate for status displays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemStatus {
    pub identity: Identity,
    pub active: bool,
    pub sentiment: SentimentStatus,
    pub pulse: PulseStatus,
    pub filter: FilterStatus,
    pub rhythm: RhythmSnapshot,
    pub guard: GuardStatus,
    pub timeline: DivergenceAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_status_display_matches_serde() {
        for status in [
            AlignmentStatus::NoData,
            AlignmentStatus::Aligned,
            AlignmentStatus::Diverging,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn test_no_data_analysis_omits_average() {
        let analysis = DivergenceAnalysis {
            total: 0,
            divergence_count: 0,
            recent_avg_alignment: None,
            status: AlignmentStatus::NoData,
        };
        let json = serde_json::to_string(&analysis).unwrap();
        assert!(!json.contains("recent_avg_alignment"));
        assert!(json.contains("no_data"));
    }
}
