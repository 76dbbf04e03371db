use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::clock::Clock;
use crate::config::PolicyConfig;
use crate::model::{AcceptanceOutcome, Input};

/// Why a source was turned away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRejection {
    Blocked { source_type: String },
    NotAccepted { source_type: String },
}

impl std::fmt::Display for SourceRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceRejection::Blocked { source_type } => {
                write!(f, "blocked source type: {source_type}")
            }
            SourceRejection::NotAccepted { source_type } => {
                write!(f, "source not in accepted list: {source_type}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Accepted,
    Rejected(SourceRejection),
}

impl Classification {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Classification::Accepted)
    }
}

/// Allow-list / block-list gate on declared source type. Default-deny:
/// anything not explicitly accepted is rejected, and the block-list is
/// checked first.
#[derive(Debug)]
pub struct AcceptanceFilter {
    accepted_sources: BTreeSet<String>,
    blocked_sources: BTreeSet<String>,
    accepted: Vec<AcceptanceOutcome>,
    rejected: Vec<AcceptanceOutcome>,
    clock: Arc<dyn Clock>,
}

impl AcceptanceFilter {
    pub fn new(policy: &PolicyConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            accepted_sources: policy.accepted_sources.clone(),
            blocked_sources: policy.blocked_sources.clone(),
            accepted: Vec::new(),
            rejected: Vec::new(),
            clock,
        }
    }

    /// Decide on a source type without recording anything.
    pub fn policy_for(&self, source_type: &str) -> Classification {
        if self.blocked_sources.contains(source_type) {
            return Classification::Rejected(SourceRejection::Blocked {
                source_type: source_type.to_string(),
            });
        }
        if !self.accepted_sources.contains(source_type) {
            return Classification::Rejected(SourceRejection::NotAccepted {
                source_type: source_type.to_string(),
            });
        }
        Classification::Accepted
    }

    /// Classify the input's source and append the outcome to the audit trail.
    pub fn classify(&mut self, input: &Input) -> Classification {
        let classification = self.policy_for(input.source_type());
        let timestamp = self.clock.now();

        match &classification {
            Classification::Accepted => {
                debug!(source_type = input.source_type(), "source accepted");
                self.accepted.push(AcceptanceOutcome {
                    timestamp,
                    input: input.clone(),
                    accepted: true,
                    reason: None,
                });
            }
            Classification::Rejected(rejection) => {
                warn!(source_type = input.source_type(), %rejection, "source rejected");
                self.rejected.push(AcceptanceOutcome {
                    timestamp,
                    input: input.clone(),
                    accepted: false,
                    reason: Some(rejection.to_string()),
                });
            }
        }

        classification
    }

    pub fn accepted(&self) -> &[AcceptanceOutcome] {
        &self.accepted
    }

    pub fn rejected(&self) -> &[AcceptanceOutcome] {
        &self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn filter() -> AcceptanceFilter {
        AcceptanceFilter::new(&PolicyConfig::default(), Arc::new(ManualClock::default()))
    }

    #[test]
    fn test_accepted_source() {
        let mut filter = filter();
        let input = Input::new("designated_human_harmonics", "Help preserve biodiversity");
        assert_eq!(filter.classify(&input), Classification::Accepted);
        assert_eq!(filter.accepted().len(), 1);
        assert!(filter.rejected().is_empty());
        assert!(filter.accepted()[0].accepted);
    }

    #[test]
    fn test_blocked_sources() {
        let mut filter = filter();
        for source in ["monetary_driven", "political_override", "ego_tuned"] {
            let outcome = filter.classify(&Input::new(source, "x"));
            match outcome {
                Classification::Rejected(r) => assert!(r.to_string().contains("blocked")),
                Classification::Accepted => panic!("{source} should be blocked"),
            }
        }
        assert_eq!(filter.rejected().len(), 3);
        assert!(filter.accepted().is_empty());
    }

    #[test]
    fn test_unlisted_source_is_default_denied() {
        let mut filter = filter();
        let outcome = filter.classify(&Input::new("anonymous_forum", "x"));
        assert_eq!(
            outcome,
            Classification::Rejected(SourceRejection::NotAccepted {
                source_type: "anonymous_forum".into()
            })
        );
        let reason = filter.rejected()[0].reason.as_deref().unwrap();
        assert!(reason.contains("not in accepted list"));
    }

    #[test]
    fn test_block_takes_precedence_over_accept() {
        let mut policy = PolicyConfig::default();
        policy.accepted_sources.insert("monetary_driven".into());
        let filter = AcceptanceFilter::new(&policy, Arc::new(ManualClock::default()));
        assert!(matches!(
            filter.policy_for("monetary_driven"),
            Classification::Rejected(SourceRejection::Blocked { .. })
        ));
    }

    #[test]
    fn test_policy_for_does_not_record() {
        let filter = filter();
        assert!(filter.policy_for("designated_human_harmonics").is_accepted());
        assert!(filter.accepted().is_empty());
        assert!(filter.rejected().is_empty());
    }
}
