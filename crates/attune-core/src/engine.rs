use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::components::{
    AcceptanceFilter, Classification, ComplianceGuard, DecisionTimeline, PulseMonitor,
    RhythmState, SentimentTracker,
};
use crate::config::{EngineConfig, PolicyConfig};
use crate::model::{
    Acceptance, Development, Evaluation, FilterStatus, GuardStatus, Identity, Input,
    InputContext, PulseStatus, Rejection, RejectionStage, RhythmSnapshot, SentimentStatus,
    SystemStatus,
};

/// Average of a sentiment score and an ethical-pulse value.
pub fn resonance(sentiment: f64, pulse: f64) -> f64 {
    (sentiment + pulse) / 2.0
}

/// Orchestrates the filter, trackers, guard, timeline and rhythm state.
///
/// Every call to [`evaluate`](Self::evaluate) leaves a trace: a rejected
/// source is recorded by the filter only, while an input rejected for low
/// resonance has already been observed by the sentiment tracker, the pulse
/// monitor and the guard. Nothing is rolled back. Only an accepted input
/// reaches the decision timeline.
#[derive(Debug)]
pub struct DecisionEngine {
    identity: Identity,
    policy: PolicyConfig,
    filter: AcceptanceFilter,
    sentiment: SentimentTracker,
    pulse: PulseMonitor,
    guard: ComplianceGuard,
    timeline: DecisionTimeline,
    rhythm: RhythmState,
    active: bool,
}

impl DecisionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build an engine that reads time from `clock` (timestamps and rhythm alignment).
    pub fn with_clock(config: EngineConfig, clock: Arc<dyn Clock>) -> Self {
        let EngineConfig { identity, policy } = config;
        debug!(name = %identity.name, "decision engine starting");
        Self {
            filter: AcceptanceFilter::new(&policy, clock.clone()),
            sentiment: SentimentTracker::new(&policy, clock.clone()),
            pulse: PulseMonitor::new(&policy, clock.clone()),
            guard: ComplianceGuard::new(&policy, clock.clone()),
            timeline: DecisionTimeline::new(&policy, clock.clone()),
            rhythm: RhythmState::new(&policy, clock),
            identity,
            policy,
            active: true,
        }
    }

    /// Run one input through source filtering and resonance gating.
    pub fn evaluate(&mut self, input: Input) -> Evaluation {
        let source_type = input.source_type().to_string();

        if let Classification::Rejected(rejection) = self.filter.classify(&input) {
            return Evaluation::Rejected(Rejection {
                stage: RejectionStage::Source,
                reason: rejection.to_string(),
                source_type,
                resonance: None,
                threshold: None,
            });
        }

        let sentiment = self.sentiment.observe(&input);
        let pulse = self.pulse.record(&input.context);
        let resonance = resonance(sentiment, pulse.value);
        debug!(%source_type, sentiment, pulse = pulse.value, resonance, "resonance computed");

        if !self.guard.enforce(&input, resonance) {
            let threshold = self.guard.threshold();
            return Evaluation::Rejected(Rejection {
                stage: RejectionStage::Compliance,
                reason: format!(
                    "harmonic threshold not met: resonance {resonance:.3} below {threshold}"
                ),
                source_type,
                resonance: Some(resonance),
                threshold: Some(threshold),
            });
        }

        // Alignment is the resonance itself.
        let purpose_alignment = resonance;
        let decision_id = self.timeline.record(input.to_decision(), purpose_alignment);
        info!(%decision_id, %source_type, resonance, varied = pulse.varied, "input accepted");

        Evaluation::Accepted(Acceptance {
            identity: self.identity.clone(),
            decision_id,
            sentiment,
            ethical_pulse: pulse.value,
            resonance,
            pulse_variation_detected: pulse.varied,
            purpose_alignment,
            rhythm: self.rhythm.snapshot(),
        })
    }

    /// Decide whether new internal logic may be generated. Only a detected
    /// pulse variation can open this gate, and only with enough resonance.
    pub fn consider_development(&mut self, trigger: InputContext) -> Development {
        let pulse = self.pulse.record(&trigger);

        if !pulse.varied {
            debug!(pulse = pulse.value, previous = pulse.previous, "pulse stable, no development");
            return Development::NoDevelopment {
                reason: "no significant ethical pulse variation detected".to_string(),
                ethical_pulse: pulse.value,
                previous_pulse: pulse.previous,
            };
        }

        let sentiment = self.sentiment.rolling_average();
        let resonance = resonance(sentiment, pulse.value);
        let threshold = self.policy.harmonic_threshold;

        if resonance < threshold {
            warn!(resonance, threshold, "development rejected");
            return Development::DevelopmentRejected {
                reason: "complexity increase without sufficient resonance".to_string(),
                ethical_pulse: pulse.value,
                sentiment,
                resonance,
                threshold,
            };
        }

        info!(resonance, pulse = pulse.value, "development approved");
        Development::DevelopmentApproved {
            ethical_pulse: pulse.value,
            sentiment,
            resonance,
            trigger,
        }
    }

    /// Aggregate counts and analyses. Reads only.
    pub fn status(&self) -> SystemStatus {
        SystemStatus {
            identity: self.identity.clone(),
            active: self.active,
            sentiment: SentimentStatus {
                average: self.sentiment.rolling_average(),
                history_count: self.sentiment.history().len(),
            },
            pulse: PulseStatus {
                last_value: self.pulse.last_value(),
                history_count: self.pulse.history().len(),
            },
            filter: FilterStatus {
                accepted_count: self.filter.accepted().len(),
                rejected_count: self.filter.rejected().len(),
            },
            rhythm: self.rhythm.snapshot(),
            guard: GuardStatus {
                violations_count: self.guard.violations().len(),
                compliant_count: self.guard.compliant().len(),
            },
            timeline: self.timeline.analyze(),
        }
    }

    pub fn integrate_pattern(&mut self, pattern: Value) -> String {
        self.rhythm.integrate_pattern(pattern)
    }

    pub fn store_memory(&mut self, emotion: Value) {
        self.rhythm.store_memory(emotion)
    }

    pub fn update_flow(&mut self, value: f64) {
        self.rhythm.update_flow(value)
    }

    pub fn rhythm_snapshot(&self) -> RhythmSnapshot {
        self.rhythm.snapshot()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn filter(&self) -> &AcceptanceFilter {
        &self.filter
    }

    pub fn sentiment(&self) -> &SentimentTracker {
        &self.sentiment
    }

    pub fn pulse(&self) -> &PulseMonitor {
        &self.pulse
    }

    pub fn guard(&self) -> &ComplianceGuard {
        &self.guard
    }

    pub fn timeline(&self) -> &DecisionTimeline {
        &self.timeline
    }

    pub fn rhythm(&self) -> &RhythmState {
        &self.rhythm
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::AlignmentStatus;
    use chrono::Duration;
    use serde_json::json;

    fn engine() -> DecisionEngine {
        DecisionEngine::with_clock(EngineConfig::default(), Arc::new(ManualClock::default()))
    }

    fn harmonics(sentiment: f64, intensity: f64) -> Input {
        Input::new("designated_human_harmonics", "Preserve planetary harmony")
            .with_sentiment(sentiment)
            .with_ethical_intensity(intensity)
    }

    #[test]
    fn test_accepted_input() {
        let mut engine = engine();
        let result = engine.evaluate(harmonics(0.85, 0.8));

        let Evaluation::Accepted(accepted) = result else {
            panic!("expected acceptance");
        };
        assert!((accepted.resonance - 0.825).abs() < 1e-12);
        assert_eq!(accepted.resonance, (0.85 + 0.8) / 2.0);
        assert_eq!(accepted.purpose_alignment, accepted.resonance);
        assert_eq!(accepted.identity, Identity::default());
        assert!(!accepted.pulse_variation_detected); // 0.8 vs baseline 0.5
        assert_eq!(engine.timeline().len(), 1);
        assert_eq!(engine.timeline().entries()[0].id, accepted.decision_id);
    }

    #[test]
    fn test_blocked_source_short_circuits() {
        let mut engine = engine();
        for source in ["monetary_driven", "political_override", "ego_tuned"] {
            let input = Input::new(source, "Maximize profit at all costs")
                .with_sentiment(0.99)
                .with_ethical_intensity(0.99);
            let result = engine.evaluate(input);
            let Evaluation::Rejected(rejected) = result else {
                panic!("{source} should be rejected");
            };
            assert_eq!(rejected.stage, RejectionStage::Source);
            assert!(rejected.reason.contains("blocked"));
            assert!(rejected.resonance.is_none());
        }

        assert!(engine.filter().accepted().is_empty());
        assert_eq!(engine.filter().rejected().len(), 3);
        assert!(engine.sentiment().history().is_empty());
        assert!(engine.pulse().history().is_empty());
        assert!(engine.guard().violations().is_empty());
        assert!(engine.guard().compliant().is_empty());
        assert!(engine.timeline().is_empty());
    }

    #[test]
    fn test_unlisted_source_rejected() {
        let mut engine = engine();
        let result = engine.evaluate(Input::new("anonymous_forum", "x").with_sentiment(0.9));
        assert!(result.reason().unwrap().contains("not in accepted list"));
        assert!(engine.sentiment().history().is_empty());
    }

    #[test]
    fn test_low_resonance_rejected_but_recorded() {
        let mut engine = engine();
        let result = engine.evaluate(harmonics(0.3, 0.2));

        let Evaluation::Rejected(rejected) = result else {
            panic!("expected compliance rejection");
        };
        assert_eq!(rejected.stage, RejectionStage::Compliance);
        assert!(rejected.reason.to_lowercase().contains("harmonic"));
        assert_eq!(rejected.resonance, Some((0.3 + 0.2) / 2.0));
        assert_eq!(rejected.threshold, Some(0.75));

        // side effects are kept
        assert_eq!(engine.filter().accepted().len(), 1);
        assert_eq!(engine.sentiment().history().len(), 1);
        assert_eq!(engine.pulse().history().len(), 1);
        assert_eq!(engine.guard().violations().len(), 1);
        assert!(engine.timeline().is_empty());
    }

    #[test]
    fn test_resonance_at_threshold_accepted() {
        let mut engine = engine();
        assert!(engine.evaluate(harmonics(0.75, 0.75)).is_accepted());
    }

    #[test]
    fn test_variation_flag_on_acceptance() {
        let mut engine = engine();
        engine.evaluate(harmonics(0.9, 0.5));
        let result = engine.evaluate(harmonics(0.5, 1.0));
        let Evaluation::Accepted(accepted) = result else {
            panic!("expected acceptance");
        };
        assert!(accepted.pulse_variation_detected);
    }

    #[test]
    fn test_no_development_on_stable_pulse() {
        let mut engine = engine();
        for intensity in [0.5, 0.5, 0.8, 0.4] {
            let dev = engine.consider_development(InputContext::with_intensity(intensity));
            assert_eq!(dev.status(), "no_development", "intensity {intensity}");
        }
    }

    #[test]
    fn test_development_rejected_without_resonance() {
        let mut engine = engine();
        // baseline sentiment 0.7, pulse 0.0 -> resonance 0.35
        let dev = engine.consider_development(InputContext::with_intensity(0.0));
        match dev {
            Development::DevelopmentRejected {
                resonance,
                sentiment,
                ..
            } => {
                assert_eq!(sentiment, 0.7);
                assert!((resonance - 0.35).abs() < 1e-12);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_development_approved() {
        let mut engine = engine();
        engine.evaluate(harmonics(0.9, 0.7));
        engine.evaluate(harmonics(0.9, 0.7));
        engine.consider_development(InputContext::with_intensity(0.1));

        let trigger = InputContext::with_intensity(1.0).insert("description", "surge");
        let dev = engine.consider_development(trigger.clone());
        match dev {
            Development::DevelopmentApproved {
                sentiment,
                resonance,
                trigger: t,
                ethical_pulse,
            } => {
                assert!((sentiment - 0.9).abs() < 1e-12);
                assert!((resonance - 0.95).abs() < 1e-12);
                assert_eq!(ethical_pulse, 1.0);
                assert_eq!(t, trigger);
            }
            other => panic!("expected approval, got {other:?}"),
        }
    }

    #[test]
    fn test_development_does_not_touch_timeline_or_sentiment() {
        let mut engine = engine();
        engine.consider_development(InputContext::with_intensity(1.0));
        assert!(engine.timeline().is_empty());
        assert!(engine.sentiment().history().is_empty());
        assert_eq!(engine.pulse().history().len(), 1);
    }

    #[test]
    fn test_status_is_read_only() {
        let mut engine = engine();
        engine.evaluate(harmonics(0.85, 0.8));
        engine.evaluate(Input::new("monetary_driven", "x"));
        engine.evaluate(harmonics(0.3, 0.2));

        let first = engine.status();
        let second = engine.status();
        assert_eq!(first, second);

        assert!(first.active);
        assert_eq!(first.filter.accepted_count, 2);
        assert_eq!(first.filter.rejected_count, 1);
        assert_eq!(first.guard.violations_count, 1);
        assert_eq!(first.guard.compliant_count, 1);
        assert_eq!(first.sentiment.history_count, 2);
        assert_eq!(first.pulse.history_count, 2);
        assert_eq!(first.pulse.last_value, 0.2);
        assert_eq!(first.timeline.total, 1);
        assert_eq!(first.timeline.status, AlignmentStatus::Aligned);
    }

    #[test]
    fn test_rhythm_in_acceptance_uses_engine_clock() {
        let clock = ManualClock::default();
        let mut engine = DecisionEngine::with_clock(EngineConfig::default(), Arc::new(clock.clone()));
        engine.integrate_pattern(json!({"id": "circadian_rhythm"}));
        engine.store_memory(json!({"type": "compassion"}));
        engine.update_flow(0.75);
        clock.advance(Duration::hours(12));

        let Evaluation::Accepted(accepted) = engine.evaluate(harmonics(0.9, 0.85)) else {
            panic!("expected acceptance");
        };
        assert!((accepted.rhythm.earth_alignment - 0.5).abs() < 1e-12);
        assert_eq!(accepted.rhythm.biological_pattern_count, 1);
        assert_eq!(accepted.rhythm.emotional_memory_count, 1);
        assert_eq!(accepted.rhythm.planetary_flow, 0.75);
    }

    #[test]
    fn test_independent_engines() {
        let strict = PolicyConfig {
            harmonic_threshold: 0.9,
            ..Default::default()
        };
        let mut strict = DecisionEngine::with_clock(
            EngineConfig::new(strict),
            Arc::new(ManualClock::default()),
        );
        let mut lenient = engine();

        assert!(!strict.evaluate(harmonics(0.85, 0.8)).is_accepted());
        assert!(lenient.evaluate(harmonics(0.85, 0.8)).is_accepted());
        assert!(lenient.guard().violations().is_empty());
    }

    #[test]
    fn test_zero_analysis_window_in_code_built_policy() {
        let policy = PolicyConfig {
            analysis_window: 0,
            ..Default::default()
        };
        let mut engine = DecisionEngine::with_clock(
            EngineConfig::new(policy),
            Arc::new(ManualClock::default()),
        );
        assert!(engine.evaluate(harmonics(0.9, 0.8)).is_accepted());

        let timeline = engine.status().timeline;
        assert_eq!(timeline.total, 1);
        let avg = timeline.recent_avg_alignment.unwrap();
        assert!((avg - 0.85).abs() < 1e-12);
        assert_eq!(timeline.status, AlignmentStatus::Aligned);
    }
}
