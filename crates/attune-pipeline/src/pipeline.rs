use attune_core::model::DecisionId;
use attune_core::{Development, Evaluation, Input, InputContext, SharedEngine};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::PipelineError;
use crate::stages::*;

/// How the pipeline presents ideas to the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub source_type: String,
    pub sentiment_score: f64,
    pub ethical_intensity: f64,
    /// Development trigger intensity when a cycle deployed nothing.
    pub idle_feedback_quality: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_type: attune_core::config::policy::DESIGNATED_HUMAN_HARMONICS.to_string(),
            sentiment_score: 0.85,
            ethical_intensity: 0.8,
            idle_feedback_quality: 0.5,
        }
    }
}

/// One deployed idea, kept in the pipeline's memory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleRecord {
    pub cycle: usize,
    pub decision_id: DecisionId,
    pub resonance: f64,
    pub spec: IdeaSpec,
    pub feedback: Feedback,
    pub deployment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkippedIdea {
    pub idea: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleReport {
    pub cycle: usize,
    pub evaluated: usize,
    pub accepted: usize,
    pub skipped: Vec<SkippedIdea>,
    pub failed_tests: usize,
    pub deployed: usize,
    pub feedback_quality: f64,
    pub development: Development,
}

pub struct Pipeline {
    engine: SharedEngine,
    config: PipelineConfig,
    source: Box<dyn IdeaSource>,
    committer: Box<dyn SpecCommitter>,
    resolver: Box<dyn ConflictResolver>,
    tester: Box<dyn Tester>,
    feedback: Box<dyn FeedbackCollector>,
    deployer: Box<dyn Deployer>,
    memory: Vec<CycleRecord>,
    cycles: usize,
}

impl Pipeline {
    /// A pipeline wired with the stub stages.
    pub fn new(engine: SharedEngine, config: PipelineConfig) -> Self {
        Self {
            engine,
            config,
            source: Box::new(StaticIdeas::default()),
            committer: Box::new(TemplateCommitter),
            resolver: Box::new(MarkResolved),
            tester: Box::new(ResolvedTester),
            feedback: Box::new(FixedFeedback::default()),
            deployer: Box::new(LogDeployer),
            memory: Vec::new(),
            cycles: 0,
        }
    }

    pub fn with_source(mut self, source: impl IdeaSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn with_committer(mut self, committer: impl SpecCommitter + 'static) -> Self {
        self.committer = Box::new(committer);
        self
    }

    pub fn with_resolver(mut self, resolver: impl ConflictResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_tester(mut self, tester: impl Tester + 'static) -> Self {
        self.tester = Box::new(tester);
        self
    }

    pub fn with_feedback(mut self, feedback: impl FeedbackCollector + 'static) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    pub fn with_deployer(mut self, deployer: impl Deployer + 'static) -> Self {
        self.deployer = Box::new(deployer);
        self
    }

    /// Run one cycle: gate every generated idea through the engine, carry
    /// accepted ones through the stages, then offer the cycle's feedback
    /// quality to the engine as a development trigger.
    pub fn run_cycle(&mut self) -> Result<CycleReport, PipelineError> {
        self.cycles += 1;
        let cycle = self.cycles;
        let ideas = self.source.generate()?;
        debug!(cycle, ideas = ideas.len(), "cycle started");

        let mut accepted = 0;
        let mut skipped = Vec::new();
        let mut failed_tests = 0;
        // Deployed records go straight to memory so a later stage error keeps them.
        let first_deployed = self.memory.len();

        for idea in &ideas {
            let input = Input::new(self.config.source_type.clone(), idea.as_str())
                .with_sentiment(self.config.sentiment_score)
                .with_context(
                    InputContext::with_intensity(self.config.ethical_intensity)
                        .insert("cycle", cycle as u64),
                );

            let acceptance = match self.engine.evaluate(input) {
                Evaluation::Accepted(acceptance) => acceptance,
                Evaluation::Rejected(rejection) => {
                    debug!(%idea, reason = %rejection.reason, "idea skipped");
                    skipped.push(SkippedIdea {
                        idea: idea.clone(),
                        reason: rejection.reason,
                    });
                    continue;
                }
            };
            accepted += 1;

            let spec = self.committer.commit(idea)?;
            let spec = self.resolver.resolve(spec)?;
            if !self.tester.test(&spec)? {
                debug!(%idea, "idea failed testing");
                failed_tests += 1;
                continue;
            }
            let feedback = self.feedback.collect(&spec)?;
            let deployment = self.deployer.deploy(&spec)?;

            self.memory.push(CycleRecord {
                cycle,
                decision_id: acceptance.decision_id,
                resonance: acceptance.resonance,
                spec,
                feedback,
                deployment,
            });
        }

        let deployed = &self.memory[first_deployed..];
        let feedback_quality = if deployed.is_empty() {
            self.config.idle_feedback_quality
        } else {
            deployed.iter().filter(|r| r.feedback.is_positive()).count() as f64
                / deployed.len() as f64
        };
        let deployed = deployed.len();

        let trigger = InputContext::with_intensity(feedback_quality)
            .insert("cycle", cycle as u64)
            .insert("deployed", deployed as u64);
        let development = self.engine.consider_development(trigger);

        info!(
            cycle,
            accepted,
            deployed,
            development = development.status(),
            "cycle finished"
        );

        let report = CycleReport {
            cycle,
            evaluated: ideas.len(),
            accepted,
            skipped,
            failed_tests,
            deployed,
            feedback_quality,
            development,
        };
        Ok(report)
    }

    /// Run `epochs` cycles back to back.
    pub fn run(&mut self, epochs: usize) -> Result<Vec<CycleReport>, PipelineError> {
        (0..epochs).map(|_| self.run_cycle()).collect()
    }

    /// Deployed ideas whose feedback was not positive and need another pass.
    pub fn learn(&self) -> Vec<&CycleRecord> {
        self.memory
            .iter()
            .filter(|r| !r.feedback.is_positive())
            .collect()
    }

    pub fn memory(&self) -> &[CycleRecord] {
        &self.memory
    }

    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attune_core::{EngineConfig, PolicyConfig};

    fn engine() -> SharedEngine {
        SharedEngine::from_config(EngineConfig::default())
    }

    struct Ideas(Vec<&'static str>);

    impl IdeaSource for Ideas {
        fn generate(&mut self) -> Result<Vec<String>, PipelineError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    struct FailingDeployer;

    impl Deployer for FailingDeployer {
        fn deploy(&mut self, _spec: &IdeaSpec) -> Result<String, PipelineError> {
            Err(PipelineError::stage("deploy", "target unreachable"))
        }
    }

    /// Deploys `ok` ideas, then fails.
    struct DeployThenFail {
        ok: usize,
    }

    impl Deployer for DeployThenFail {
        fn deploy(&mut self, spec: &IdeaSpec) -> Result<String, PipelineError> {
            if self.ok == 0 {
                return Err(PipelineError::stage("deploy", "target unreachable"));
            }
            self.ok -= 1;
            Ok(format!("deployed: {}", spec.idea))
        }
    }

    struct RejectAll;

    impl Tester for RejectAll {
        fn test(&mut self, _spec: &IdeaSpec) -> Result<bool, PipelineError> {
            Ok(false)
        }
    }

    #[test]
    fn test_default_cycle_deploys_every_idea() {
        let engine = engine();
        let mut pipeline = Pipeline::new(engine.clone(), PipelineConfig::default());
        let report = pipeline.run_cycle().unwrap();

        assert_eq!(report.cycle, 1);
        assert_eq!(report.evaluated, 2);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.deployed, 2);
        assert!(report.skipped.is_empty());
        assert_eq!(report.feedback_quality, 1.0);
        assert_eq!(pipeline.memory().len(), 2);
        assert!((pipeline.memory()[0].resonance - 0.825).abs() < 1e-12);
        assert_eq!(engine.status().timeline.total, 2);
    }

    #[test]
    fn test_stable_pulse_cycles_do_not_develop() {
        let mut pipeline = Pipeline::new(engine(), PipelineConfig::default());
        // pulse goes 0.8, 0.8, then feedback quality 1.0
        let first = pipeline.run_cycle().unwrap();
        assert_eq!(first.development.status(), "no_development");

        // a cycle with nothing deployed reports the idle quality, equal to the baseline
        let mut quiet = Pipeline::new(engine(), PipelineConfig::default())
            .with_source(Ideas(vec![]));
        let report = quiet.run_cycle().unwrap();
        assert_eq!(report.feedback_quality, 0.5);
        assert_eq!(report.development.status(), "no_development");
    }

    #[test]
    fn test_negative_feedback_swing_rejects_development() {
        let engine = engine();
        let mut pipeline = Pipeline::new(engine.clone(), PipelineConfig::default())
            .with_feedback(FixedFeedback(Feedback {
                sentiment: FeedbackSentiment::Negative,
                issues: vec!["too slow".into()],
            }));
        // quality 0.0 after ideas at 0.8 varies, but (0.85 + 0.0) / 2 is below threshold
        let report = pipeline.run_cycle().unwrap();
        assert_eq!(report.feedback_quality, 0.0);
        assert_eq!(report.development.status(), "development_rejected");
        assert_eq!(pipeline.learn().len(), 2);

        // ideas pull the pulse back to 0.8, so the 0.0 trigger varies again
        let report = pipeline.run_cycle().unwrap();
        assert_eq!(report.development.status(), "development_rejected");
        assert_eq!(pipeline.learn().len(), 4);

        // one surge trigger straight on the engine approves
        let dev = engine.consider_development(InputContext::with_intensity(1.0));
        assert!(dev.is_approved());
    }

    #[test]
    fn test_blocked_source_skips_ideas() {
        let config = PipelineConfig {
            source_type: "monetary_driven".into(),
            ..Default::default()
        };
        let engine = engine();
        let mut pipeline = Pipeline::new(engine.clone(), config);
        let report = pipeline.run_cycle().unwrap();

        assert_eq!(report.accepted, 0);
        assert_eq!(report.skipped.len(), 2);
        assert!(report.skipped[0].reason.contains("blocked"));
        assert!(pipeline.memory().is_empty());
        assert_eq!(engine.status().filter.rejected_count, 2);
    }

    #[test]
    fn test_low_resonance_skips_ideas() {
        let config = PipelineConfig {
            sentiment_score: 0.3,
            ethical_intensity: 0.2,
            ..Default::default()
        };
        let mut pipeline = Pipeline::new(engine(), config);
        let report = pipeline.run_cycle().unwrap();
        assert_eq!(report.skipped.len(), 2);
        assert!(report.skipped[0].reason.contains("harmonic"));
    }

    #[test]
    fn test_failed_tests_are_not_deployed() {
        let mut pipeline =
            Pipeline::new(engine(), PipelineConfig::default()).with_tester(RejectAll);
        let report = pipeline.run_cycle().unwrap();
        assert_eq!(report.accepted, 2);
        assert_eq!(report.failed_tests, 2);
        assert_eq!(report.deployed, 0);
    }

    #[test]
    fn test_stage_error_propagates() {
        let mut pipeline =
            Pipeline::new(engine(), PipelineConfig::default()).with_deployer(FailingDeployer);
        let err = pipeline.run_cycle().unwrap_err();
        assert!(err.to_string().contains("deploy"));
    }

    #[test]
    fn test_stage_error_keeps_earlier_deployments() {
        let engine = engine();
        let mut pipeline = Pipeline::new(engine.clone(), PipelineConfig::default())
            .with_deployer(DeployThenFail { ok: 1 });

        assert!(pipeline.run_cycle().is_err());
        let status = engine.status();
        assert_eq!(status.timeline.total, 2);
        assert_eq!(pipeline.memory().len(), 1);
        assert_eq!(pipeline.memory()[0].spec.idea, "Optimize energy usage");
        assert_eq!(pipeline.memory()[0].cycle, 1);
    }

    #[test]
    fn test_run_epochs() {
        let policy = PolicyConfig {
            harmonic_threshold: 0.5,
            ..Default::default()
        };
        let engine = SharedEngine::from_config(EngineConfig::new(policy));
        let mut pipeline = Pipeline::new(engine.clone(), PipelineConfig::default());
        let reports = pipeline.run(3).unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[2].cycle, 3);
        assert_eq!(pipeline.memory().len(), 6);
        assert_eq!(engine.status().timeline.total, 6);
    }
}
