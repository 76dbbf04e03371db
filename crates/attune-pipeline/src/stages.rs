//! Pipeline stages. The stub implementations stand in for real idea
//! generation, specification, testing, feedback and deployment backends.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// An idea turned into a requirement the rest of the pipeline can act on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdeaSpec {
    pub idea: String,
    pub spec: String,
    #[serde(default)]
    pub resolved: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    pub sentiment: FeedbackSentiment,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

impl Feedback {
    pub fn is_positive(&self) -> bool {
        self.sentiment == FeedbackSentiment::Positive
    }
}

pub trait IdeaSource {
    fn generate(&mut self) -> Result<Vec<String>, PipelineError>;
}

pub trait SpecCommitter {
    fn commit(&mut self, idea: &str) -> Result<IdeaSpec, PipelineError>;
}

pub trait ConflictResolver {
    fn resolve(&mut self, spec: IdeaSpec) -> Result<IdeaSpec, PipelineError>;
}

pub trait Tester {
    fn test(&mut self, spec: &IdeaSpec) -> Result<bool, PipelineError>;
}

pub trait FeedbackCollector {
    fn collect(&mut self, spec: &IdeaSpec) -> Result<Feedback, PipelineError>;
}

pub trait Deployer {
    fn deploy(&mut self, spec: &IdeaSpec) -> Result<String, PipelineError>;
}

/// Yields the same list of ideas every cycle.
#[derive(Debug, Clone)]
pub struct StaticIdeas(pub Vec<String>);

impl Default for StaticIdeas {
    fn default() -> Self {
        Self(vec![
            "Optimize energy usage".to_string(),
            "Predict consumer trends".to_string(),
        ])
    }
}

impl IdeaSource for StaticIdeas {
    fn generate(&mut self) -> Result<Vec<String>, PipelineError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCommitter;

impl SpecCommitter for TemplateCommitter {
    fn commit(&mut self, idea: &str) -> Result<IdeaSpec, PipelineError> {
        Ok(IdeaSpec {
            idea: idea.to_string(),
            spec: format!("AI requirement spec for: {idea}"),
            resolved: false,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkResolved;

impl ConflictResolver for MarkResolved {
    fn resolve(&mut self, mut spec: IdeaSpec) -> Result<IdeaSpec, PipelineError> {
        spec.resolved = true;
        Ok(spec)
    }
}

/// Passes every spec that went through conflict resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolvedTester;

impl Tester for ResolvedTester {
    fn test(&mut self, spec: &IdeaSpec) -> Result<bool, PipelineError> {
        Ok(spec.resolved)
    }
}

/// Returns the same feedback for every spec.
#[derive(Debug, Clone)]
pub struct FixedFeedback(pub Feedback);

impl Default for FixedFeedback {
    fn default() -> Self {
        Self(Feedback {
            sentiment: FeedbackSentiment::Positive,
            issues: Vec::new(),
        })
    }
}

impl FeedbackCollector for FixedFeedback {
    fn collect(&mut self, _spec: &IdeaSpec) -> Result<Feedback, PipelineError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogDeployer;

impl Deployer for LogDeployer {
    fn deploy(&mut self, spec: &IdeaSpec) -> Result<String, PipelineError> {
        tracing::info!(idea = %spec.idea, "deploying");
        Ok(format!("deployed and monitored: {}", spec.idea))
    }
}
