use std::sync::Arc;

use tracing::trace;

use crate::clock::Clock;
use crate::config::PolicyConfig;
use crate::model::{Input, SentimentObservation};

/// Records caller-declared sentiment scores. No inference happens here.
#[derive(Debug)]
pub struct SentimentTracker {
    history: Vec<SentimentObservation>,
    baseline: f64,
    default_window: usize,
    clock: Arc<dyn Clock>,
}

impl SentimentTracker {
    pub fn new(policy: &PolicyConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            history: Vec::new(),
            baseline: policy.sentiment_baseline,
            default_window: policy.sentiment_window,
            clock,
        }
    }

    /// Record the input's score (or the baseline when it has none) and return it.
    pub fn observe(&mut self, input: &Input) -> f64 {
        let score = input.sentiment_or(self.baseline);
        trace!(score, "sentiment observed");
        self.history.push(SentimentObservation {
            timestamp: self.clock.now(),
            score,
            raw_input: input.clone(),
        });
        score
    }

    /// Mean of the last `window` scores; the baseline when nothing was observed.
    /// A window of zero is treated as one.
    pub fn average(&self, window: usize) -> f64 {
        if self.history.is_empty() {
            return self.baseline;
        }
        let window = window.max(1);
        let start = self.history.len().saturating_sub(window);
        let recent = &self.history[start..];
        recent.iter().map(|o| o.score).sum::<f64>() / recent.len() as f64
    }

    /// Average over the configured default window.
    pub fn rolling_average(&self) -> f64 {
        self.average(self.default_window)
    }

    pub fn history(&self) -> &[SentimentObservation] {
        &self.history
    }
}
