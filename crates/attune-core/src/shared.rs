use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::config::EngineConfig;
use crate::engine::DecisionEngine;
use crate::model::{Development, Evaluation, Input, InputContext, SystemStatus};

/// A cloneable, thread-safe handle to one engine.
///
/// Each call holds the lock for the whole operation, so a pulse is always
/// recorded and compared against its predecessor without another caller
/// slipping a reading in between.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<DecisionEngine>>,
}

impl SharedEngine {
    pub fn new(engine: DecisionEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn from_config(config: EngineConfig) -> Self {
        Self::new(DecisionEngine::new(config))
    }

    pub fn evaluate(&self, input: Input) -> Evaluation {
        self.lock().evaluate(input)
    }

    pub fn consider_development(&self, trigger: InputContext) -> Development {
        self.lock().consider_development(trigger)
    }

    pub fn status(&self) -> SystemStatus {
        self.lock().status()
    }

    pub fn integrate_pattern(&self, pattern: Value) -> String {
        self.lock().integrate_pattern(pattern)
    }

    pub fn store_memory(&self, emotion: Value) {
        self.lock().store_memory(emotion)
    }

    pub fn update_flow(&self, value: f64) {
        self.lock().update_flow(value)
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut DecisionEngine) -> R) -> R {
        f(&mut self.lock())
    }

    // Engine operations never panic mid-update, so a poisoned lock still
    // guards consistent state.
    fn lock(&self) -> MutexGuard<'_, DecisionEngine> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
