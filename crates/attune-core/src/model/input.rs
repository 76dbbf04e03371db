use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declared provenance of an input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceRecord {
    #[serde(default)]
    pub source_type: String,
    #[serde(default = "Utc::now")]
    pub declared_at: DateTime<Utc>,
}

/// An event submitted for evaluation. Immutable once handed to the engine.
///
/// Missing optional fields are never an error: the engine substitutes its
/// configured defaults for `sentiment_score` and `context.ethical_intensity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Input {
    #[serde(flatten)]
    pub source: SourceRecord,
    #[serde(default)]
    pub content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub context: InputContext,
}

/// Free-form context carried with an input or a development trigger.
/// Only `ethical_intensity` is interpreted; other keys are preserved as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InputContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethical_intensity: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Input {
    pub fn new(source_type: impl Into<String>, content: impl Into<Value>) -> Self {
        Self {
            source: SourceRecord {
                source_type: source_type.into(),
                declared_at: Utc::now(),
            },
            content: content.into(),
            sentiment_score: None,
            context: InputContext::default(),
        }
    }

    pub fn with_sentiment(mut self, score: f64) -> Self {
        self.sentiment_score = Some(score);
        self
    }

    pub fn with_ethical_intensity(mut self, intensity: f64) -> Self {
        self.context.ethical_intensity = Some(intensity);
        self
    }

    pub fn with_context(mut self, context: InputContext) -> Self {
        self.context = context;
        self
    }

    pub fn declared_at(mut self, at: DateTime<Utc>) -> Self {
        self.source.declared_at = at;
        self
    }

    pub fn source_type(&self) -> &str {
        &self.source.source_type
    }

    /// The declared sentiment score, or `default` when absent or not a finite number.
    pub fn sentiment_or(&self, default: f64) -> f64 {
        self.sentiment_score
            .filter(|s| s.is_finite())
            .unwrap_or(default)
    }

    /// JSON form used when this input is recorded as a decision.
    pub fn to_decision(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "source_type".into(),
            Value::String(self.source.source_type.clone()),
        );
        map.insert(
            "declared_at".into(),
            Value::String(self.source.declared_at.to_rfc3339()),
        );
        map.insert("content".into(), self.content.clone());
        if let Some(score) = self.sentiment_score {
            map.insert("sentiment_score".into(), Value::from(score));
        }
        map.insert("context".into(), self.context.to_value());
        Value::Object(map)
    }
}

impl InputContext {
    pub fn with_intensity(intensity: f64) -> Self {
        Self {
            ethical_intensity: Some(intensity),
            extra: Map::new(),
        }
    }

    /// Attach an extra key, e.g. a description of what triggered this context.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The declared ethical intensity, or `default` when absent or not a finite number.
    pub fn ethical_intensity_or(&self, default: f64) -> f64 {
        self.ethical_intensity
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }

    pub fn to_value(&self) -> Value {
        let mut map = self.extra.clone();
        if let Some(intensity) = self.ethical_intensity {
            map.insert("ethical_intensity".into(), Value::from(intensity));
        }
        Value::Object(map)
    }
}
