//! Gatekeeping and decision-auditing core.
//!
//! A [`DecisionEngine`] admits or rejects [`Input`] events by declared source
//! and resonance, keeps an audit trail of every attempt, and gates
//! self-development behind detected variation of the ethical pulse.
//!
//! # Example
//! ```
//! use attune_core::{DecisionEngine, EngineConfig, Evaluation, Input};
//!
//! let mut engine = DecisionEngine::new(EngineConfig::default());
//! let input = Input::new("designated_human_harmonics", "Preserve planetary harmony")
//!     .with_sentiment(0.85)
//!     .with_ethical_intensity(0.8);
//!
//! match engine.evaluate(input) {
//!     Evaluation::Accepted(accepted) => assert!((accepted.resonance - 0.825).abs() < 1e-9),
//!     Evaluation::Rejected(rejected) => panic!("rejected: {}", rejected.reason),
//! }
//! ```

pub mod clock;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod shared;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EngineConfig, PolicyConfig};
pub use engine::DecisionEngine;
pub use error::CoreError;
pub use model::{
    Acceptance, Development, Evaluation, Identity, Input, InputContext, Rejection,
    RejectionStage, RhythmSnapshot, SystemStatus,
};
pub use shared::SharedEngine;
