//! The leaf components composed by the engine. Each owns its own history.

pub mod filter;
pub mod guard;
pub mod pulse;
pub mod rhythm;
pub mod sentiment;
pub mod timeline;

pub use filter::{AcceptanceFilter, Classification, SourceRejection};
pub use guard::ComplianceGuard;
pub use pulse::{PulseMonitor, PulseReading};
pub use rhythm::RhythmState;
pub use sentiment::SentimentTracker;
pub use timeline::DecisionTimeline;

pub use crate::model::PulseId;
