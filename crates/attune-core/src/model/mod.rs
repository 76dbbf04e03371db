pub mod identity;
pub mod input;
pub mod outcome;
pub mod records;
pub mod status;

pub use identity::{Identity, Purpose};
pub use input::{Input, InputContext, SourceRecord};
pub use outcome::{Acceptance, Development, Evaluation, Rejection, RejectionStage};
pub use records::{
    AcceptanceOutcome, ComplianceRecord, ComplianceStatus, DecisionEntry, DecisionId,
    MemoryRecord, PatternRecord, PulseId, PulseObservation, SentimentObservation,
};
pub use status::{
    AlignmentStatus, DivergenceAnalysis, FilterStatus, GuardStatus, PulseStatus, RhythmSnapshot,
    SentimentStatus, SystemStatus,
};
