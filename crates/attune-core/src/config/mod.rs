pub mod policy;

pub use policy::{EngineConfig, PolicyConfig};
