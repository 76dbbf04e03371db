pub mod cycle;
pub mod develop;
pub mod evaluate;
pub mod policy;
pub mod status;

use std::io::Read as _;
use std::path::Path;

use anyhow::{Context, Result};
use attune_core::{DecisionEngine, EngineConfig, Input};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate inputs from a file (object, array or JSON lines) or from flags
    Evaluate(evaluate::EvaluateArgs),
    /// Ask whether self-development is permitted for one or more triggers
    Develop(develop::DevelopArgs),
    /// Run idea pipeline cycles against the engine
    Cycle(cycle::CycleArgs),
    /// Show the aggregate engine status, optionally after replaying inputs
    Status(status::StatusArgs),
    /// Print the effective engine config, or write a default one
    Policy(policy::PolicyArgs),
}

/// Load the engine config from `path`, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

pub fn build_engine(path: Option<&Path>) -> Result<DecisionEngine> {
    Ok(DecisionEngine::new(load_config(path)?))
}

/// Read inputs from a file, or stdin for `-`. Accepts a JSON array, a single
/// object, or a stream of objects (one per line).
pub fn read_inputs(path: &Path) -> Result<Vec<Input>> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read inputs from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    parse_inputs(&text)
}

pub fn parse_inputs(text: &str) -> Result<Vec<Input>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("Invalid input array");
    }
    serde_json::Deserializer::from_str(trimmed)
        .into_iter::<Input>()
        .enumerate()
        .map(|(i, input)| input.with_context(|| format!("Invalid input #{}", i + 1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array() {
        let inputs = parse_inputs(
            r#"[{"source_type": "designated_human_harmonics"}, {"source_type": "ego_tuned"}]"#,
        )
        .unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[1].source_type(), "ego_tuned");
    }

    #[test]
    fn test_parse_json_lines() {
        let text = "{\"source_type\": \"a\"}\n{\"source_type\": \"b\", \"sentiment_score\": 0.9}\n";
        let inputs = parse_inputs(text).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[1].sentiment_score, Some(0.9));
    }

    #[test]
    fn test_parse_single_object() {
        let inputs = parse_inputs(r#"  {"source_type": "designated_human_harmonics"}"#).unwrap();
        assert_eq!(inputs.len(), 1);
    }

    #[test]
    fn test_parse_error_names_position() {
        let err = parse_inputs("{\"source_type\": \"a\"}\n{oops").unwrap_err();
        assert!(err.to_string().contains("#2"));
    }

    #[test]
    fn test_default_config_without_path() {
        let config = load_config(None).unwrap();
        assert_eq!(config.policy.harmonic_threshold, 0.75);
    }
}
