use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use attune_core::{Input, InputContext};
use clap::Args;

use crate::output::format::{format_evaluations, format_status};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct EvaluateArgs {
    /// Inputs file (JSON array, object or JSON lines); `-` reads stdin
    pub inputs: Option<PathBuf>,

    /// Source type of a single inline input
    #[arg(long, conflicts_with = "inputs")]
    pub source: Option<String>,

    /// Content of the inline input
    #[arg(long, requires = "source")]
    pub content: Option<String>,

    /// Sentiment score of the inline input
    #[arg(long, requires = "source")]
    pub sentiment: Option<f64>,

    /// Ethical intensity of the inline input
    #[arg(long, requires = "source")]
    pub intensity: Option<f64>,

    /// Print the engine status after evaluating
    #[arg(long)]
    pub status: bool,
}

impl EvaluateArgs {
    fn inline_input(&self) -> Option<Input> {
        let source = self.source.as_ref()?;
        let mut input = Input::new(source.clone(), self.content.as_deref().unwrap_or_default());
        if let Some(score) = self.sentiment {
            input = input.with_sentiment(score);
        }
        if let Some(intensity) = self.intensity {
            input = input.with_context(InputContext::with_intensity(intensity));
        }
        Some(input)
    }
}

pub fn run(args: &EvaluateArgs, policy: Option<&Path>, format: OutputFormat) -> Result<()> {
    let inputs = match (&args.inputs, args.inline_input()) {
        (Some(path), _) => super::read_inputs(path)?,
        (None, Some(input)) => vec![input],
        (None, None) => bail!("Nothing to evaluate: pass an inputs file or --source"),
    };

    let mut engine = super::build_engine(policy)?;
    let results: Vec<_> = inputs.into_iter().map(|input| engine.evaluate(input)).collect();

    let accepted = results.iter().filter(|r| r.is_accepted()).count();
    tracing::info!(accepted, rejected = results.len() - accepted, "evaluation done");

    print!("{}", format_evaluations(&results, format));
    if args.status {
        print!("{}", format_status(&engine.status(), format));
    }
    Ok(())
}
