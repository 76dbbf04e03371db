use std::path::Path;

use anyhow::{Context, Result};
use attune_core::SharedEngine;
use attune_pipeline::{Pipeline, PipelineConfig};
use clap::Args;

use crate::output::format::{format_cycles, format_status};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct CycleArgs {
    /// Number of cycles to run
    #[arg(short = 'n', long, default_value = "1")]
    pub epochs: usize,

    /// Source type the pipeline declares for its ideas
    #[arg(long)]
    pub source: Option<String>,

    /// Sentiment score attached to every idea
    #[arg(long)]
    pub sentiment: Option<f64>,

    /// Ethical intensity attached to every idea
    #[arg(long)]
    pub intensity: Option<f64>,

    /// Print the engine status after the last cycle
    #[arg(long)]
    pub status: bool,
}

impl CycleArgs {
    fn pipeline_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::default();
        if let Some(source) = &self.source {
            config.source_type = source.clone();
        }
        if let Some(score) = self.sentiment {
            config.sentiment_score = score;
        }
        if let Some(intensity) = self.intensity {
            config.ethical_intensity = intensity;
        }
        config
    }
}

pub fn run(args: &CycleArgs, policy: Option<&Path>, format: OutputFormat) -> Result<()> {
    let engine = SharedEngine::from_config(super::load_config(policy)?);
    let mut pipeline = Pipeline::new(engine.clone(), args.pipeline_config());

    let reports = pipeline
        .run(args.epochs)
        .context("Pipeline cycle failed")?;

    print!("{}", format_cycles(&reports, format));
    if args.status {
        print!("{}", format_status(&engine.status(), format));
    }
    Ok(())
}
