use std::path::{Path, PathBuf};

use anyhow::Result;
use attune_core::InputContext;
use clap::Args;

use crate::output::format::format_developments;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct DevelopArgs {
    /// Trigger ethical intensity; repeat to offer several triggers in order
    #[arg(short, long = "intensity", required = true)]
    pub intensities: Vec<f64>,

    /// Evaluate these inputs first so sentiment and pulse history are primed
    #[arg(long)]
    pub inputs: Option<PathBuf>,
}

pub fn run(args: &DevelopArgs, policy: Option<&Path>, format: OutputFormat) -> Result<()> {
    let mut engine = super::build_engine(policy)?;
    if let Some(path) = &args.inputs {
        for input in super::read_inputs(path)? {
            let result = engine.evaluate(input);
            tracing::debug!(status = result.status(), "primed input");
        }
    }

    let results: Vec<_> = args
        .intensities
        .iter()
        .map(|&intensity| engine.consider_development(InputContext::with_intensity(intensity)))
        .collect();

    print!("{}", format_developments(&results, format));
    Ok(())
}
