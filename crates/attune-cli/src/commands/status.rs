use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use crate::output::format::format_status;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct StatusArgs {
    /// Replay these inputs before reporting
    #[arg(long)]
    pub inputs: Option<PathBuf>,
}

pub fn run(args: &StatusArgs, policy: Option<&Path>, format: OutputFormat) -> Result<()> {
    let mut engine = super::build_engine(policy)?;
    if let Some(path) = &args.inputs {
        let inputs = super::read_inputs(path)?;
        tracing::debug!(count = inputs.len(), "replaying inputs");
        for input in inputs {
            let result = engine.evaluate(input);
            tracing::debug!(status = result.status(), reason = result.reason(), "replayed input");
        }
    }

    print!("{}", format_status(&engine.status(), format));
    Ok(())
}
