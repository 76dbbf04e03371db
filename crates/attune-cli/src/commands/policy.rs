use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use attune_core::EngineConfig;
use clap::Args;

#[derive(Args)]
pub struct PolicyArgs {
    /// Write the default config to this path instead of printing
    #[arg(long, value_name = "PATH")]
    pub init: Option<PathBuf>,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    pub force: bool,
}

pub fn run(args: &PolicyArgs, policy: Option<&Path>) -> Result<()> {
    if let Some(path) = &args.init {
        if path.exists() && !args.force {
            bail!("{} already exists (use --force to overwrite)", path.display());
        }
        EngineConfig::default()
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = super::load_config(policy)?;
    println!("{}", config.to_json()?);
    Ok(())
}
