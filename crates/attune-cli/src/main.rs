use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod output;

#[derive(Parser)]
#[command(
    name = "attune",
    version,
    about = "Gate inputs by source and resonance, and audit every decision"
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: output::OutputFormat,

    /// Engine config file (JSON); defaults apply when omitted
    #[arg(long, global = true, env = "ATTUNE_POLICY")]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Commands,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let policy = cli.policy.as_deref();
    match &cli.command {
        commands::Commands::Evaluate(args) => commands::evaluate::run(args, policy, cli.format),
        commands::Commands::Develop(args) => commands::develop::run(args, policy, cli.format),
        commands::Commands::Cycle(args) => commands::cycle::run(args, policy, cli.format),
        commands::Commands::Status(args) => commands::status::run(args, policy, cli.format),
        commands::Commands::Policy(args) => commands::policy::run(args, policy),
    }
}
