use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use podgen_cli::{OutputFormat, Overrides, Settings, init_tracing, render};
use podgen_types::build_pod;

/// podgen-generate - Print the test pod without contacting a cluster
#[derive(Parser, Debug)]
#[command(name = "podgen-generate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Value for the pod's ENV variable
    #[arg(long = "env", value_name = "ENV")]
    environment: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,

    /// TOML settings file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let settings = Settings::load(args.config.as_deref())?.apply_overrides(Overrides {
        environment: args.environment,
        ..Default::default()
    });
    debug!(environment = %settings.environment, format = ?args.output, "rendering pod");

    let pod = build_pod(&settings.environment);
    println!("{}", render(&pod, args.output)?);

    Ok(())
}
