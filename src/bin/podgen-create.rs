use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use kube::ResourceExt;
use tracing::debug;

use podgen_cli::{Overrides, Settings, init_tracing};
use podgen_k8s::{KubeClient, PodSummary};
use podgen_types::build_pod;

/// podgen-create - Build the test pod and submit it to a cluster
#[derive(Parser, Debug)]
#[command(name = "podgen-create")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Value for the pod's ENV variable
    #[arg(long = "env", value_name = "ENV")]
    environment: Option<String>,

    /// Namespace to create the pod in
    #[arg(short, long)]
    namespace: Option<String>,

    /// Path to the kubeconfig file (defaults to ~/.kube/config)
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use (defaults to the current context)
    #[arg(long)]
    context: Option<String>,

    /// Ask the API server to validate the pod without persisting it
    #[arg(long)]
    dry_run: bool,

    /// TOML settings file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let settings = Settings::load(args.config.as_deref())?.apply_overrides(Overrides {
        environment: args.environment,
        namespace: args.namespace,
        kubeconfig: args.kubeconfig,
        context: args.context,
    });
    debug!(?settings, "resolved settings");

    let client = match &settings.kubeconfig {
        Some(path) => KubeClient::from_path(path, settings.context.as_deref()).await,
        None if settings.context.is_some() => {
            let path = podgen_k8s::default_kubeconfig_path()?;
            KubeClient::from_path(&path, settings.context.as_deref()).await
        }
        None => KubeClient::from_default_path().await,
    }
    .context("Failed to connect to cluster. Is kubectl configured?")?;

    let pod = build_pod(&settings.environment);
    let created = client
        .create_pod(&settings.namespace, &pod, args.dry_run)
        .await?;

    let summary = PodSummary::from_pod(&created);
    debug!(?summary, uid = ?created.uid(), "server response");

    if args.dry_run {
        println!("{} created (server dry run)", summary.resource_ref());
    } else {
        println!("{} created", summary.resource_ref());
    }

    Ok(())
}
