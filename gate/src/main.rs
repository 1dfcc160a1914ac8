use crate::k8s::credentials;
use crate::k8s::KubeClient;
use crate::wait::PollSettings;
use anyhow::anyhow;
use clap::Parser;
use descriptors::Dependency;
use log::error;
use std::path::PathBuf;
use tokio::runtime::Builder;

mod error;
mod k8s;
mod orchestrator;
mod registry;
mod settings;
mod wait;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Blocks until the given Kubernetes resources exist and are ready",
    long_about = None
)]
struct CliArgs {
    /// Comma separated `namespace/kind/name` groups, waited on in order
    #[arg(short, long, env = "DEPENDENCIES")]
    dependencies: String,

    /// Kubeconfig used outside a cluster [default: ~/.kube/config]
    #[arg(long, env = "KUBECONFIG")]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current one
    #[arg(long)]
    context: Option<String>,

    /// YAML file with polling settings
    #[arg(short, long)]
    config_file: Option<String>,

    /// Seconds between polls, 0 keeps the default of 5
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Polls per phase before giving up, 0 polls forever
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Seconds to wait for each dependency, 0 waits forever
    #[arg(long)]
    timeout: Option<u64>,

    #[arg(long, default_value_t = log::LevelFilter::Info)]
    log_level: log::LevelFilter,
}

fn main() {
    let cli_args = CliArgs::parse();
    env_logger::builder()
        .filter_level(cli_args.log_level)
        .init();

    if let Err(e) = run(cli_args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<(), anyhow::Error> {
    let (dependencies, poll_settings) = prepare(&args)?;
    let source = credentials::detect(|key| std::env::var(key).ok(), args.kubeconfig.as_deref())?;

    let rt = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow!("Failed to create runtime {}", e))?;
    rt.block_on(wait_for_dependencies(
        &source,
        args.context.as_deref(),
        &dependencies,
        &poll_settings,
    ))?;

    Ok(())
}

/// Reads the settings file and the dependency list, before any cluster access.
fn prepare(args: &CliArgs) -> Result<(Vec<Dependency>, PollSettings), error::Error> {
    let polling = match &args.config_file {
        Some(filename) => settings::config::load(filename)?.polling,
        None => settings::Polling::default(),
    };
    let poll_settings: PollSettings = polling
        .override_with(args.poll_interval, args.max_attempts, args.timeout)
        .into();

    let dependencies = descriptors::parse(&args.dependencies)?;
    Ok((dependencies, poll_settings))
}

async fn wait_for_dependencies(
    source: &credentials::Source,
    context: Option<&str>,
    dependencies: &[Dependency],
    poll_settings: &PollSettings,
) -> Result<(), error::Error> {
    let client = KubeClient::new(credentials::connect(source, context).await?);
    orchestrator::run(
        &client,
        dependencies,
        poll_settings,
        &mut std::io::stdout().lock(),
    )
    .await
}
