use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use release_version::cli::orchestration::{require_branch_name, run_release_workflow, WorkflowArgs};
use release_version::config::{self, BaseStrategy, GitBackend};
use release_version::output::{self, OutputTarget};
use release_version::{git, ui};

#[derive(clap::Parser)]
#[command(
    name = "release-version",
    version,
    about = "Compute the next release tag for a trunk or hotfix branch"
)]
struct Args {
    #[arg(long, env = "BRANCH_NAME", help = "Branch the build runs for")]
    branch: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, default_value = ".", help = "Path inside the git repository")]
    repo: PathBuf,

    #[arg(long, value_enum, help = "How hotfix branches find their base version")]
    strategy: Option<BaseStrategy>,

    #[arg(long, value_enum, help = "Git implementation used to read tags")]
    backend: Option<GitBackend>,

    #[arg(
        long,
        env = "GITHUB_OUTPUT",
        help = "File to append the key=value output to (stdout if unset)"
    )]
    output: Option<PathBuf>,

    #[arg(long, help = "Compute and log the version without emitting it")]
    dry_run: bool,
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("release version computation failed: {:?}", e);
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(strategy) = args.strategy {
        config.resolver.base_strategy = strategy;
    }
    if let Some(backend) = args.backend {
        config.resolver.backend = backend;
    }

    let branch_label = require_branch_name(args.branch.as_deref())?.to_string();
    let repo = git::open(config.resolver.backend, &args.repo)
        .with_context(|| format!("Failed to open git repository at {}", args.repo.display()))?;

    let workflow_args = WorkflowArgs {
        branch: args.branch,
    };
    let result = run_release_workflow(&workflow_args, &config, &repo)
        .with_context(|| format!("Failed to compute version for branch '{}'", branch_label))?;

    ui::display_result(&result);

    if args.dry_run {
        ui::display_status(&format!(
            "Dry run: would emit {}={}",
            config.output.key, result.new_version
        ));
        return Ok(());
    }

    let target = OutputTarget::from_path(args.output);
    output::emit(&target, &config.output.key, &result.new_version.to_string())
        .context("Failed to write output")?;

    Ok(())
}
