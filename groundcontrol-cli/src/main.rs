//! GroundControl CLI - check feature flags from a shell.
//!
//! # Commands
//!
//! - `groundcontrol check <flag>` - Check whether a flag is enabled
//!
//! Exit code 0 means enabled, 1 means disabled (or the check failed: flags
//! fail closed).

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use groundcontrol::{CheckOptions, GroundControlClient, GroundControlConfig};

/// GroundControl CLI - feature flag checks from the command line
#[derive(Parser)]
#[command(name = "groundcontrol")]
#[command(version)]
#[command(about = "Check GroundControl feature flags from a shell")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a feature flag is enabled
    #[command(alias = "c")]
    Check(CheckArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// Flag name to check
    flag: String,

    /// Actor id to check the flag for; repeatable, order matters
    #[arg(short, long = "actor", value_name = "ID")]
    actors: Vec<String>,

    /// Project identifier
    #[arg(long, env = "GROUNDCONTROL_PROJECT_ID")]
    project_id: String,

    /// API key
    #[arg(long, env = "GROUNDCONTROL_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Base URL of the flag service
    #[arg(long, default_value = groundcontrol::DEFAULT_BASE_URL)]
    base_url: String,

    /// Cache TTL in seconds, forwarded to the service as a cache hint
    #[arg(long, value_name = "SECONDS")]
    cache: Option<i64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "groundcontrol=debug".into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Check(args) => check(args).await,
    }
}

async fn check(args: CheckArgs) -> ExitCode {
    let mut builder =
        GroundControlConfig::builder(args.project_id, args.api_key).base_url(args.base_url);
    if let Some(ttl) = args.cache {
        builder = builder.cache_ttl(ttl);
    }

    let client = GroundControlClient::new(builder.build())
        .on_error(|err| eprintln!("{} {}", "error:".red().bold(), err));

    let options = CheckOptions::actors(args.actors);
    let enabled = client.is_feature_flag_enabled_for(&args.flag, &options).await;

    if enabled {
        println!("{} {}", args.flag.bold(), "enabled".green());
        ExitCode::SUCCESS
    } else {
        println!("{} {}", args.flag.bold(), "disabled".red());
        ExitCode::FAILURE
    }
}
