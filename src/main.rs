//! neutron command-line front end
//!
//! Runs one boundary operation and prints its result as JSON on stdout.
//! Logs go to stderr.

use clap::{Args, Parser, Subcommand};
use neutron::{Config, Neutron};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Inspect Electron application bundles and unpack their app.asar
#[derive(Parser)]
#[command(name = "neutron")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// JSON configuration file
    #[arg(long, global = true, env = "NEUTRON_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the asar executable
    #[arg(long, global = true, env = "NEUTRON_ASAR_PATH")]
    asar_path: Option<PathBuf>,

    /// Never install asar automatically
    #[arg(long, global = true)]
    no_auto_install: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether a bundle is an Electron application
    Classify {
        /// Path to the .app bundle
        path: PathBuf,
    },

    /// List the immediate children of a directory
    Ls {
        /// Directory to list
        dir: PathBuf,
    },

    /// Extract app.asar into a sibling app directory
    Extract {
        /// Path to Contents/Resources/app.asar
        archive: PathBuf,
    },

    /// Put original-app.asar back and remove the extracted directory
    Restore {
        /// Path to Contents/Resources/original-app.asar
        backup: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let config = match load_config(&cli.global).await {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::from(2);
        }
    };
    let neutron = match Neutron::new(config) {
        Ok(neutron) => neutron,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Commands::Classify { path } => print_json(&neutron.classify(&path).await, true),
        Commands::Ls { dir } => print_json(&neutron.list_directory(&dir).await, true),
        Commands::Extract { archive } => {
            let outcome = neutron.extract(&archive).await;
            print_json(&outcome, outcome.success)
        }
        Commands::Restore { backup } => {
            let outcome = neutron.restore(&backup).await;
            print_json(&outcome, outcome.success)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("neutron={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn load_config(opts: &GlobalOpts) -> neutron::Result<Config> {
    let mut config = match &opts.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::default(),
    };
    if let Some(asar_path) = &opts.asar_path {
        config.tools.asar_path = Some(asar_path.clone());
    }
    if opts.no_auto_install {
        config.tools.auto_install = false;
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T, success: bool) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize result");
            ExitCode::FAILURE
        }
    }
}
