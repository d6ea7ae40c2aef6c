use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use workqueue::config::Config;
use workqueue::queue::{Classifier, RequestId};

#[derive(Parser)]
#[command(
    name = "workqueue",
    about = "Priority-ordered work request queue service",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        bind: Option<String>,

        /// Path to a TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the priority tier an id would be assigned
    #[command(allow_negative_numbers = true)]
    Classify {
        /// Request id
        id: i64,

        /// Path to a TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate and print the effective configuration
    CheckConfig {
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, config } => {
            let mut cfg =
                workqueue::logging::bootstrap(|| Config::resolve(config.as_deref()))?;
            if let Some(bind) = bind {
                cfg.server.bind = bind;
            }
            cfg.validate()?;
            workqueue::logging::init(&cfg.logging);
            tracing::info!(bind = %cfg.server.bind, "Starting workqueue service");
            workqueue::serve(cfg).await?;
        }
        Commands::Classify { id, config } => {
            let cfg = workqueue::logging::bootstrap(|| Config::resolve(config.as_deref()))?;
            let classifier = Classifier::new(cfg.priority)?;
            let tier = classifier.classify(RequestId::try_from(id)?);
            println!("{id}: {tier} (rank {})", tier.rank());
        }
        Commands::CheckConfig { config } => {
            let cfg = workqueue::logging::bootstrap(|| Config::resolve(config.as_deref()))?;
            cfg.validate()?;
            print!("{}", cfg.to_toml()?);
        }
    }

    Ok(())
}
