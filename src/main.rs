use std::path::PathBuf;

use clap::{Parser, Subcommand};

use selfcheck_lib::errors::SelfCheckResult;
use selfcheck_lib::{commands, config};

#[derive(Debug, Parser)]
#[command(name = "selfcheck", version, about = "Design self-check for host selection snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the textual report for a selection snapshot.
    Describe { snapshot: PathBuf },
    /// Send the report to the configured endpoint and print the host events.
    Review { snapshot: PathBuf },
    /// Write a default config.toml.
    InitConfig {
        /// Target file; defaults to the location the config is loaded from.
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> SelfCheckResult<()> {
    selfcheck_lib::init_tracing();

    // Load .env file if present (ignore error if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match cli.command {
        Command::Describe { snapshot } => {
            let report = commands::describe_snapshot(&snapshot)?;
            println!("{report}");
        }
        Command::Review { snapshot } => {
            let config = config::load_config()?;
            for event in commands::review_snapshot(&snapshot, &config).await? {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        Command::InitConfig { path } => {
            let written = commands::init_config(path.as_deref())?;
            println!("config written to {}", written.display());
        }
    }
    Ok(())
}
