//! Service status CLI
//!
//! # Commands
//! - `service-status render` - Build the summary from a database and print or write the fragment
//! - `service-status check-link <target>` - Check a detail link target the way the block form does
//! - `service-status options` - List the services offered by the block form
//! - `service-status init-db` - Create the content tables in a database

mod check;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Service status block CLI
#[derive(Parser)]
#[command(name = "service-status")]
#[command(
    author,
    version,
    about = "Render and inspect the service status summary block"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the status summary fragment
    Render {
        /// Block configuration file (.toml or .json)
        #[arg(short, long)]
        config: String,

        /// Site settings file (.toml)
        #[arg(short, long)]
        settings: Option<String>,

        /// Database URL (overrides the settings file)
        #[arg(short, long)]
        database: Option<String>,

        /// Output directory (default: print the fragment to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a detail link target
    CheckLink {
        /// Link target, e.g. /service-status
        target: String,
    },

    /// List the services offered as checkbox options
    Options {
        /// Site settings file (.toml)
        #[arg(short, long)]
        settings: Option<String>,

        /// Database URL (overrides the settings file)
        #[arg(short, long)]
        database: Option<String>,
    },

    /// Create the content tables
    InitDb {
        /// Database URL
        #[arg(short, long)]
        database: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    service_status_core::telemetry::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            config,
            settings,
            database,
            output,
        } => {
            status::run_render(
                &config,
                settings.as_deref(),
                database.as_deref(),
                output.as_deref(),
            )
            .await
        }
        Commands::CheckLink { target } => check::run_check_link(&target),
        Commands::Options { settings, database } => {
            status::run_options(settings.as_deref(), database.as_deref()).await
        }
        Commands::InitDb { database } => status::run_init_db(&database).await,
    }
}
