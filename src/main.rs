//! CLI entry point for begrip-admin

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use begrip_admin::{config::AdminConfig, Admin};

#[derive(Parser)]
#[command(name = "begrip-admin")]
#[command(version)]
#[command(about = "Create blog posts and events in the Begrip site repository", long_about = None)]
struct Cli {
    /// Configuration file (defaults to _admin.yml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the submission endpoint
    #[command(alias = "s")]
    Serve {
        /// Address to listen on (overrides config and BEGRIP_ADMIN_ADDR)
        #[arg(short, long)]
        addr: Option<String>,
    },

    /// Commit a new entry from a JSON payload file ("-" for stdin)
    New {
        /// Payload file
        payload: PathBuf,
    },

    /// Show the file a payload would create, without committing it
    Render {
        /// Payload file
        payload: PathBuf,
    },

    /// Show the resolved configuration
    Config,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "begrip_admin=debug,info"
    } else {
        "begrip_admin=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AdminConfig::resolve(cli.config.as_deref())?;
    let admin = Admin::new(config)?;

    match cli.command {
        Commands::Serve { addr } => {
            begrip_admin::commands::serve::run(admin, addr.as_deref()).await?;
        }

        Commands::New { payload } => {
            begrip_admin::commands::new::run(&admin, &payload).await?;
        }

        Commands::Render { payload } => {
            begrip_admin::commands::render::run(&admin, &payload)?;
        }

        Commands::Config => {
            begrip_admin::commands::check::run(&admin)?;
        }

        Commands::Version => {
            println!("begrip-admin version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
