//! CLI entry point for mdcollect

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mdcollect")]
#[command(version)]
#[command(about = "A schema-validated markdown content collection loader", long_about = None)]
struct Cli {
    /// Set the workspace directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a workspace with a starter collections.yml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Validate every collection against its schema
    #[command(alias = "c")]
    Check,

    /// List collections, or the entries of one collection
    List {
        /// Collection to list entries for
        collection: Option<String>,
    },

    /// Export a collection's validated entries as JSON
    Export {
        /// Collection to export
        collection: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a new entry with the schema's fields stubbed
    New {
        /// Collection to create the entry in
        collection: String,

        /// Title of the new entry
        title: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdcollect=debug,info"
    } else {
        "mdcollect=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine workspace directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing collections workspace in {:?}", target_dir);
            mdcollect::commands::init::run(&target_dir)?;
            println!("Initialized collections workspace in {:?}", target_dir);
        }

        Commands::Check => {
            let workspace = mdcollect::Workspace::new(&base_dir)?;
            tracing::info!("Checking {} collections", workspace.config.collections.len());
            workspace.check()?;
        }

        Commands::List { collection } => {
            let workspace = mdcollect::Workspace::new(&base_dir)?;
            mdcollect::commands::list::run(&workspace, collection.as_deref())?;
        }

        Commands::Export { collection, output } => {
            let workspace = mdcollect::Workspace::new(&base_dir)?;
            mdcollect::commands::export::run(&workspace, &collection, output.as_deref())?;
        }

        Commands::New { collection, title } => {
            let workspace = mdcollect::Workspace::new(&base_dir)?;
            tracing::info!("Creating new entry in `{}`: {}", collection, title);
            workspace.new_entry(&collection, &title)?;
        }
    }

    Ok(())
}
