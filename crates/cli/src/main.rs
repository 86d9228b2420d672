//! Electron CLI - Store connectivity and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Check that the configured MongoDB cluster answers
//! electron-cli ping
//!
//! # Count the documents in a collection
//! electron-cli count products
//!
//! # Load documents from a YAML or JSON array
//! electron-cli seed products fixtures/products.yaml
//!
//! # Replace the collection contents instead of appending
//! electron-cli seed featuredBrands brands.json --clear
//! ```
//!
//! Collections are named by their store name or route path
//! (`blogPosts`, `/blogPosts`). The connection is configured with the same
//! environment variables as the storefront.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use electron_core::Collection;

mod commands;

#[derive(Parser)]
#[command(name = "electron-cli")]
#[command(author, version, about = "Electron store CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the store is reachable
    Ping,
    /// Count the documents in a collection
    Count {
        /// Collection name (e.g. `Products`, `blogPosts`)
        collection: Collection,
    },
    /// Insert documents from a YAML or JSON file
    Seed {
        /// Collection name (e.g. `Products`, `blogPosts`)
        collection: Collection,

        /// File holding an array of documents
        file: PathBuf,

        /// Delete existing documents first
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Ping => commands::store::ping().await?,
        Commands::Count { collection } => commands::store::count(collection).await?,
        Commands::Seed {
            collection,
            file,
            clear,
        } => commands::seed::documents(collection, &file, clear).await?,
    }
    Ok(())
}
