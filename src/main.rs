/// Main entry point for the Bloom Garden MCP server
///
/// This file sets up logging, parses command line arguments, and starts the
/// MCP server. JSON-RPC travels over stdin/stdout; logs go to stderr.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use bloom_garden::BloomGardenServer;

const DB_FILE_NAME: &str = "garden.db";

/// Pick the first writable location for the database
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let candidates = [
        dirs::home_dir().map(|p| p.join(".bloom_garden")),
        dirs::data_dir().map(|p| p.join("bloom_garden")),
        dirs::config_dir().map(|p| p.join("bloom_garden")),
        std::env::current_dir().ok().map(|p| p.join(".bloom_garden")),
    ];

    for dir in candidates.iter().flatten() {
        if std::fs::create_dir_all(dir).is_ok() {
            let probe = dir.join(".write_probe");
            if std::fs::write(&probe, "probe").is_ok() {
                let _ = std::fs::remove_file(&probe);
                return Ok(dir.join(DB_FILE_NAME));
            }
        }
    }

    let fallback = std::env::temp_dir().join("bloom_garden");
    std::fs::create_dir_all(&fallback)?;

    tracing::warn!("Using temporary directory for database: {}", fallback.display());
    Ok(fallback.join(DB_FILE_NAME))
}

/// Command line arguments for the Bloom Garden MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long, conflicts_with = "memory")]
    database: Option<PathBuf>,

    /// Keep everything in memory; nothing is saved
    #[arg(long)]
    memory: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("bloom_garden={}", log_level))
        .with_writer(std::io::stderr) // stdout carries JSON-RPC
        .init();

    info!("Starting Bloom Garden MCP server");

    let server = if args.memory {
        BloomGardenServer::in_memory()
    } else {
        let db_path = match args.database {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                path
            }
            None => get_default_database_path()?,
        };

        info!("Using database at: {}", db_path.display());
        BloomGardenServer::new(db_path).await?
    };

    server.run().await?;

    info!("Bloom Garden MCP server shutdown complete");
    Ok(())
}
