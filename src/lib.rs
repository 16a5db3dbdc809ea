/// Public library interface for the Bloom Garden progression engine
///
/// A user's wellness activity (mood check-ins, journaling, habits,
/// community posts, watering) earns growth points for a virtual plant. This
/// crate exports the garden facade and its types, the storage backends, and
/// an MCP server that drives the garden over stdio.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod repository;
mod engine;
mod seed;
mod garden;
mod analytics;
mod tools;
mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use storage::{CollectionKey, KeyValueStore, MemoryStore, SqliteStore, StorageError};
pub use repository::{PersistenceFailure, Record, Repository, Saved, StoreOperation};
pub use engine::{points, GardenError, GrowthOutcome, HabitCompletionOutcome};
pub use seed::SeedReport;
pub use garden::{Clock, Garden, Recorded};
pub use analytics::DailySummary;
pub use mcp::McpServer;
pub use mcp::protocol::{JsonRpcResponse, ToolCallResult};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Garden error: {0}")]
    Garden(#[from] engine::GardenError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The store chosen at startup
pub type DynStore = Box<dyn KeyValueStore>;

/// Bloom Garden server that implements the MCP protocol
///
/// This server owns the garden for the whole session and exposes it through
/// MCP tools over stdin/stdout.
pub struct BloomGardenServer {
    garden: Garden<DynStore>,
}

impl BloomGardenServer {
    /// Create a server backed by the SQLite database at `db_path`
    ///
    /// This will initialize the database schema and seed the reference
    /// collections if they don't already exist.
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Bloom Garden with database: {:?}", db_path);

        let store = SqliteStore::new(db_path)?;
        Ok(Self::with_store(Box::new(store)))
    }

    /// Create a server whose data lives only as long as the process
    pub fn in_memory() -> Self {
        tracing::info!("Initializing Bloom Garden with in-memory storage");
        Self::with_store(Box::new(MemoryStore::new()))
    }

    pub fn with_store(store: DynStore) -> Self {
        let garden = Garden::open(store);

        let report = garden.seed_report();
        for failure in &report.failures {
            tracing::warn!("Bootstrap could not complete: {}", failure);
        }

        Self { garden }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        let forums = self.garden.forums();
        tracing::info!("Server started successfully, {} forums available", forums.len());

        let mut mcp_server = mcp::McpServer::new(self.garden);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the garden (useful for testing)
    pub fn garden(&self) -> &Garden<DynStore> {
        &self.garden
    }

    pub fn garden_mut(&mut self) -> &mut Garden<DynStore> {
        &mut self.garden
    }

    pub fn into_mcp_server(self) -> McpServer<DynStore> {
        McpServer::new(self.garden)
    }
}
