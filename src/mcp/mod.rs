/// MCP protocol implementation
///
/// JSON-RPC message types and the stdio server loop that routes tool calls
/// to the garden.

pub mod protocol;
pub mod server;

pub use server::McpServer;
