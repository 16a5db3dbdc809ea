/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin, one per line
/// 2. Routes tool calls to the garden
/// 3. Writes JSON-RPC responses to stdout

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::engine::GardenError;
use crate::garden::Garden;
use crate::mcp::protocol::*;
use crate::storage::KeyValueStore;
use crate::tools::{self, *};
use crate::ServerError;

/// MCP server that owns the garden for the lifetime of the session
pub struct McpServer<S: KeyValueStore> {
    garden: Garden<S>,
    /// Whether the client has finished the initialize handshake
    initialized: bool,
}

impl<S: KeyValueStore> McpServer<S> {
    pub fn new(garden: Garden<S>) -> Self {
        Self {
            garden,
            initialized: false,
        }
    }

    pub fn garden(&self) -> &Garden<S> {
        &self.garden
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Blank lines and notifications produce no response.
    pub async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::failure(
                    json!(null),
                    JsonRpcError::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                ));
            }
        };

        let Some(id) = request.id.clone() else {
            self.handle_notification(&request.method);
            return None;
        };

        Some(self.handle_request(id, request))
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                info!("MCP client finished initialization");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    fn handle_request(&mut self, id: Value, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::ok(id, json!(null))
            }
            "tools/list" => JsonRpcResponse::ok(id, json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::failure(
                id,
                JsonRpcError::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
            ),
        }
    }

    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult::tools_only("Bloom Garden", env!("CARGO_PKG_VERSION"));
        to_response(id, &result)
    }

    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::failure(
                    id,
                    JsonRpcError::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                );
            }
            None => {
                return JsonRpcResponse::failure(
                    id,
                    JsonRpcError::INVALID_PARAMS,
                    "Missing parameters",
                );
            }
        };

        debug!("Calling tool '{}'", tool_params.name);
        let result = self.call_tool(&tool_params.name, tool_params.arguments);
        to_response(id, &result)
    }

    /// Route a tool call to its implementation
    pub fn call_tool(&mut self, name: &str, arguments: Map<String, Value>) -> ToolCallResult {
        let garden = &mut self.garden;

        match name {
            "garden_signup" => invoke(arguments, |p| tools::garden_signup(garden, p)),
            "garden_login" => invoke(arguments, |p| tools::garden_login(garden, p)),
            "garden_logout" => invoke(arguments, |_: NoParams| tools::garden_logout(garden)),
            "plant_status" => invoke(arguments, |p| tools::plant_status(garden, p)),
            "plant_water" => invoke(arguments, |p| tools::plant_water(garden, p)),
            "mood_log" => invoke(arguments, |p| tools::mood_log(garden, p)),
            "journal_write" => invoke(arguments, |p| tools::journal_write(garden, p)),
            "habit_create" => invoke(arguments, |p| tools::habit_create(garden, p)),
            "habit_complete" => invoke(arguments, |p| tools::habit_complete(garden, p)),
            "habit_list" => invoke(arguments, |p| tools::habit_list(garden, p)),
            "forum_list" => invoke(arguments, |p| tools::forum_list(garden, p)),
            "forum_post" => invoke(arguments, |p| tools::forum_post(garden, p)),
            "achievements_list" => invoke(arguments, |p| tools::achievements_list(garden, p)),
            "crisis_resources" => invoke(arguments, |_: NoParams| tools::crisis_resources(garden)),
            "wellness_summary" => invoke(arguments, |p| tools::wellness_summary(garden, p)),
            _ => ToolCallResult::failure(format!("Unknown tool: {}", name)),
        }
    }
}

/// Decode a tool's arguments and run it
fn invoke<T: DeserializeOwned>(
    arguments: Map<String, Value>,
    tool: impl FnOnce(T) -> Result<String, GardenError>,
) -> ToolCallResult {
    let params = match serde_json::from_value::<T>(Value::Object(arguments)) {
        Ok(params) => params,
        Err(e) => return ToolCallResult::failure(format!("Invalid arguments: {}", e)),
    };

    match tool(params) {
        Ok(text) => ToolCallResult::ok(text),
        Err(e) => ToolCallResult::failure(e),
    }
}

fn to_response<T: serde::Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::ok(id, value),
        Err(e) => JsonRpcResponse::failure(
            id,
            JsonRpcError::INTERNAL_ERROR,
            format!("Failed to encode result: {}", e),
        ),
    }
}

/// Every tool this server provides
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::of::<SignupParams>(
            "garden_signup",
            "Create an account and plant a seed (sunflower, cactus, fern, rose or bamboo)",
        ),
        ToolDefinition::of::<LoginParams>("garden_login", "Log in with your email"),
        ToolDefinition::of::<NoParams>("garden_logout", "Log out of the garden"),
        ToolDefinition::of::<UserParams>(
            "plant_status",
            "Show your plant's stage, growth points and watering streak",
        ),
        ToolDefinition::of::<UserParams>("plant_water", "Water your plant (+5 growth points)"),
        ToolDefinition::of::<MoodLogParams>(
            "mood_log",
            "Check in with your mood, energy and anxiety (+10 growth points)",
        ),
        ToolDefinition::of::<JournalWriteParams>(
            "journal_write",
            "Write a journal entry (+15 growth points)",
        ),
        ToolDefinition::of::<HabitCreateParams>("habit_create", "Create a new habit to track"),
        ToolDefinition::of::<HabitCompleteParams>(
            "habit_complete",
            "Mark a habit done for today (+20 growth points, once per day)",
        ),
        ToolDefinition::of::<UserParams>("habit_list", "List your active habits and streaks"),
        ToolDefinition::of::<ForumListParams>(
            "forum_list",
            "List community forums, or the threads of one forum",
        ),
        ToolDefinition::of::<ForumPostParams>(
            "forum_post",
            "Start a thread or reply to one (+25 growth points)",
        ),
        ToolDefinition::of::<UserParams>(
            "achievements_list",
            "Show the achievement catalog and what you have earned",
        ),
        ToolDefinition::of::<NoParams>(
            "crisis_resources",
            "Show crisis support hotlines and text lines",
        ),
        ToolDefinition::of::<UserParams>(
            "wellness_summary",
            "Summarize today's check-ins, habits and plant progress",
        ),
    ]
}
