/// A client session over the MCP tool surface
use bloom_garden::*;
use serde_json::{json, Value};
use tempfile::TempDir;

async fn call(server: &mut McpServer<DynStore>, id: u64, tool: &str, arguments: Value) -> (String, bool) {
    let request = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": tool, "arguments": arguments }
    });
    let response = server
        .process_line(&request.to_string())
        .await
        .expect("requests with an id get a response");
    let response = serde_json::to_value(&response).unwrap();

    let result = &response["result"];
    let text = result["content"][0]["text"].as_str().unwrap().to_string();
    (text, result["isError"].as_bool().unwrap())
}

fn habit_id_from(text: &str) -> String {
    text.lines()
        .find_map(|line| line.strip_prefix("Habit ID: "))
        .unwrap()
        .trim()
        .to_string()
}

#[tokio::test]
async fn test_initialize_handshake() {
    let mut server = BloomGardenServer::in_memory().into_mcp_server();

    let init = json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}});
    let response = server.process_line(&init.to_string()).await.unwrap();
    let response = serde_json::to_value(&response).unwrap();
    assert_eq!(response["result"]["serverInfo"]["name"], "Bloom Garden");

    let notification = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
    assert!(server.process_line(&notification.to_string()).await.is_none());
    assert!(server.is_initialized());
}

#[tokio::test]
async fn test_wellness_day() {
    let mut server = BloomGardenServer::in_memory().into_mcp_server();

    let (text, is_error) = call(
        &mut server,
        1,
        "garden_signup",
        json!({"email": "sam@example.com", "username": "sam", "plant_type": "sunflower"}),
    )
    .await;
    assert!(!is_error, "{}", text);

    let (_, is_error) = call(&mut server, 2, "mood_log", json!({"mood_level": 7, "tags": ["calm"]})).await;
    assert!(!is_error);

    let (text, is_error) = call(&mut server, 3, "habit_create", json!({"name": "Drink water"})).await;
    assert!(!is_error, "{}", text);
    let habit_id = habit_id_from(&text);

    let (text, is_error) = call(&mut server, 4, "habit_complete", json!({"habit_id": habit_id})).await;
    assert!(!is_error, "{}", text);

    let user = server.garden().current_user().unwrap();
    let plant = server.garden().plant(&user.id).unwrap();
    assert_eq!(plant.total_growth_points, points::MOOD_ENTRY + points::HABIT_COMPLETION);

    let (text, is_error) = call(&mut server, 5, "plant_status", json!({})).await;
    assert!(!is_error);
    assert!(text.contains("Growth points: 30"), "{}", text);
}

#[tokio::test]
async fn test_tools_need_a_user() {
    let mut server = BloomGardenServer::in_memory().into_mcp_server();

    let (text, is_error) = call(&mut server, 1, "plant_status", json!({})).await;
    assert!(is_error);
    assert!(text.contains("No user is logged in"), "{}", text);

    let (_, is_error) = call(&mut server, 2, "crisis_resources", json!({})).await;
    assert!(!is_error);
}

#[tokio::test]
async fn test_sqlite_backed_server() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garden.db");

    let server = BloomGardenServer::new(path.clone()).await.unwrap();
    let mut mcp = server.into_mcp_server();
    let (_, is_error) = call(
        &mut mcp,
        1,
        "garden_signup",
        json!({"email": "kim@example.com", "username": "kim", "plant_type": "bamboo"}),
    )
    .await;
    assert!(!is_error);
    drop(mcp);

    let server = BloomGardenServer::new(path).await.unwrap();
    let user = server.garden().current_user().unwrap();
    assert_eq!(user.email, "kim@example.com");
    assert_eq!(user.personality_type, PlantType::Bamboo);
}
