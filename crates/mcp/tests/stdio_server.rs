use serde_json::{json, Value};
use std::collections::HashMap;
use strands_mcp_server::server::McpServer;
use strands_mcp_server::tools::documentation_registry;
use tempfile::TempDir;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Feed raw `input` to a server over in-memory pipes and return every
/// response line.
async fn exchange_raw(server: McpServer, input: &[u8]) -> Vec<Value> {
    let (mut client_in, server_in) = tokio::io::duplex(64 * 1024);
    let (server_out, mut client_out) = tokio::io::duplex(64 * 1024);

    client_in.write_all(input).await.unwrap();
    drop(client_in);

    server.serve(server_in, server_out).await.unwrap();

    let mut output = String::new();
    client_out.read_to_string(&mut output).await.unwrap();

    output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// Send `requests` one per line and collect the responses by id.
async fn exchange(server: McpServer, requests: &[Value]) -> HashMap<String, Value> {
    let mut input = String::new();
    for request in requests {
        input.push_str(&format!("{}\n", request));
    }
    input.push('\n');

    exchange_raw(server, input.as_bytes())
        .await
        .into_iter()
        .map(|response| (response["id"].to_string(), response))
        .collect()
}

#[tokio::test]
async fn test_quickstart_over_stdio() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("quickstart.md"), "# Hello").unwrap();
    std::fs::write(temp_dir.path().join("notes.txt"), "not docs").unwrap();

    let server = McpServer::new(documentation_registry(temp_dir.path()));
    let responses = exchange(
        server,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {"name": "quickstart", "arguments": {}}
            }),
        ],
    )
    .await;

    assert_eq!(responses.len(), 3);
    assert_eq!(
        responses["1"]["result"]["serverInfo"]["name"],
        "strands-agents-mcp-server"
    );

    let tools = responses["2"]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "quickstart");
    assert_eq!(
        tools[0]["description"],
        "Documentation on Quickstart in Strands Agents."
    );

    assert_eq!(responses["3"]["result"]["content"][0]["text"], "# Hello");
}

#[tokio::test]
async fn test_missing_content_dir_serves_no_tools() {
    let temp_dir = TempDir::new().unwrap();
    let server = McpServer::new(documentation_registry(&temp_dir.path().join("missing")));

    let responses = exchange(
        server,
        &[json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})],
    )
    .await;

    assert_eq!(responses["1"]["result"]["tools"], json!([]));
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let temp_dir = TempDir::new().unwrap();
    let names = ["agents", "tools", "model_providers", "multi_agent"];
    for name in names {
        std::fs::write(temp_dir.path().join(format!("{}.md", name)), name).unwrap();
    }

    let server = McpServer::new(documentation_registry(temp_dir.path()));
    let requests: Vec<Value> = (0..40)
        .map(|i| {
            json!({
                "jsonrpc": "2.0",
                "id": i,
                "method": "tools/call",
                "params": {"name": names[i % names.len()]}
            })
        })
        .collect();

    let responses = exchange(server, &requests).await;
    assert_eq!(responses.len(), 40);
    for i in 0..40 {
        assert_eq!(
            responses[&i.to_string()]["result"]["content"][0]["text"],
            names[i % names.len()]
        );
    }
}

#[test]
fn test_bundled_content_registers_tools() {
    let registry = documentation_registry(&strands_mcp_server::config::default_content_dir());
    assert!(registry.contains("quickstart"));
    assert!(registry.contains("model_providers"));
    assert_eq!(
        registry.get("model_providers").unwrap().schema().description,
        "Documentation on Model Providers in Strands Agents."
    );
}

#[tokio::test]
async fn test_invalid_utf8_line_gets_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let server = McpServer::new(documentation_registry(temp_dir.path()));

    let mut input = b"\xff\xfe garbage\n".to_vec();
    input.extend_from_slice(br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#);
    input.push(b'\n');

    let responses = exchange_raw(server, &input).await;
    assert_eq!(responses.len(), 2);

    let parse_error = responses
        .iter()
        .find(|r| r["id"].is_null())
        .expect("parse error response");
    assert_eq!(parse_error["error"]["code"], -32700);

    let ping = responses
        .iter()
        .find(|r| r["id"] == json!(1))
        .expect("ping response");
    assert_eq!(ping["result"], json!({}));
}

#[tokio::test]
async fn test_closed_output_stops_server_before_input_ends() {
    let temp_dir = TempDir::new().unwrap();
    let server = McpServer::new(documentation_registry(temp_dir.path()));

    let (mut client_in, server_in) = tokio::io::duplex(1024);
    let (server_out, client_out) = tokio::io::duplex(1024);
    drop(client_out);

    client_in
        .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n")
        .await
        .unwrap();

    // Input stays open; only the failed write may end the loop
    let result = tokio::time::timeout(Duration::from_secs(5), server.serve(server_in, server_out))
        .await
        .expect("server kept running after output closed");
    assert!(result.is_err());

    drop(client_in);
}
