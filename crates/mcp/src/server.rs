// MCP server: JSON-RPC dispatch and the stdio serve loop

use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo,
    ToolsCapability, DEFAULT_PROTOCOL_VERSION,
};
use crate::codec::{Frame, MessageCodec};
use crate::tools::ToolRegistry;
use anyhow::{bail, Context, Result};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};

pub const DEFAULT_SERVER_NAME: &str = "strands-agents-mcp-server";

/// MCP server exposing the tools of a registry.
///
/// Requests are read as newline-delimited JSON. Each request is handled on its
/// own task and responses are written back in completion order.
pub struct McpServer {
    registry: ToolRegistry,
    name: String,
    version: String,
    instructions: Option<String>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            name: DEFAULT_SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serve on the process stdin/stdout until stdin is closed.
    pub async fn start(self) -> Result<()> {
        tracing::info!(
            server = %self.name,
            tools = self.registry.len(),
            "MCP server ready, listening on stdio"
        );
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve requests read from `reader`, writing responses to `writer`.
    ///
    /// Returns once `reader` reaches end of input and every in-flight request
    /// has been answered, or as soon as writing a response fails.
    pub async fn serve<R, W>(self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let server = Arc::new(self);
        let mut frames = FramedRead::new(reader, MessageCodec::new());
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let mut writer_task = tokio::spawn(async move {
            let mut sink = FramedWrite::new(writer, LinesCodec::new());
            while let Some(line) = rx.recv().await {
                sink.send(line).await?;
            }
            Ok::<(), LinesCodecError>(())
        });

        loop {
            let frame = tokio::select! {
                frame = frames.next() => frame,
                // Only finishes early when a write failed
                result = &mut writer_task => {
                    writer_outcome(result)?;
                    bail!("Response writer stopped before input closed");
                }
            };

            let Some(frame) = frame else {
                break;
            };

            let line = match frame.context("Failed to read from input")? {
                Frame::Message(line) => line,
                rejected => {
                    tracing::debug!(frame = ?rejected, "Rejected input line");
                    send_response(&tx, &JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()));
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            tracing::trace!(request = %line, "Received message");

            let server = server.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(response) = server.handle_message(&line).await {
                    send_response(&tx, &response);
                }
            });
        }

        tracing::info!("Input closed, shutting down");

        drop(tx);
        writer_outcome(writer_task.await)
    }

    /// Handle a single raw message.
    ///
    /// Returns `None` for notifications.
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "Unparseable message");
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()));
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(value.clone()) {
            Ok(request) => request,
            Err(_) => {
                let id = value.get("id").cloned().unwrap_or(Value::Null);
                return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
            }
        };

        self.handle_request(request).await
    }

    /// Dispatch a parsed request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "Received notification");
            return None;
        }
        let id = request.id.unwrap_or(Value::Null);

        let outcome = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(request.params).await,
            method => Err(JsonRpcError::method_not_found(method)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn handle_initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(params) => serde_json::from_value(params)
                .map_err(|e| JsonRpcError::invalid_params(format!("Invalid initialize params: {}", e)))?,
            None => InitializeParams::default(),
        };

        if let Some(client) = &params.client_info {
            tracing::info!(client = %client.name, version = %client.version, "Client connected");
        }

        let result = InitializeResult {
            protocol_version: params
                .protocol_version
                .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string()),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: self.name.clone(),
                version: self.version.clone(),
            },
            instructions: self.instructions.clone(),
        };

        to_result(&result)
    }

    fn handle_tools_list(&self) -> Result<Value, JsonRpcError> {
        to_result(&ListToolsResult {
            tools: self.registry.list_schemas(),
        })
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)))?;

        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)))?;

        tracing::debug!(tool = %params.name, "Calling tool");

        let result = match tool.execute(params.arguments).await {
            Ok(result) => result,
            Err(e) => {
                let message = format!("{:#}", e);
                tracing::warn!(tool = %params.name, error = %message, "Tool call failed");
                CallToolResult::error(message)
            }
        };

        to_result(&result)
    }
}

fn send_response(tx: &mpsc::UnboundedSender<String>, response: &JsonRpcResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            if tx.send(json).is_err() {
                tracing::debug!("Output closed, dropping response");
            }
        }
        Err(e) => tracing::error!(error = %e, "Failed to serialize response"),
    }
}

fn writer_outcome(result: Result<Result<(), LinesCodecError>, JoinError>) -> Result<()> {
    result
        .context("Response writer task failed")?
        .context("Failed to write response")
}

fn to_result<T: serde::Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
