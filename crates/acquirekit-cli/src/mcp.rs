//! MCP (Model Context Protocol) server implementation

use acquirekit::pipeline::{scrape_error_message, transcript_error_message};
use acquirekit::{
    CollectingChannel, ScrapeRequest, ScrapeTool, Status, StatusEvent, TranscriptRequest,
    TranscriptTool, SCRAPE_TOOL_NAME, TRANSCRIPT_TOOL_NAME,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// JSON-RPC 2.0 request
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// Tool call result content
fn tool_result(text: String, is_error: bool) -> Value {
    let mut result = json!({
        "content": [{
            "type": "text",
            "text": text
        }]
    });
    if is_error {
        result["isError"] = json!(true);
    }
    result
}

/// Wrap a status event as an MCP logging notification
fn status_notification(event: &StatusEvent) -> Value {
    let level = match event.status {
        Status::Error => "error",
        Status::InProgress | Status::Success => "info",
    };
    json!({
        "jsonrpc": "2.0",
        "method": "notifications/message",
        "params": {
            "level": level,
            "logger": "acquirekit",
            "data": event.to_message()
        }
    })
}

/// MCP Server implementation
pub struct McpServer {
    scrape: ScrapeTool,
    transcript: TranscriptTool,
}

impl McpServer {
    pub fn new(scrape: ScrapeTool, transcript: TranscriptTool) -> Self {
        Self { scrape, transcript }
    }

    /// Handle a request, collecting status events of tool calls into `events`
    async fn handle_request(
        &self,
        request: JsonRpcRequest,
        events: &CollectingChannel,
    ) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => {
                self.handle_tools_call(request.id, request.params, events)
                    .await
            }
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            _ => JsonRpcResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        }
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {},
                    "logging": {}
                },
                "serverInfo": {
                    "name": "acquirekit",
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "tools": [
                    {
                        "name": SCRAPE_TOOL_NAME,
                        "description": self.scrape.description(),
                        "inputSchema": self.scrape.input_schema()
                    },
                    {
                        "name": TRANSCRIPT_TOOL_NAME,
                        "description": self.transcript.description(),
                        "inputSchema": self.transcript.input_schema()
                    }
                ]
            }),
        )
    }

    async fn handle_tools_call(
        &self,
        id: Option<Value>,
        params: Value,
        events: &CollectingChannel,
    ) -> JsonRpcResponse {
        let tool_name = params
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
        debug!(tool = tool_name, "Handling tool call");

        let result = match tool_name {
            SCRAPE_TOOL_NAME => {
                let request: ScrapeRequest = match serde_json::from_value(arguments) {
                    Ok(req) => req,
                    Err(e) => {
                        return JsonRpcResponse::error(
                            id,
                            -32602,
                            format!("Invalid arguments: {}", e),
                        );
                    }
                };
                match self
                    .scrape
                    .run(request.url.as_deref(), None, Some(events))
                    .await
                {
                    Ok(acquired) => tool_result(acquired.content, false),
                    Err(e) => tool_result(scrape_error_message(&e), true),
                }
            }
            TRANSCRIPT_TOOL_NAME => {
                let request: TranscriptRequest = match serde_json::from_value(arguments) {
                    Ok(req) => req,
                    Err(e) => {
                        return JsonRpcResponse::error(
                            id,
                            -32602,
                            format!("Invalid arguments: {}", e),
                        );
                    }
                };
                match self
                    .transcript
                    .run(request.url.as_deref(), None, Some(events))
                    .await
                {
                    Ok(acquired) => tool_result(acquired.content, false),
                    Err(e) => tool_result(transcript_error_message(&e), true),
                }
            }
            _ => {
                return JsonRpcResponse::error(id, -32602, format!("Unknown tool: {}", tool_name));
            }
        };

        JsonRpcResponse::success(id, result)
    }
}

fn write_line(stdout: &mut impl Write, value: &impl Serialize) {
    let json = serde_json::to_string(value).unwrap_or_default();
    if let Err(e) = writeln!(stdout, "{}", json).and_then(|_| stdout.flush()) {
        warn!(error = %e, "Failed to write to stdout");
    }
}

/// Run the MCP server over stdio
pub async fn run_server(server: McpServer) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading stdin: {}", e);
                continue;
            }
        };

        if line.is_empty() {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(e) => {
                let response = JsonRpcResponse::error(None, -32700, format!("Parse error: {}", e));
                write_line(&mut stdout, &response);
                continue;
            }
        };

        // Skip notifications (no id)
        if request.id.is_none() && request.method.starts_with("notifications/") {
            continue;
        }

        let events = CollectingChannel::new();
        let response = server.handle_request(request, &events).await;
        for event in events.take() {
            write_line(&mut stdout, &status_notification(&event));
        }
        write_line(&mut stdout, &response);
    }
}
