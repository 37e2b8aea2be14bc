//! MCP Request Handlers
//!
//! Dispatches JSON-RPC 2.0 requests to the feature service.

use relnotes_core::FeatureService;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::protocol::*;

/// Tool answering "what can I use in version X?".
pub const FEATURE_UPDATES_TOOL: &str = "feature-updates";

/// Tool listing every tracked release.
pub const LIST_VERSIONS_TOOL: &str = "list-versions";

/// Separator between the text report and its JSON twin in tool output.
const JSON_SECTION_HEADER: &str = "\n\n--- JSON Response ---\n";

/// MCP request handler
#[derive(Debug, Clone)]
pub struct McpHandler {
    service: FeatureService,
}

impl McpHandler {
    pub fn new(service: FeatureService) -> Self {
        Self { service }
    }

    /// Handle a JSON-RPC message.
    ///
    /// Returns `None` for notifications, which never get a response.
    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "MCP request received");

        if request.is_notification() {
            self.handle_notification(&request.method);
            return None;
        }
        let id = request.id.unwrap_or(JsonRpcId::Null);

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported jsonrpc version: {}",
                    request.jsonrpc
                )),
            ));
        }

        let response = match request.method.as_str() {
            "ping" => JsonRpcResponse::success(id, json!({})),
            "initialize" => self.handle_initialize(id, request.params),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => {
                warn!(method = %request.method, "Unknown MCP method");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(&request.method))
            }
        };
        Some(response)
    }

    fn handle_notification(&self, method: &str) {
        match method {
            "notifications/initialized" => info!("MCP client initialized"),
            other => debug!(method = %other, "ignoring notification"),
        }
    }

    fn handle_initialize(&self, id: JsonRpcId, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_params(format!("Invalid initialize params: {}", e)),
                    )
                }
            },
            None => InitializeParams::default(),
        };

        if let Some(client) = &params.client_info {
            info!(client = %client.name, client_version = %client.version, "MCP client connected");
        }

        let result = InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: Implementation {
                name: "relnotesd".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };
        to_response(id, &result)
    }

    fn handle_tools_list(&self, id: JsonRpcId) -> JsonRpcResponse {
        to_response(
            id,
            &ListToolsResult {
                tools: tool_definitions(),
            },
        )
    }

    fn handle_tools_call(&self, id: JsonRpcId, params: Option<Value>) -> JsonRpcResponse {
        let call_params: CallToolParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_params(format!("Invalid tool call params: {}", e)),
                    )
                }
            },
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing tool call params"),
                )
            }
        };

        info!(tool = %call_params.name, "Executing MCP tool");

        let result = match call_params.name.as_str() {
            FEATURE_UPDATES_TOOL => self.call_feature_updates(&call_params.arguments),
            LIST_VERSIONS_TOOL => self.call_list_versions(),
            other => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Unknown tool: {}", other)),
                )
            }
        };
        to_response(id, &result)
    }

    fn call_feature_updates(&self, args: &Map<String, Value>) -> CallToolResult {
        let version = match args.get("version") {
            None | Some(Value::Null) => {
                return CallToolResult::error("version argument is required")
            }
            Some(Value::String(v)) => v.as_str(),
            Some(_) => return CallToolResult::error("version must be a string"),
        };

        // `package` is the older spelling of the filter argument
        let library = ["library", "package"]
            .iter()
            .find_map(|key| args.get(*key).and_then(Value::as_str))
            .filter(|lib| !lib.is_empty());

        let result = match self.service.features_for_version(version, library) {
            Ok(result) => result,
            Err(e) => return CallToolResult::error(format!("Error getting features: {}", e)),
        };

        let report = self.service.render(&result, version, library);
        let json_view = match serde_json::to_string_pretty(&result) {
            Ok(text) => text,
            Err(e) => return CallToolResult::error(format!("Error encoding features: {}", e)),
        };

        CallToolResult::ok(vec![
            ToolContent::text(report),
            ToolContent::text(format!("{}{}", JSON_SECTION_HEADER, json_view)),
        ])
    }

    fn call_list_versions(&self) -> CallToolResult {
        let mut text = String::from("Tracked releases (newest first):\n");
        for release in self.service.store().all() {
            text.push_str(&format!(
                "- {} ({})\n",
                release.version,
                release.release_date.format("%Y-%m-%d")
            ));
        }
        CallToolResult::ok(vec![ToolContent::text(text)])
    }
}

fn to_response<T: serde::Serialize>(id: JsonRpcId, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
    }
}

/// Tools advertised through `tools/list`.
pub fn tool_definitions() -> Vec<Tool> {
    vec![
        Tool {
            name: FEATURE_UPDATES_TOOL.to_string(),
            description: Some(
                "Get all features available in your project's Go version. Use this to \
                 write modern code with every feature up to and including that version."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "version": {
                        "type": "string",
                        "description": "Your project's Go version (e.g. '1.22')"
                    },
                    "library": {
                        "type": "string",
                        "description": "Only report changes to this standard library package (e.g. 'net/http')"
                    }
                },
                "required": ["version"]
            }),
        },
        Tool {
            name: LIST_VERSIONS_TOOL.to_string(),
            description: Some("List every tracked Go release, newest first.".to_string()),
            input_schema: json!({ "type": "object", "properties": {} }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use relnotes_core::EmbeddedCorpus;

    fn handler() -> McpHandler {
        McpHandler::new(FeatureService::from_source(&EmbeddedCorpus).unwrap())
    }

    fn call(handler: &McpHandler, args: Value) -> CallToolResult {
        let args = match args {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        handler.call_feature_updates(&args)
    }

    fn text_of(content: &ToolContent) -> &str {
        match content {
            ToolContent::Text { text } => text,
        }
    }

    #[test]
    fn missing_version_is_a_tool_error() {
        let result = call(&handler(), json!({}));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result.content[0]), "version argument is required");
    }

    #[test]
    fn non_string_version_is_a_tool_error() {
        let result = call(&handler(), json!({"version": 1.22}));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result.content[0]), "version must be a string");
    }

    #[test]
    fn unknown_version_reports_service_error() {
        let result = call(&handler(), json!({"version": "0.1"}));
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result.content[0]).starts_with("Error getting features: "));
    }

    #[test]
    fn success_returns_report_and_json() {
        let result = call(&handler(), json!({"version": "1.22", "library": "net/http"}));
        assert_eq!(result.is_error, None);
        assert_eq!(result.content.len(), 2);
        assert!(text_of(&result.content[0]).starts_with("Features Available in Your Project (1.22)"));

        let json_part = text_of(&result.content[1]);
        let body = json_part
            .strip_prefix(JSON_SECTION_HEADER)
            .expect("json header");
        let value: Value = serde_json::from_str(body).unwrap();
        assert_eq!(value["to_version"], "1.22");
    }

    #[test]
    fn package_is_accepted_as_library_alias() {
        let h = handler();
        let via_package = call(&h, json!({"version": "1.22", "package": "net/http"}));
        let via_library = call(&h, json!({"version": "1.22", "library": "net/http"}));
        assert_eq!(via_package.content, via_library.content);
    }

    #[test]
    fn notifications_get_no_response() {
        let request = JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: "notifications/initialized".to_string(),
            params: None,
            id: None,
        };
        assert!(handler().handle_request(request).is_none());
    }

    #[test]
    fn unknown_method_is_rejected() {
        let request = JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: "resources/list".to_string(),
            params: None,
            id: Some(JsonRpcId::Number(3)),
        };
        let response = handler().handle_request(request).unwrap();
        assert_eq!(
            response.error.unwrap().code,
            JsonRpcError::METHOD_NOT_FOUND
        );
    }

    #[test]
    fn tool_definitions_require_version() {
        let tools = tool_definitions();
        assert_eq!(tools[0].name, FEATURE_UPDATES_TOOL);
        assert_eq!(tools[0].input_schema["required"], json!(["version"]));
    }
}
