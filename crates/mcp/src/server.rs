// MCP server: JSON-RPC dispatch over a tool registry

use crate::protocol::*;
use crate::tools::ToolRegistry;
use serde_json::Value;
use tracing::{debug, info, warn};

const INSTRUCTIONS: &str = "Network tools backed by a PiNet box on the local network. \
Use ping_host to check whether a device is online and wake_device to send it a \
Wake-on-LAN packet. Both tools return a JSON object; a status of \"error\" carries \
a human-readable message.";

/// Transport-independent MCP request handler.
///
/// Holds only read-only state, so one instance can serve any number of
/// concurrent requests.
pub struct McpServer {
    registry: ToolRegistry,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            info: ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one raw JSON-RPC message. Returns `None` for notifications.
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to parse JSON-RPC message");
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()));
            }
        };

        // A request is a JSON object; a present `id` must not be null.
        let Some(object) = value.as_object() else {
            warn!("JSON-RPC message is not an object");
            return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::invalid_request()));
        };
        let id = match object.get("id") {
            Some(Value::Null) => {
                warn!("JSON-RPC request has a null id");
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::invalid_request()));
            }
            Some(id) => id.clone(),
            None => Value::Null,
        };

        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!(error = %e, "Malformed JSON-RPC request");
                Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()))
            }
        }
    }

    /// Handle a parsed JSON-RPC request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "Notification received");
            return None;
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
        }

        debug!(method = %request.method, id = %id, "Request received");
        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params = params.and_then(|p| serde_json::from_value::<InitializeParams>(p).ok());

        let requested = params.as_ref().map(|p| p.protocol_version.as_str());
        let protocol_version = negotiate_protocol_version(requested);

        match params.as_ref().and_then(|p| p.client_info.as_ref()) {
            Some(client) => info!(
                client = %client.name,
                client_version = %client.version,
                protocol_version,
                "Client initialized"
            ),
            None => info!(protocol_version, "Client initialized"),
        }

        to_result(InitializeResult {
            protocol_version: protocol_version.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
                experimental: Value::Null,
            },
            server_info: self.info.clone(),
            instructions: Some(INSTRUCTIONS.to_string()),
        })
    }

    fn list_tools(&self) -> Result<Value, JsonRpcError> {
        to_result(ListToolsResult {
            tools: self.registry.list_schemas(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| JsonRpcError::invalid_params("Missing params for tools/call"))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| {
                    JsonRpcError::invalid_params(format!("Invalid params for tools/call: {}", e))
                })
            })?;

        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)))?;

        let result = tool
            .execute(params.arguments)
            .await
            .map_err(|e| JsonRpcError::invalid_params(format!("{:#}", e)))?;

        to_result(result)
    }
}

fn to_result(value: impl serde::Serialize) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::pinet_registry;
    use pinet_client::PiNetClient;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn server_for(base_url: &str) -> McpServer {
        let client = PiNetClient::builder()
            .base_url(base_url)
            .api_key("test_key")
            .build()
            .unwrap();
        McpServer::new(pinet_registry(client))
    }

    fn offline_server() -> McpServer {
        server_for("http://127.0.0.1:9")
    }

    async fn call(server: &McpServer, method: &str, params: Value) -> JsonRpcResponse {
        server
            .handle_request(JsonRpcRequest::new(1, method, params))
            .await
            .expect("request should get a response")
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = offline_server();
        let response = call(
            &server,
            "initialize",
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "open-webui", "version": "0.6.0"}
            }),
        )
        .await;

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
        assert!(result["capabilities"].get("experimental").is_none());
        assert_eq!(result["serverInfo"]["name"], "pinet-mcp");
        assert!(result["instructions"].as_str().unwrap().contains("ping_host"));
    }

    #[tokio::test]
    async fn test_initialize_unknown_version_gets_latest() {
        let server = offline_server();
        let response = call(&server, "initialize", json!({"protocolVersion": "2099-01-01"})).await;

        assert_eq!(response.result.unwrap()["protocolVersion"], LATEST_PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_ping() {
        let server = offline_server();
        let response = call(&server, "ping", Value::Null).await;

        assert_eq!(response.result.unwrap(), json!({}));
        assert_eq!(response.id, json!(1));
    }

    #[tokio::test]
    async fn test_list_tools() {
        let server = offline_server();
        let response = call(&server, "tools/list", json!({})).await;

        let result = response.result.unwrap();
        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "ping_host");
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["ip_address"]));
        assert_eq!(tools[1]["name"], "wake_device");
        assert_eq!(tools[1]["inputSchema"]["required"], json!(["mac_address"]));
    }

    #[tokio::test]
    async fn test_call_ping_host() {
        let pinet = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping/192.168.1.1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ip_address": "192.168.1.1",
                "status": "online"
            })))
            .mount(&pinet)
            .await;

        let server = server_for(&pinet.uri());
        let response = call(
            &server,
            "tools/call",
            json!({"name": "ping_host", "arguments": {"ip_address": "192.168.1.1"}}),
        )
        .await;

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(
            result["structuredContent"],
            json!({"ip_address": "192.168.1.1", "status": "online"})
        );
        assert_eq!(result["content"][0]["type"], "text");
        assert!(result.get("isError").is_none());
    }

    #[tokio::test]
    async fn test_call_failure_is_a_result_not_a_fault() {
        let server = offline_server();
        let response = call(
            &server,
            "tools/call",
            json!({"name": "wake_device", "arguments": {"mac_address": "invalid-mac"}}),
        )
        .await;

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["structuredContent"]["status"], "error");
        assert!(!result["structuredContent"]["message"]
            .as_str()
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let server = offline_server();
        let response = call(&server, "tools/call", json!({"name": "reboot", "arguments": {}})).await;

        let error = response.error.unwrap();
        assert_eq!(error.code, JsonRpcError::INVALID_PARAMS);
        assert!(error.message.contains("reboot"));
    }

    #[tokio::test]
    async fn test_call_missing_argument() {
        let server = offline_server();
        let response = call(&server, "tools/call", json!({"name": "ping_host"})).await;

        let error = response.error.unwrap();
        assert_eq!(error.code, JsonRpcError::INVALID_PARAMS);
        assert!(error.message.contains("ping_host"));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = offline_server();
        let response = call(&server, "resources/list", json!({})).await;

        assert_eq!(response.error.unwrap().code, JsonRpcError::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let server = offline_server();
        let response = server
            .handle_request(JsonRpcRequest::notification("notifications/initialized"))
            .await;

        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_handle_message_parse_error() {
        let server = offline_server();
        let response = server.handle_message("{not json").await.unwrap();

        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, JsonRpcError::PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_handle_message_invalid_request() {
        let server = offline_server();

        let response = server.handle_message(r#"{"id": 7, "params": {}}"#).await.unwrap();
        assert_eq!(response.id, json!(7));
        assert_eq!(response.error.unwrap().code, JsonRpcError::INVALID_REQUEST);

        let response = server
            .handle_message(r#"{"jsonrpc": "1.0", "id": 8, "method": "ping"}"#)
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, JsonRpcError::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_handle_message_null_id_is_invalid() {
        let server = offline_server();

        let response = server
            .handle_message(r#"{"jsonrpc": "2.0", "id": null, "method": "ping"}"#)
            .await
            .expect("null id must be answered");
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, JsonRpcError::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_handle_message_rejects_non_objects() {
        let server = offline_server();

        let inputs = [
            r#"["2.0", 1, "ping"]"#,
            r#"[{"jsonrpc": "2.0", "id": 1, "method": "ping"}]"#,
            "42",
        ];
        for raw in inputs {
            let response = server.handle_message(raw).await.unwrap();
            assert_eq!(response.id, Value::Null);
            assert!(response.result.is_none());
            assert_eq!(response.error.unwrap().code, JsonRpcError::INVALID_REQUEST);
        }
    }
}
