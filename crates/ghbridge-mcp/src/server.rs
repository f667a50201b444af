//! MCP server implementation.
//!
//! The server reads one message at a time and answers it before reading the
//! next. Every decoded request gets exactly one response; notifications and
//! undecodable lines get none. No session state is kept: `initialize` may be
//! repeated and tool calls are served whether or not it happened.

use std::sync::Arc;

use ghbridge_core::GitHubApi;
use serde::Serialize;
use serde_json::Value;

use crate::handlers::ToolHandler;
use crate::protocol::{
    InitializeParams, InitializeResult, JsonRpcError, JsonRpcNotification, JsonRpcRequest,
    JsonRpcResponse, PingResult, RequestId, ToolCallParams, ToolsListResult,
};
use crate::tools::ToolRegistry;
use crate::transport::{IncomingMessage, StdioTransport};

/// MCP server for the GitHub tools.
pub struct McpServer {
    handler: ToolHandler,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(registry: ToolRegistry, api: Arc<dyn GitHubApi>) -> Self {
        Self {
            handler: ToolHandler::new(registry, api),
        }
    }

    /// Serve stdin/stdout until end of input.
    pub async fn run(&self) -> ghbridge_core::Result<()> {
        self.run_with(StdioTransport::stdio()).await
    }

    /// Serve the given transport until end of input.
    pub async fn run_with(&self, mut transport: StdioTransport) -> ghbridge_core::Result<()> {
        tracing::info!(
            "Starting MCP server with {} tools",
            self.handler.available_tools().len()
        );

        while let Some(msg) = transport.read_message()? {
            match msg {
                IncomingMessage::Request(req) => {
                    let response = self.handle_request(req).await;
                    transport.write_response(&response)?;
                }
                IncomingMessage::Notification(notif) => self.handle_notification(&notif),
                IncomingMessage::Malformed(reason) => {
                    tracing::warn!("Dropping malformed message: {}", reason);
                }
            }
        }

        tracing::info!("EOF received, shutting down");
        Ok(())
    }

    /// Handle a JSON-RPC request.
    async fn handle_request(&self, req: JsonRpcRequest) -> JsonRpcResponse {
        tracing::debug!("Handling request: {} (id: {:?})", req.method, req.id);

        match req.method.as_str() {
            "initialize" => self.handle_initialize(req.id, req.params),
            "tools/list" => self.handle_tools_list(req.id),
            "tools/call" => self.handle_tools_call(req.id, req.params).await,
            "ping" => success(req.id, &PingResult::pong()),
            method => {
                tracing::warn!("Unknown method: {}", method);
                JsonRpcResponse::error(req.id, JsonRpcError::method_not_found(method))
            }
        }
    }

    /// Handle notifications (no response).
    fn handle_notification(&self, notif: &JsonRpcNotification) {
        match notif.method.as_str() {
            "notifications/initialized" => tracing::info!("Client initialized"),
            "notifications/cancelled" => tracing::debug!("Request cancelled by client"),
            method => tracing::debug!("Ignoring notification: {}", method),
        }
    }

    fn handle_initialize(&self, id: Option<RequestId>, params: Option<Value>) -> JsonRpcResponse {
        if let Some(params) = params {
            match serde_json::from_value::<InitializeParams>(params) {
                Ok(init_params) => {
                    tracing::info!(
                        "Client: {} v{} (protocol: {})",
                        init_params.client_info.name,
                        init_params.client_info.version,
                        init_params.protocol_version
                    );
                }
                Err(e) => {
                    tracing::warn!("Failed to parse initialize params: {}", e);
                }
            }
        }

        success(id, &InitializeResult::current())
    }

    fn handle_tools_list(&self, id: Option<RequestId>) -> JsonRpcResponse {
        let result = ToolsListResult {
            tools: self.handler.available_tools().to_vec(),
        };
        success(id, &result)
    }

    async fn handle_tools_call(
        &self,
        id: Option<RequestId>,
        params: Option<Value>,
    ) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_params(&e.to_string()),
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(id, JsonRpcError::invalid_params("Missing params"));
            }
        };

        tracing::info!("Calling tool: {}", params.name);

        match self.handler.execute(&params.name, params.arguments).await {
            Ok(result) => success(id, &result),
            Err(error) => JsonRpcResponse::error(id, error),
        }
    }
}

fn success<T: Serialize>(id: Option<RequestId>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(&e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{JSONRPC_VERSION, MCP_VERSION};
    use crate::test_support::StubApi;
    use serde_json::json;

    fn server() -> McpServer {
        McpServer::new(ToolRegistry::new(), Arc::new(StubApi::default()))
    }

    fn request(id: i64, method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(RequestId::Number(id.into())),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_initialize_response() {
        let server = server();
        let resp = server
            .handle_request(request(
                1,
                "initialize",
                Some(json!({
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": {"name": "test-client", "version": "1.0.0"}
                })),
            ))
            .await;

        assert!(resp.error.is_none());
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], MCP_VERSION);
        assert_eq!(result["serverInfo"]["name"], "ghbridge");
    }

    #[tokio::test]
    async fn test_initialize_can_be_repeated() {
        let server = server();
        let first = server.handle_request(request(1, "initialize", None)).await;
        let second = server
            .handle_request(request(2, "initialize", Some(json!({"invalid": true}))))
            .await;

        assert_eq!(first.result, second.result);
        assert!(second.error.is_none());
    }

    #[tokio::test]
    async fn test_tools_list() {
        let resp = server().handle_request(request(1, "tools/list", None)).await;

        let result: ToolsListResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        assert_eq!(result.tools.len(), 6);
        assert_eq!(result.tools[0].name, "get_user");
        assert_eq!(result.tools[5].name, "get_content");
    }

    #[tokio::test]
    async fn test_ping() {
        let server = server();
        for id in 1..=2 {
            let resp = server.handle_request(request(id, "ping", None)).await;
            assert_eq!(resp.id, Some(RequestId::Number(id.into())));
            assert_eq!(resp.result, Some(json!({"status": "pong"})));
        }
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let resp = server()
            .handle_request(request(1, "resources/list", None))
            .await;

        let error = resp.error.unwrap();
        assert_eq!(error.code, JsonRpcError::METHOD_NOT_FOUND);
        assert_eq!(error.message, "Method not found");
        assert_eq!(error.data.as_deref(), Some("resources/list"));
    }

    #[tokio::test]
    async fn test_tools_call_before_initialize() {
        let resp = server()
            .handle_request(request(
                7,
                "tools/call",
                Some(json!({"name": "get_user", "arguments": {}})),
            ))
            .await;

        assert!(resp.error.is_none());
        assert_eq!(resp.result.unwrap()["content"][0]["type"], "text");
    }

    #[tokio::test]
    async fn test_tools_call_missing_params() {
        let resp = server().handle_request(request(1, "tools/call", None)).await;

        let error = resp.error.unwrap();
        assert_eq!(error.code, JsonRpcError::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_tools_call_invalid_params() {
        let resp = server()
            .handle_request(request(1, "tools/call", Some(json!("not an object"))))
            .await;

        assert_eq!(resp.error.unwrap().code, JsonRpcError::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_null_id_is_omitted_from_response() {
        let mut req = request(1, "ping", None);
        req.id = None;

        let resp = server().handle_request(req).await;
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn test_handle_notification() {
        let server = server();
        for method in [
            "notifications/initialized",
            "notifications/cancelled",
            "notifications/progress",
        ] {
            server.handle_notification(&JsonRpcNotification {
                jsonrpc: JSONRPC_VERSION.to_string(),
                method: method.to_string(),
                params: None,
            });
        }
    }
}
