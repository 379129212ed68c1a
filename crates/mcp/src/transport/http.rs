// MCP over HTTP: one JSON-RPC message per POST

use crate::server::McpServer;
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Serve MCP on `addr` until a shutdown signal arrives.
pub async fn serve(server: Arc<McpServer>, addr: &str) -> Result<()> {
    let app = create_router(server);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("MCP endpoint listening on http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(super::shutdown_signal())
        .await?;

    Ok(())
}

/// Create the MCP router
pub fn create_router(server: Arc<McpServer>) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/health", get(health_check))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
        .layer(CorsLayer::permissive())
        .with_state(server)
}

/// Accept one JSON-RPC message. Notifications are acknowledged with 202.
async fn handle_mcp(State(server): State<Arc<McpServer>>, body: String) -> Response {
    match server.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::pinet_registry;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use pinet_client::PiNetClient;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn router_for(base_url: &str) -> Router {
        let client = PiNetClient::builder()
            .base_url(base_url)
            .api_key("test_key")
            .build()
            .unwrap();
        create_router(Arc::new(McpServer::new(pinet_registry(client))))
    }

    fn post_mcp(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/mcp")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_tools_list_over_http() {
        let app = router_for("http://127.0.0.1:9");

        let response = app
            .oneshot(post_mcp(
                json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}).to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["result"]["tools"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_tools_call_over_http() {
        let pinet = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/wol"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Wake-on-LAN packet sent to AA:BB:CC:DD:EE:FF"
            })))
            .mount(&pinet)
            .await;

        let app = router_for(&pinet.uri());
        let request = json!({
            "jsonrpc": "2.0",
            "id": "call-1",
            "method": "tools/call",
            "params": {"name": "wake_device", "arguments": {"mac_address": "AA:BB:CC:DD:EE:FF"}}
        });

        let response = app.oneshot(post_mcp(request.to_string())).await.unwrap();
        let body = json_body(response).await;

        assert_eq!(body["id"], "call-1");
        assert_eq!(body["result"]["structuredContent"]["status"], "success");
    }

    #[tokio::test]
    async fn test_notification_is_accepted() {
        let app = router_for("http://127.0.0.1:9");

        let response = app
            .oneshot(post_mcp(
                json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_gets_parse_error() {
        let app = router_for("http://127.0.0.1:9");

        let response = app.oneshot(post_mcp("this is not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], -32700);
        assert_eq!(body["id"], Value::Null);
    }

    #[tokio::test]
    async fn test_get_mcp_not_allowed() {
        let app = router_for("http://127.0.0.1:9");

        let response = app
            .oneshot(Request::builder().uri("/mcp").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = router_for("http://127.0.0.1:9");

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "pinet-mcp");
    }
}
