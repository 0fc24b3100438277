//! HTTP routing
//!
//! Static endpoints plus one component route per synthesized descriptor.
//!
//! Component identifiers are arbitrary store strings, so they are never used
//! as path patterns: a single catch-all route looks the request path up in
//! the table of handlers built at startup.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{FromRequest, Path, Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use aisp_agents::{AgentError, AgentFactory, ComponentHandler, ComponentPayload, RouteDescriptor};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Routes mounted at startup, in synthesis order
    routes: Arc<Vec<RouteDescriptor>>,

    /// Handlers keyed by component identifier
    handlers: Arc<HashMap<String, ComponentHandler>>,
}

impl AppState {
    /// Build the handler table. The first descriptor wins on a repeated
    /// identifier.
    pub fn new(routes: Vec<RouteDescriptor>, agents: Arc<dyn AgentFactory>) -> Self {
        let mut handlers = HashMap::with_capacity(routes.len());
        let mut mounted = Vec::with_capacity(routes.len());

        for route in routes {
            if handlers.contains_key(&route.component_id) {
                warn!(component_id = %route.component_id, "Duplicate component identifier; route skipped");
                continue;
            }

            info!(
                path = %route.path,
                operation = %route.operation_name,
                aisp_source = ?route.aisp_source,
                "Mounting component route"
            );
            handlers.insert(
                route.component_id.clone(),
                ComponentHandler::new(route.clone(), agents.clone()),
            );
            mounted.push(route);
        }

        Self {
            routes: Arc::new(mounted),
            handlers: Arc::new(handlers),
        }
    }
}

/// Build the full router: health, route listing and component routes.
pub fn build_router(routes: Vec<RouteDescriptor>, agents: Arc<dyn AgentFactory>) -> Router {
    let state = AppState::new(routes, agents);

    Router::new()
        .route("/healthz", get(health_check))
        .route("/components", get(list_components))
        .route("/*component_id", any(dispatch_component))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /<component_id> - Answer through the component's bound handler.
///
/// Unknown identifiers are 404; other methods on a known identifier are 405.
async fn dispatch_component(
    State(state): State<AppState>,
    Path(component_id): Path<String>,
    request: Request,
) -> Response {
    let Some(handler) = state.handlers.get(&component_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: format!("No component route for /{}", component_id),
                code: "COMPONENT_NOT_FOUND",
            }),
        )
            .into_response();
    };

    if request.method() != Method::POST {
        return (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "POST")]).into_response();
    }

    let payload = match Json::<ComponentPayload>::from_request(request, &state).await {
        Ok(Json(payload)) => payload,
        Err(rejection) => return rejection.into_response(),
    };

    match handler.handle(payload).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

// =============================================================================
// Health Endpoints
// =============================================================================

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness probe - always returns OK if the process is running.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}

// =============================================================================
// Component Endpoints
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ComponentsListResponse<'a> {
    pub components: &'a [RouteDescriptor],
    pub count: usize,
}

/// GET /components - List the mounted component routes.
async fn list_components(State(state): State<AppState>) -> Response {
    Json(ComponentsListResponse {
        components: &state.routes,
        count: state.routes.len(),
    })
    .into_response()
}

// =============================================================================
// Errors
// =============================================================================

/// Agent failure surfaced as a server error.
pub struct ApiError(AgentError);

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.0.to_string(),
            code: "AGENT_INVOCATION_FAILED",
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aisp_agents::{
        load_routes, Agent, AispRawRow, ComponentRow, EchoAgentFactory, MemoryStore,
    };
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Map, Value};
    use tower::ServiceExt;

    const WIDGET: &str = "API-CRUD-WIDGET-1A2B";

    async fn widget_router() -> Router {
        let store = MemoryStore::with_rows(
            vec![ComponentRow::ready(WIDGET, json!({"aisp": "widget"}))],
            vec![AispRawRow {
                component_id: WIDGET.to_string(),
                aisp: "widget".to_string(),
            }],
        );
        build_router(load_routes(&store).await, Arc::new(EchoAgentFactory::default()))
    }

    async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Option<Value>) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = router.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).ok())
    }

    #[tokio::test]
    async fn test_health_is_idempotent() {
        let router = widget_router().await;
        for _ in 0..3 {
            let (status, body) = send(router.clone(), Method::GET, "/healthz", None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, Some(json!({"status": "OK"})));
        }
    }

    #[tokio::test]
    async fn test_name_only_body_is_echoed() {
        let path = format!("/{}", WIDGET);
        let (status, body) =
            send(widget_router().await, Method::POST, &path, Some(json!({"name": "x"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Some(json!({"echo": {"name": "x"}})));
    }

    #[tokio::test]
    async fn test_id_is_preserved_in_echo() {
        let path = format!("/{}", WIDGET);
        let body = json!({"id": 5, "name": "x"});
        let (status, response) =
            send(widget_router().await, Method::POST, &path, Some(body.clone())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, Some(json!({ "echo": body })));
    }

    #[tokio::test]
    async fn test_missing_name_is_client_error() {
        let path = format!("/{}", WIDGET);
        let (status, _) = send(widget_router().await, Method::POST, &path, Some(json!({}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let (status, _) = send(
            widget_router().await,
            Method::POST,
            "/API-CRUD-NOPE-0000",
            Some(json!({"name": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_null_id_is_echoed_verbatim() {
        let path = format!("/{}", WIDGET);
        let body = json!({"id": null, "name": "x"});
        let (status, response) =
            send(widget_router().await, Method::POST, &path, Some(body.clone())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, Some(json!({ "echo": body })));
    }

    #[tokio::test]
    async fn test_get_on_component_route_is_not_allowed() {
        let path = format!("/{}", WIDGET);
        let (status, _) = send(widget_router().await, Method::GET, &path, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_identifiers_with_pattern_characters_are_served() {
        let store = MemoryStore::with_rows(
            vec![
                ComponentRow::ready(":a", json!({"AISP": "a"})),
                ComponentRow::ready(":b", json!({"AISP": "b"})),
                ComponentRow::ready("*c", json!({"AISP": "c"})),
                ComponentRow::ready("team/widget", json!({"AISP": "w"})),
            ],
            vec![],
        );
        let router = build_router(load_routes(&store).await, Arc::new(EchoAgentFactory::default()));

        for path in ["/:a", "/:b", "/*c", "/team/widget"] {
            let (status, body) =
                send(router.clone(), Method::POST, path, Some(json!({"name": "x"}))).await;
            assert_eq!(status, StatusCode::OK, "{}", path);
            assert_eq!(body, Some(json!({"echo": {"name": "x"}})));
        }

        let (status, _) = send(router.clone(), Method::POST, "/:z", Some(json!({"name": "x"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(router, Method::GET, "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_duplicate_identifier_is_mounted_once() {
        let route = RouteDescriptor::from_record(&aisp_agents::ComponentRecord::new(
            ComponentRow::ready(WIDGET, json!({"AISP": "w"})),
            None,
        ));
        let router = build_router(vec![route.clone(), route], Arc::new(EchoAgentFactory::default()));

        let (_, listing) = send(router, Method::GET, "/components", None).await;
        assert_eq!(listing.and_then(|l| l.get("count").cloned()), Some(json!(1)));
    }

    #[tokio::test]
    async fn test_no_routes_still_serves_health() {
        let router = build_router(Vec::new(), Arc::new(EchoAgentFactory::default()));
        let (status, _) = send(router.clone(), Method::GET, "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, listing) = send(router, Method::GET, "/components", None).await;
        assert_eq!(listing, Some(json!({"components": [], "count": 0})));
    }

    #[tokio::test]
    async fn test_components_listing() {
        let (status, body) = send(widget_router().await, Method::GET, "/components", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            Some(json!({
                "components": [{
                    "component_id": WIDGET,
                    "path": format!("/{}", WIDGET),
                    "operation_name": format!("{}_create", WIDGET),
                    "aisp_source": "raw"
                }],
                "count": 1
            }))
        );
    }

    struct BrokenAgent;

    #[async_trait]
    impl Agent for BrokenAgent {
        fn system_prompt(&self) -> &str {
            ""
        }

        fn model(&self) -> &str {
            "broken"
        }

        async fn invoke(&self, _payload: Map<String, Value>) -> Result<Value, AgentError> {
            Err(AgentError::Model("upstream timeout".to_string()))
        }
    }

    struct BrokenFactory;

    impl AgentFactory for BrokenFactory {
        fn build(&self, _aisp: &str) -> Box<dyn Agent> {
            Box::new(BrokenAgent)
        }
    }

    #[tokio::test]
    async fn test_agent_failure_is_server_error() {
        let store = MemoryStore::with_rows(vec![ComponentRow::ready(WIDGET, json!({}))], vec![]);
        let router = build_router(load_routes(&store).await, Arc::new(BrokenFactory));

        let path = format!("/{}", WIDGET);
        let (status, body) = send(router, Method::POST, &path, Some(json!({"name": "x"}))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            Some(json!({
                "error": "Model error: upstream timeout",
                "code": "AGENT_INVOCATION_FAILED"
            }))
        );
    }
}
