//! Router builder for the bookshelf HTTP server

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::{NoContext, Timestamp, Uuid};

use bookshelf_kernel::ModuleRegistry;

use crate::error::AppError;

/// Time-ordered request ids (UUIDv7) so logs sort by arrival
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let request_id = Uuid::new_v7(Timestamp::now(NoContext))
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}

/// Builder for constructing the main HTTP router
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router under `/api/{module_name}`
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        self.router = self
            .router
            .nest(&format!("/api/{}", module_name), module_router);
        self
    }

    /// Answer unknown paths with the standard error envelope
    pub fn with_fallback(mut self) -> Self {
        self.router = self.router.fallback(|uri: axum::http::Uri| async move {
            AppError::not_found(format!("no route for {}", uri.path()))
        });
        self
    }

    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
        self
    }

    /// Stamp `x-request-id` on the request and echo it on the response
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        self
    }

    /// Abort requests that outlive `timeout_ms`; the handler future is dropped,
    /// which also drops any in-flight query it owns.
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_millis(timeout_ms),
            ));
        self
    }

    /// Serve a merged OpenAPI document built from every module's fragment
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let openapi_spec = merged_openapi(registry);

        let openapi_obj: utoipa::openapi::OpenApi = serde_json::from_value(openapi_spec.clone())
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "merged OpenAPI document did not parse; serving a bare one");
                utoipa::openapi::OpenApiBuilder::new()
                    .info(
                        utoipa::openapi::InfoBuilder::new()
                            .title("Bookshelf API")
                            .version("1.0.0")
                            .build(),
                    )
                    .build()
            });

        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi_obj),
        );

        // Raw JSON for external consumers
        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(openapi_spec.clone()) }),
        );

        self
    }

    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Base document plus each module's `paths` (prefixed with `/api/{module}`)
/// and `components.schemas`.
pub fn merged_openapi(registry: &ModuleRegistry) -> serde_json::Value {
    let mut spec = serde_json::json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Bookshelf API",
            "version": "1.0.0",
            "description": "Book listing service"
        },
        "paths": {
            "/healthz": {
                "get": {
                    "summary": "Health check",
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": {"text/plain": {"schema": {"type": "string"}}}
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "error": {
                            "type": "object",
                            "properties": {
                                "code": {"type": "string"},
                                "message": {"type": "string"},
                                "details": {"type": "array", "items": {}},
                                "trace_id": {"type": "string"},
                                "timestamp": {"type": "string"}
                            },
                            "required": ["code", "message", "trace_id", "timestamp"]
                        }
                    },
                    "required": ["error"]
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(fragment) = module.openapi() else {
            continue;
        };

        if let Some(paths) = fragment.get("paths").and_then(|p| p.as_object()) {
            for (path, item) in paths {
                let prefixed = match path.as_str() {
                    "/" => format!("/api/{}", module.name()),
                    _ => format!("/api/{}{}", module.name(), path),
                };
                spec["paths"][prefixed] = item.clone();
            }
        }

        if let Some(schemas) = fragment
            .pointer("/components/schemas")
            .and_then(|s| s.as_object())
        {
            for (name, schema) in schemas {
                spec["components"]["schemas"][name] = schema.clone();
            }
        }
    }

    spec
}
