//! HTTP surface: router, request/response shapes, and handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::generator::{GenerationRequest, MetaGenerator};
use crate::variants::MetaVariant;

/// Upper bound on variants produced for a single request.
const MAX_VARIANT_COUNT: usize = 20;

/// Assembles the application router with request tracing and open CORS.
pub fn build_router(
    generator: Arc<MetaGenerator>,
    environment: String,
    api_configured: bool,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/generate-meta", post(generate_meta))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState {
            generator,
            environment,
            api_configured,
        })
}

#[derive(Clone)]
struct AppState {
    generator: Arc<MetaGenerator>,
    environment: String,
    api_configured: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateMetaBody {
    #[serde(default)]
    url: String,
    #[serde(default)]
    keywords: String,
    #[serde(default = "default_variant_count")]
    variant_count: usize,
    #[serde(default)]
    force_new: bool,
}

fn default_variant_count() -> usize {
    1
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateMetaResponse {
    meta_content: Vec<MetaVariant>,
    url: String,
    keywords: String,
    variant_count: usize,
    environment: String,
}

async fn index_page() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Server is running",
        "environment": state.environment,
        "apiConfigured": state.api_configured,
    }))
}

async fn generate_meta(
    State(state): State<AppState>,
    Json(body): Json<GenerateMetaBody>,
) -> impl IntoResponse {
    if body.url.is_empty() || body.keywords.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "URL and keywords are required"})),
        )
            .into_response();
    }

    let variant_count = body.variant_count.min(MAX_VARIANT_COUNT);
    let request = GenerationRequest {
        url: body.url.clone(),
        keywords: GenerationRequest::parse_keywords(&body.keywords),
        variant_count,
        force_new: body.force_new,
    };

    info!(
        url = %request.url,
        keywords = request.keywords.len(),
        variants = request.variant_count,
        force_new = request.force_new,
        "Meta generation request"
    );

    let meta_content = state.generator.generate(&request).await;

    Json(GenerateMetaResponse {
        meta_content,
        url: body.url,
        keywords: body.keywords,
        variant_count,
        environment: state.environment,
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::extract::PageContent;
    use crate::fetch::ContentFetcher;

    struct UnreachablePage;

    #[async_trait]
    impl ContentFetcher for UnreachablePage {
        async fn fetch(&self, _url: &str) -> PageContent {
            PageContent::unavailable("https://acme.test/brewing", "connection refused")
        }
    }

    fn test_router() -> Router {
        let generator = Arc::new(MetaGenerator::new(
            Arc::new(UnreachablePage),
            None,
            "gemini-pro".to_string(),
        ));
        build_router(generator, "test".to_string(), false)
    }

    async fn send_json(router: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn rejects_missing_url_or_keywords() {
        let (status, body) =
            send_json(test_router(), "/generate-meta", json!({"keywords": "coffee"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "URL and keywords are required"}));

        let (status, body) =
            send_json(test_router(), "/generate-meta", json!({"url": "acme.test"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "URL and keywords are required"}));
    }

    #[tokio::test]
    async fn generates_variants_even_when_the_page_is_unreachable() {
        let (status, body) = send_json(
            test_router(),
            "/generate-meta",
            json!({"url": "acme.test/brewing", "keywords": "coffee, espresso", "variantCount": 2}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["url"], "acme.test/brewing");
        assert_eq!(body["keywords"], "coffee, espresso");
        assert_eq!(body["variantCount"], 2);
        assert_eq!(body["environment"], "test");

        let generated = body["metaContent"].as_array().unwrap();
        assert_eq!(generated.len(), 2);
        assert_eq!(generated[0]["title"], "coffee - Brewing Guide You Can't Miss");
        assert!(!generated[1]["description"].as_str().unwrap().is_empty());
        assert!(!generated[0]["title"].as_str().unwrap().contains("acme.test"));
    }

    #[tokio::test]
    async fn defaults_variant_count_and_ignores_unknown_fields() {
        let (status, body) = send_json(
            test_router(),
            "/generate-meta",
            json!({
                "url": "acme.test",
                "keywords": "coffee",
                "forceNew": true,
                "timestamp": 1724300000u64,
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["variantCount"], 1);
        assert_eq!(body["metaContent"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn caps_excessive_variant_counts() {
        let (status, body) = send_json(
            test_router(),
            "/generate-meta",
            json!({"url": "acme.test", "keywords": "coffee", "variantCount": u64::MAX}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["variantCount"], 20);
        assert_eq!(body["metaContent"].as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn health_reports_status_and_configuration() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "status": "ok",
                "message": "Server is running",
                "environment": "test",
                "apiConfigured": false,
            })
        );
    }

    #[tokio::test]
    async fn index_serves_the_embedded_frontend() {
        let response = test_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/html"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("/generate-meta"));
    }
}
