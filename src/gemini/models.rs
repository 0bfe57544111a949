//! Models service for the metaforge crate
//!
//! This module provides content generation against Gemini models.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::gemini::http::HttpClient;
use crate::gemini::types::{Content, GenerateContentResponse};

/// Request for generating content
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    /// The contents to generate from
    contents: Vec<Content>,
}

/// Service for interacting with Gemini models
#[derive(Clone)]
pub struct ModelsService {
    /// HTTP client for making API requests
    http_client: HttpClient,
}

impl ModelsService {
    /// Create a new models service
    pub(crate) fn new(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Generate content from a model
    #[instrument(skip(self, contents), level = "debug")]
    pub async fn generate_content(
        &self,
        model: impl Into<String> + std::fmt::Debug,
        contents: Vec<Content>,
    ) -> Result<GenerateContentResponse> {
        let model = model.into();
        let request = GenerateContentRequest { contents };
        let path = format!("models/{}:generateContent", model);

        debug!("Generating content from model {}", model);
        self.http_client.post(&path, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_generate_content() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("POST", "/v1beta/models/gemini-pro:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "Hello"}]}, "finishReason": "STOP"}]}"#,
            )
            .match_query(mockito::Matcher::Any)
            .expect(1)
            .create_async()
            .await;

        let mut http_client = HttpClient::with_api_key("test-key".to_string());
        http_client.set_base_url(server.url());
        let service = ModelsService::new(http_client);

        let contents = vec![Content::new().with_role("user").with_text("Hi")];
        let response = service.generate_content("gemini-pro", contents).await.unwrap();

        assert_eq!(response.text(), "Hello");
        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_content_propagates_api_errors() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("POST", "/v1beta/models/gemini-pro:generateContent")
            .with_status(503)
            .with_body("overloaded")
            .match_query(mockito::Matcher::Any)
            .create_async()
            .await;

        let mut http_client = HttpClient::with_api_key("test-key".to_string());
        http_client.set_base_url(server.url());
        let service = ModelsService::new(http_client);

        let contents = vec![Content::new().with_role("user").with_text("Hi")];
        let result = service.generate_content("gemini-pro", contents).await;

        assert!(matches!(
            result,
            Err(crate::error::Error::Api {
                status_code: 503,
                ..
            })
        ));
        mock_server.assert_async().await;
    }
}
