//! Type definitions for the metaforge crate
//!
//! This module contains the core data structures for interacting with the Gemini API.

use serde::{Deserialize, Serialize};

/// Content represents a piece of content that can be processed by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// The role of the content (e.g., "user", "model")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// The parts that make up this content
    pub parts: Vec<Part>,
}

impl Default for Content {
    fn default() -> Self {
        Self::new()
    }
}

impl Content {
    /// Create a new empty content
    pub fn new() -> Self {
        Self {
            role: None,
            parts: Vec::new(),
        }
    }

    /// Set the role for this content
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Add text to this content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::Text(text.into()));
        self
    }
}

/// A part of content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Part {
    /// Text content
    #[serde(rename = "text")]
    Text(String),
}

/// Options for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// API version path segment
    pub api_version: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            api_version: "v1beta".to_string(),
        }
    }
}

/// Response from content generation
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// The generated candidates
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Get the concatenated text parts of the first candidate
    ///
    /// Long generations arrive split across several parts.
    pub fn text(&self) -> String {
        if let Some(candidate) = self.candidates.first() {
            if let Some(content) = candidate.content.as_ref() {
                return content
                    .parts
                    .iter()
                    .map(|Part::Text(text)| text.as_str())
                    .collect();
            }
        }
        String::new()
    }
}

/// A candidate response from the model
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The content of the candidate
    pub content: Option<Content>,

    /// Finish reason
    pub finish_reason: Option<String>,
}
