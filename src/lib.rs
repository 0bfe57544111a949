//! # metaforge - SEO Meta Content Generation Service
//!
//! This crate implements an HTTP service that generates SEO meta titles and
//! descriptions for a target URL and keyword list. It fetches the page,
//! extracts content signals, infers audience and intent, and produces meta
//! variants either through the Google Gemini API or through a deterministic
//! template engine when no credential is configured or the AI call fails.
//!
//! ## Features
//!
//! - Browser-profiled page fetching that never fails the request
//! - HTML content extraction (title, headings, meta tags, body excerpt)
//! - Rule-table inference of audience, intent, and value proposition
//! - Gemini-backed generation with strict response validation
//! - Deterministic template fallback with keyword cycling
//! - Axum HTTP API with an embedded single-page frontend
//! - Async API with Tokio
//! - Robust error handling and logging
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use metaforge::fetch::PageFetcher;
//! use metaforge::generator::{GenerationRequest, MetaGenerator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let fetcher = PageFetcher::new()?;
//!     let generator = MetaGenerator::new(Arc::new(fetcher), None, "gemini-pro".to_string());
//!
//!     let request = GenerationRequest {
//!         url: "example.com/brewing-guide".to_string(),
//!         keywords: GenerationRequest::parse_keywords("coffee, espresso"),
//!         variant_count: 3,
//!         force_new: false,
//!     };
//!
//!     for variant in generator.generate(&request).await {
//!         println!("{} :: {}", variant.title, variant.description);
//!     }
//!     Ok(())
//! }
//! ```

mod error;

pub mod config;
pub mod extract;
pub mod fetch;
pub mod gemini;
pub mod generator;
pub mod prompt;
pub mod server;
pub mod signals;
pub mod telemetry;
pub mod templates;
pub mod variants;

pub use error::Error;

/// Re-export of the error types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
