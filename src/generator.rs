//! Meta content generation pipeline.
//!
//! [`MetaGenerator`] ties the pieces together: fetch the page, infer audience
//! signals, then produce variants through Gemini when a client is configured.
//! Any AI failure, from transport errors to malformed replies, drops down to
//! the deterministic template path so a request always yields variants.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{debug, info, instrument, warn};

use crate::error::{Error, Result};
use crate::extract::PageContent;
use crate::fetch::{ContentFetcher, domain_of};
use crate::gemini::{self, prelude::Content};
use crate::prompt;
use crate::signals::{self, InferredSignals};
use crate::variants::{self, MetaVariant};

/// A single meta content generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Page URL, with or without a scheme.
    pub url: String,
    /// Ordered keyword list, already split from the comma form.
    pub keywords: Vec<String>,
    /// How many title/description pairs to produce.
    pub variant_count: usize,
    /// When set, randomizes output so repeated calls differ.
    pub force_new: bool,
}

impl GenerationRequest {
    /// Splits a comma-separated keyword string, trimming each entry.
    ///
    /// Order and empty entries are preserved so keyword cycling stays
    /// aligned with what the caller typed.
    pub fn parse_keywords(raw: &str) -> Vec<String> {
        raw.split(',').map(|keyword| keyword.trim().to_string()).collect()
    }
}

/// Produces meta variants for a page.
///
/// Prefers the AI path and falls back to templates when no client is
/// configured or the AI call misbehaves.
pub struct MetaGenerator {
    fetcher: Arc<dyn ContentFetcher>,
    gemini: Option<gemini::Client>,
    model: String,
}

impl MetaGenerator {
    pub fn new(
        fetcher: Arc<dyn ContentFetcher>,
        gemini: Option<gemini::Client>,
        model: String,
    ) -> Self {
        Self {
            fetcher,
            gemini,
            model,
        }
    }

    /// Generates `request.variant_count` variants.
    ///
    /// This never fails: unreachable pages produce empty extracted content,
    /// and AI errors are logged and absorbed by the template fallback.
    #[instrument(skip(self, request), level = "debug", fields(url = %request.url))]
    pub async fn generate(&self, request: &GenerationRequest) -> Vec<MetaVariant> {
        let content = self.fetcher.fetch(&request.url).await;
        let domain = domain_of(&content.url);
        let signals = signals::infer(&content.body_excerpt);

        if let Some(client) = &self.gemini {
            match self
                .generate_with_gemini(client, request, &content, &signals, &domain)
                .await
            {
                Ok(generated) => return generated,
                Err(err) => {
                    warn!(error = %err, "AI generation failed, using template fallback");
                }
            }
        } else {
            info!("Gemini client not configured, using template fallback");
        }

        let topic = variants::resolve_topic(&content, &request.keywords);
        variants::generate_fallback(
            &request.keywords,
            &topic,
            &domain,
            request.variant_count,
            request.force_new,
            &mut rand::thread_rng(),
        )
    }

    async fn generate_with_gemini(
        &self,
        client: &gemini::Client,
        request: &GenerationRequest,
        content: &PageContent,
        signals: &InferredSignals,
        domain: &str,
    ) -> Result<Vec<MetaVariant>> {
        let seed = request
            .force_new
            .then(|| prompt::random_token(&mut rand::thread_rng()));
        let prompt = prompt::build_prompt(request, content, signals, domain, seed.as_deref());

        debug!(model = %self.model, "Requesting AI meta content");
        let response = client
            .models()
            .generate_content(self.model.as_str(), vec![Content::new().with_text(prompt)])
            .await?;

        parse_ai_variants(&response.text(), request.variant_count, domain)
    }
}

/// Pulls a variant array out of a model reply.
///
/// Replies are accepted fenced in a Markdown code block, as a bare JSON array
/// embedded in prose, or as raw JSON text. The array must carry at least
/// `count` complete entries; extras are dropped and titles are scrubbed of
/// the domain and any stray URLs.
fn parse_ai_variants(text: &str, count: usize, domain: &str) -> Result<Vec<MetaVariant>> {
    let json = extract_json(text);
    let parsed: Vec<MetaVariant> = serde_json::from_str(json.trim())?;

    if parsed.is_empty() {
        return Err(Error::UnexpectedResponse(
            "AI reply contained no variants".to_string(),
        ));
    }
    if parsed
        .iter()
        .any(|variant| variant.title.is_empty() || variant.description.is_empty())
    {
        return Err(Error::UnexpectedResponse(
            "AI variant is missing a title or description".to_string(),
        ));
    }
    if parsed.len() < count {
        return Err(Error::UnexpectedResponse(format!(
            "AI reply contained {} variants, wanted {}",
            parsed.len(),
            count
        )));
    }

    Ok(parsed
        .into_iter()
        .take(count)
        .map(|variant| MetaVariant {
            title: variants::clean_title(&variant.title, domain),
            description: variant.description,
        })
        .collect())
}

fn extract_json(text: &str) -> &str {
    if let Some(captures) = fenced_block_pattern().captures(text) {
        if let Some(inner) = captures.get(1) {
            return inner.as_str();
        }
    }
    if let Some(found) = bare_array_pattern().find(text) {
        return found.as_str();
    }
    text
}

fn fenced_block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").expect("valid pattern"))
}

fn bare_array_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[\s*\{[\s\S]*\}\s*\]").expect("valid pattern"))
}
