//! Deterministic meta-variant generation.
//!
//! This is the path taken when no AI backend is configured or the AI call
//! fails. Output is a pure function of its inputs unless `force_new` asks
//! for shuffled template offsets, in which case the caller supplies the rng.

use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::extract::PageContent;
use crate::templates::{self, DESCRIPTION_TEMPLATES, TITLE_TEMPLATES};

/// A generated meta title/description pair.
///
/// The same shape is parsed out of AI responses and serialized into API
/// responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaVariant {
    /// Meta title, ideally 50-60 characters.
    pub title: String,
    /// Meta description, ideally 150-160 characters.
    pub description: String,
}

/// Picks the topic label for template substitution.
///
/// Precedence: first heading, page title, last URL path segment (hyphens
/// become spaces, words capitalized), first keyword.
pub fn resolve_topic(content: &PageContent, keywords: &[String]) -> String {
    if !content.heading.is_empty() {
        return content.heading.clone();
    }
    if !content.title.is_empty() {
        return content.title.clone();
    }
    if let Some(segment) = last_path_segment(&content.url) {
        return titleize(&segment.replace('-', " "));
    }
    keywords.first().cloned().unwrap_or_default()
}

/// Strips the domain and any URL fragments out of a title.
///
/// Whitespace runs collapse to a single space and trailing separator
/// characters are removed.
pub fn clean_title(title: &str, domain: &str) -> String {
    let mut cleaned = title.to_string();

    if !domain.is_empty() {
        if let Ok(domain_pattern) = Regex::new(&format!("(?i){}", regex::escape(domain))) {
            cleaned = domain_pattern.replace_all(&cleaned, "").into_owned();
        }
    }

    cleaned = url_pattern().replace_all(&cleaned, "").into_owned();
    cleaned = whitespace_pattern().replace_all(&cleaned, " ").into_owned();

    trailing_separator_pattern()
        .replace(cleaned.trim(), "")
        .into_owned()
}

/// Generates `count` variants by cycling the template tables.
///
/// Keywords cycle by `index % len`. With `force_new` the title and the
/// description each get an independent random offset per variant; without it
/// the rng is never consumed and the output is fully deterministic.
pub fn generate_fallback(
    keywords: &[String],
    topic: &str,
    domain: &str,
    count: usize,
    force_new: bool,
    rng: &mut impl Rng,
) -> Vec<MetaVariant> {
    // count is caller-supplied; do not preallocate by it
    let mut variants = Vec::new();

    for index in 0..count {
        let keyword = keywords
            .get(index % keywords.len().max(1))
            .map(String::as_str)
            .unwrap_or("");

        let title_index =
            (index + shuffle_offset(force_new, TITLE_TEMPLATES.len(), rng)) % TITLE_TEMPLATES.len();
        let description_index = (index
            + shuffle_offset(force_new, DESCRIPTION_TEMPLATES.len(), rng))
            % DESCRIPTION_TEMPLATES.len();

        let title = templates::fill(TITLE_TEMPLATES[title_index], keyword, topic, domain);
        let description =
            templates::fill(DESCRIPTION_TEMPLATES[description_index], keyword, topic, domain);

        variants.push(MetaVariant {
            title: clean_title(&title, domain),
            description,
        });
    }

    variants
}

fn shuffle_offset(force_new: bool, len: usize, rng: &mut impl Rng) -> usize {
    if force_new { rng.gen_range(0..len) } else { 0 }
}

fn last_path_segment(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(|segment| segment.to_string())
}

/// Capitalizes the first letter of each word.
fn titleize(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)(https?://\S+|www\.\S+)").expect("valid pattern"))
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("valid pattern"))
}

fn trailing_separator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\s\-|]+$").expect("valid pattern"))
}
