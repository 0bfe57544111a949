//! HTML content extraction.
//!
//! Turns a fetched page into the structured fields the generators consume.
//! Extraction is lenient: missing elements produce empty fields and malformed
//! markup never fails.

use scraper::{Html, Selector};

/// Longest body excerpt carried into generation, in characters.
pub const BODY_EXCERPT_MAX_CHARS: usize = 3000;

/// Structured content of a fetched page.
///
/// All text fields default to empty strings; `error` is set when the page
/// could not be retrieved at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    /// Resolved absolute URL the content came from.
    pub url: String,
    /// Text of the first `<title>` element.
    pub title: String,
    /// Text of the first `<h1>` element.
    pub heading: String,
    /// Text of every `<h2>` element, joined with `" | "`.
    pub subheadings: String,
    /// Content of `meta[name='description']`.
    pub meta_description: String,
    /// Concatenated paragraph text, capped at [`BODY_EXCERPT_MAX_CHARS`].
    pub body_excerpt: String,
    /// Content of `meta[name='keywords']`.
    pub meta_keywords: String,
    /// Error message when the fetch failed.
    pub error: Option<String>,
}

impl PageContent {
    /// Content for a page that could not be retrieved.
    pub fn unavailable(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Extracts structured content from a page's HTML.
pub fn extract(url: &str, html: &str) -> PageContent {
    let document = Html::parse_document(html);

    PageContent {
        url: url.to_string(),
        title: first_text(&document, "title"),
        heading: first_text(&document, "h1"),
        subheadings: all_text(&document, "h2").join(" | "),
        meta_description: meta_content(&document, "meta[name='description']"),
        body_excerpt: truncate_chars(&all_text(&document, "p").join(" "), BODY_EXCERPT_MAX_CHARS),
        meta_keywords: meta_content(&document, "meta[name='keywords']"),
        error: None,
    }
}

/// Trimmed text of the first element matching `selector`.
fn first_text(document: &Html, selector: &str) -> String {
    let selector = match Selector::parse(selector) {
        Ok(selector) => selector,
        Err(_) => return String::new(),
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Trimmed text of every element matching `selector`, in document order.
fn all_text(document: &Html, selector: &str) -> Vec<String> {
    let selector = match Selector::parse(selector) {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect()
}

/// Trimmed `content` attribute of the first element matching `selector`.
fn meta_content(document: &Html, selector: &str) -> String {
    let selector = match Selector::parse(selector) {
        Ok(selector) => selector,
        Err(_) => return String::new(),
    };

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

/// Truncates to at most `max_chars` characters without splitting a char.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => text[..index].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
        <head>
            <title>  Acme Coffee Roasters  </title>
            <meta name="description" content="Small-batch coffee roasting.">
            <meta name="keywords" content="coffee, roasting">
        </head>
        <body>
            <h1>Fresh Roasted Coffee</h1>
            <h2>Our Beans</h2>
            <h2>Brewing Guides</h2>
            <p>We roast in small batches.</p>
            <p>Orders ship within a day.</p>
        </body>
        </html>
    "#;

    #[test]
    fn extracts_all_fields() {
        let content = extract("https://acme.test/", PAGE);

        assert_eq!(content.url, "https://acme.test/");
        assert_eq!(content.title, "Acme Coffee Roasters");
        assert_eq!(content.heading, "Fresh Roasted Coffee");
        assert_eq!(content.subheadings, "Our Beans | Brewing Guides");
        assert_eq!(content.meta_description, "Small-batch coffee roasting.");
        assert_eq!(content.meta_keywords, "coffee, roasting");
        assert_eq!(
            content.body_excerpt,
            "We roast in small batches. Orders ship within a day."
        );
        assert_eq!(content.error, None);
    }

    #[test]
    fn missing_elements_yield_empty_fields() {
        let content = extract("https://bare.test/", "<html><body><div>hi</div></body></html>");

        assert_eq!(content.title, "");
        assert_eq!(content.heading, "");
        assert_eq!(content.subheadings, "");
        assert_eq!(content.meta_description, "");
        assert_eq!(content.meta_keywords, "");
        assert_eq!(content.body_excerpt, "");
    }

    #[test]
    fn only_the_first_heading_is_used() {
        let html = "<body><h1>First</h1><h1>Second</h1></body>";
        assert_eq!(extract("https://x.test/", html).heading, "First");
    }

    #[test]
    fn body_excerpt_is_capped() {
        let paragraph = "word ".repeat(1000);
        let html = format!("<body><p>{paragraph}</p></body>");

        let content = extract("https://x.test/", &html);
        assert_eq!(content.body_excerpt.chars().count(), BODY_EXCERPT_MAX_CHARS);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 4), "éééé");
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn unavailable_carries_the_error() {
        let content = PageContent::unavailable("https://x.test/", "timed out");

        assert_eq!(content.url, "https://x.test/");
        assert_eq!(content.error.as_deref(), Some("timed out"));
        assert_eq!(content.title, "");
        assert_eq!(content.body_excerpt, "");
    }
}
