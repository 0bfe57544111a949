//! Prompt construction for the AI generation path.
//!
//! Builds the structured Markdown prompt sent to Gemini: context analysis,
//! extracted page content, inferred audience signals, writing guidelines,
//! and few-shot examples. The prompt is a pure function of its inputs; the
//! caller supplies the regeneration seed when one is wanted.

use rand::Rng;
use url::Url;

use crate::extract::{PageContent, truncate_chars};
use crate::fetch::normalize_url;
use crate::generator::GenerationRequest;
use crate::signals::InferredSignals;

/// Longest page excerpt embedded in the prompt, in characters.
const PROMPT_EXCERPT_MAX_CHARS: usize = 500;

/// Length of the regeneration seed token.
const SEED_LEN: usize = 6;

/// Builds the meta-content generation prompt.
///
/// `random_seed` is included as an extra context line when present, steering
/// the model away from repeating earlier output for the same page.
pub fn build_prompt(
    request: &GenerationRequest,
    content: &PageContent,
    signals: &InferredSignals,
    domain: &str,
    random_seed: Option<&str>,
) -> String {
    let path = Url::parse(&normalize_url(&request.url))
        .map(|parsed| parsed.path().to_string())
        .unwrap_or_default();

    let excerpt = truncate_chars(&content.body_excerpt, PROMPT_EXCERPT_MAX_CHARS);

    let seed_line = match random_seed {
        Some(seed) => format!("\nRandom seed: {}", seed),
        None => String::new(),
    };

    format!(
        r#"# Professional SEO Meta Content Generator

## CONTEXT ANALYSIS
I have performed a deep analysis of the following website:

URL: {url}
Domain: {domain}
Path: {path}
Primary Keywords: {keywords}
Number of variations needed: {variant_count}{seed_line}

## WEBSITE CONTENT ANALYSIS
Website Title: {title}
Main Heading: {heading}
Subheadings: {subheadings}
Existing Meta Description: {meta_description}
Content Excerpt: {excerpt}...

## AUDIENCE & INTENT ANALYSIS
Based on the content analysis, I have identified:
- The primary audience appears to be {audience}
- The main user intent is likely {intent}
- The content offers unique value through {value_proposition}

## META CONTENT CREATION GUIDELINES

### For Meta Titles (50-60 characters):
1. SPECIFICITY: Be precise about what the page offers - avoid generic claims
2. VALUE PROPOSITION: Clearly communicate the unique benefit to the user
3. KEYWORD USAGE: Integrate primary keywords naturally, preferably near the beginning
4. EMOTIONAL TRIGGERS: Use power words that resonate with the target audience
5. CLARITY: Ensure the title is immediately understandable, not clever at the expense of clarity
6. UNIQUENESS: Each variation must take a completely different angle or approach

### For Meta Descriptions (150-160 characters):
1. EXPAND ON TITLE: Provide additional context that supports the title promise
2. PROBLEM-SOLUTION: Briefly state a problem and how the page solves it
3. CREDIBILITY: Include trust signals or evidence of expertise when relevant
4. CALL-TO-ACTION: End with a subtle, natural call-to-action
5. COMPLETENESS: Ensure it reads as a complete thought, not a fragment
6. DIFFERENTIATION: Highlight what makes this content unique from competitors

## CRITICAL REQUIREMENTS
- ABSOLUTELY NO URLs or domain names in titles
- NO generic phrases like "comprehensive guide" unless truly applicable
- NO clickbait or false promises
- MUST sound like it was written by a professional copywriter
- MUST be something a real business would actually use
- MUST be specific to the page content, not interchangeable with other sites

## OUTPUT FORMAT
Provide a JSON array with objects containing title and description properties.
Each variation must be completely unique in approach and angle.

## EXAMPLES OF EXCELLENT META CONTENT

### For a Coffee Machine Review Site:
Title: "Top 5 Espresso Machines Under $500 - Barista-Tested Picks"
Description: "Our coffee experts tested 23 espresso makers for crema quality, temperature consistency, and durability. See which affordable models outperformed $1,000+ machines."

### For a Digital Marketing Agency:
Title: "Data-Driven SEO Strategies That Increased Client Traffic 327%"
Description: "Discover the exact SEO framework we used to triple organic traffic for 17 B2B companies. Case studies, implementation steps, and ROI calculations included."

### For a Recipe Blog:
Title: "15-Minute Mediterranean Meals - Weeknight Dinner Solved"
Description: "Quick, authentic Mediterranean recipes using pantry staples. Each meal packs 25g+ protein, costs under $3/serving, and requires just one pan. Meal prep tips included."
"#,
        url = request.url,
        domain = domain,
        path = path,
        keywords = request.keywords.join(", "),
        variant_count = request.variant_count,
        seed_line = seed_line,
        title = content.title,
        heading = content.heading,
        subheadings = content.subheadings,
        meta_description = content.meta_description,
        excerpt = excerpt,
        audience = signals.audience,
        intent = signals.intent,
        value_proposition = signals.value_proposition,
    )
}

/// Short lowercase alphanumeric token for regeneration prompts.
pub(crate) fn random_token(rng: &mut impl Rng) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    (0..SEED_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::extract::extract;
    use crate::signals::infer;

    fn request() -> GenerationRequest {
        GenerationRequest {
            url: "example.com/blog/brewing-tips".to_string(),
            keywords: GenerationRequest::parse_keywords("coffee, espresso"),
            variant_count: 2,
            force_new: false,
        }
    }

    #[test]
    fn prompt_contains_context_and_sections() {
        let content = extract(
            "https://example.com/blog/brewing-tips",
            "<title>Brew Better</title><h1>Brewing Tips</h1><p>Fast espresso advice.</p>",
        );
        let signals = infer(&content.body_excerpt);
        let prompt = build_prompt(&request(), &content, &signals, "example.com", None);

        assert!(prompt.contains("URL: example.com/blog/brewing-tips"));
        assert!(prompt.contains("Domain: example.com"));
        assert!(prompt.contains("Path: /blog/brewing-tips"));
        assert!(prompt.contains("Primary Keywords: coffee, espresso"));
        assert!(prompt.contains("Number of variations needed: 2"));
        assert!(prompt.contains("## WEBSITE CONTENT ANALYSIS"));
        assert!(prompt.contains("Website Title: Brew Better"));
        assert!(prompt.contains("Main Heading: Brewing Tips"));
        assert!(prompt.contains("## AUDIENCE & INTENT ANALYSIS"));
        assert!(prompt.contains(
            "The content offers unique value through time-saving solutions or efficiency improvements"
        ));
        assert!(prompt.contains("## OUTPUT FORMAT"));
        assert!(prompt.contains("ABSOLUTELY NO URLs or domain names in titles"));
    }

    #[test]
    fn seed_line_appears_only_when_present() {
        let content = extract("https://example.com/", "<p>hello</p>");
        let signals = infer(&content.body_excerpt);

        let without = build_prompt(&request(), &content, &signals, "example.com", None);
        assert!(!without.contains("Random seed:"));

        let with = build_prompt(&request(), &content, &signals, "example.com", Some("abc123"));
        assert!(with.contains("Random seed: abc123"));
    }

    #[test]
    fn excerpt_is_limited_to_five_hundred_chars() {
        let body = format!("<p>{}</p>", "word ".repeat(300));
        let content = extract("https://example.com/", &body);
        let signals = infer(&content.body_excerpt);

        let prompt = build_prompt(&request(), &content, &signals, "example.com", None);

        let marker = "Content Excerpt: ";
        let start = prompt.find(marker).unwrap() + marker.len();
        let end = prompt[start..].find("...").unwrap();
        assert_eq!(prompt[start..start + end].chars().count(), 500);
    }

    #[test]
    fn random_token_is_short_lowercase_alphanumeric() {
        let mut rng = StdRng::seed_from_u64(9);
        let token = random_token(&mut rng);

        assert_eq!(token.len(), 6);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );

        let mut same_seed = StdRng::seed_from_u64(9);
        assert_eq!(random_token(&mut same_seed), token);
    }
}
