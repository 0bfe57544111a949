//! Template tables for deterministic variant generation.
//!
//! The fallback generator is driven entirely by these tables. Each entry is a
//! format string over `{keyword}`, `{topic}`, `{domain}`, and `{year}`;
//! [`fill`] performs the substitution. Titles deliberately never reference
//! `{domain}`.

use chrono::{Datelike, Utc};

/// Title patterns, cycled by variant index.
pub const TITLE_TEMPLATES: &[&str] = &[
    "{keyword} - {topic} Guide You Can't Miss",
    "{topic}: {keyword} Secrets Revealed",
    "{keyword}? Here's What Actually Works",
    "{topic} {keyword}: Insider Tips & Tricks",
    "The Truth About {keyword} - {topic} Insights",
    "{keyword} Simplified: {topic} Without Confusion",
    "{topic} {keyword} That Changed Everything",
    "{keyword} in {year}: {topic} Edition",
    "Why Experts Swear By These {keyword} {topic}",
    "{keyword} Mistakes? {topic} Solutions Inside",
];

/// Description patterns, cycled by variant index.
pub const DESCRIPTION_TEMPLATES: &[&str] = &[
    r#"Discover {topic} {keyword} that actually deliver results. We've tested what works and what doesn't so you don't have to. Visit {domain} for real solutions."#,
    r#""I finally found {keyword} that work!" See how our {topic} approach has helped thousands. Check out {domain} for strategies others won't tell you about."#,
    r#"Struggling with {topic} {keyword}? We've been there. Our team created this guide after years of trial and error. Real solutions at {domain}."#,
    r#"{topic} {keyword} shouldn't be complicated. We've simplified the process into actionable steps anyone can follow. Find clarity at {domain}."#,
    r#"What if you could master {topic} {keyword} in half the time? Our proven approach has helped thousands succeed. See how we can help you too."#,
    r#"The {topic} {keyword} landscape changes fast. Stay ahead with our regularly updated guide. Get what's working right now at {domain}."#,
    r#"We asked {topic} experts about {keyword} - their answers surprised us. Discover the insider strategies they shared exclusively with us."#,
    r#"Stop wasting time on {topic} {keyword} that don't deliver. Our no-nonsense guide cuts through the noise. Straight to what works."#,
    r#"{topic} {keyword} made simple. We've distilled years of experience into this practical guide. Join thousands who've succeeded with our approach."#,
    r#"Looking for honest {topic} {keyword} advice? No gimmicks, just proven strategies from our team. See what's possible today."#,
];

/// Expands a template's placeholders. `{year}` becomes the current UTC year.
pub fn fill(template: &str, keyword: &str, topic: &str, domain: &str) -> String {
    template
        .replace("{keyword}", keyword)
        .replace("{topic}", topic)
        .replace("{domain}", domain)
        .replace("{year}", &Utc::now().year().to_string())
}
