//! Audience, intent, and value-proposition inference.
//!
//! Classifies page text with keyword rule tables. Matching is
//! case-insensitive substring containment, first match wins, and every
//! dimension has a default label so inference always produces a result.

/// A classification rule: the label applies when any trigger is contained in
/// the text.
struct Rule {
    triggers: &'static [&'static str],
    label: &'static str,
}

/// An audience tier: a top-level trigger set with in-tier refinements.
///
/// Tiers are tested in order and refinement only applies within the tier
/// that matched.
struct AudienceTier {
    triggers: &'static [&'static str],
    base: &'static str,
    refinements: &'static [Rule],
}

const AUDIENCE_TIERS: &[AudienceTier] = &[
    AudienceTier {
        triggers: &[
            "business",
            "company",
            "enterprise",
            "organization",
            "professional",
            "agency",
        ],
        base: "business professionals or organizations",
        refinements: &[
            Rule {
                triggers: &["marketing", "seo", "advertising"],
                label: "marketing professionals or businesses seeking growth",
            },
            Rule {
                triggers: &["software", "developer", "coding"],
                label: "software developers or technical professionals",
            },
            Rule {
                triggers: &["finance", "investment", "accounting"],
                label: "financial professionals or businesses",
            },
        ],
    },
    AudienceTier {
        triggers: &["personal", "individual", "home", "family", "lifestyle"],
        base: "individual consumers or homeowners",
        refinements: &[
            Rule {
                triggers: &["health", "fitness", "wellness"],
                label: "health-conscious individuals seeking wellness solutions",
            },
            Rule {
                triggers: &["recipe", "cooking", "food"],
                label: "home cooks or food enthusiasts",
            },
            Rule {
                triggers: &["travel", "vacation", "destination"],
                label: "travelers or vacation planners",
            },
        ],
    },
];

const DEFAULT_AUDIENCE: &str = "professionals or businesses seeking expertise";

const INTENT_RULES: &[Rule] = &[
    Rule {
        triggers: &["how to", "guide", "tutorial", "learn"],
        label: "learning how to accomplish a specific task or goal",
    },
    Rule {
        triggers: &["buy", "price", "cost", "purchase"],
        label: "making a purchase decision",
    },
    Rule {
        triggers: &["compare", "vs", "versus", "best"],
        label: "comparing options to make an informed choice",
    },
    Rule {
        triggers: &["solve", "fix", "problem", "issue"],
        label: "solving a specific problem or challenge",
    },
];

const DEFAULT_INTENT: &str = "finding actionable information or solutions";

const VALUE_RULES: &[Rule] = &[
    Rule {
        triggers: &["save time", "quick", "fast", "efficient"],
        label: "time-saving solutions or efficiency improvements",
    },
    Rule {
        triggers: &["save money", "affordable", "budget"],
        label: "cost-effective solutions or money-saving strategies",
    },
    Rule {
        triggers: &["expert", "professional", "experienced"],
        label: "expert insights backed by professional experience",
    },
    Rule {
        triggers: &["step by step", "actionable", "practical"],
        label: "practical, actionable guidance with clear steps",
    },
];

const DEFAULT_VALUE: &str = "expert insights and practical solutions";

/// Inferred characteristics of a page, consumed by prompt construction.
#[derive(Debug, Clone, PartialEq)]
pub struct InferredSignals {
    /// Who the page appears to address.
    pub audience: String,
    /// What a visitor is most likely trying to do.
    pub intent: String,
    /// What the page promises its audience.
    pub value_proposition: String,
}

/// Infers audience, intent, and value proposition from page text.
///
/// A pure function of the lowercased input; empty text yields the default
/// label on every dimension.
pub fn infer(text: &str) -> InferredSignals {
    let text = text.to_lowercase();

    InferredSignals {
        audience: infer_audience(&text),
        intent: apply_rules(&text, INTENT_RULES, DEFAULT_INTENT),
        value_proposition: apply_rules(&text, VALUE_RULES, DEFAULT_VALUE),
    }
}

fn contains_any(text: &str, triggers: &[&str]) -> bool {
    triggers.iter().any(|trigger| text.contains(trigger))
}

fn apply_rules(text: &str, rules: &[Rule], default: &str) -> String {
    rules
        .iter()
        .find(|rule| contains_any(text, rule.triggers))
        .map(|rule| rule.label)
        .unwrap_or(default)
        .to_string()
}

fn infer_audience(text: &str) -> String {
    for tier in AUDIENCE_TIERS {
        if contains_any(text, tier.triggers) {
            return apply_rules(text, tier.refinements, tier.base);
        }
    }
    DEFAULT_AUDIENCE.to_string()
}
