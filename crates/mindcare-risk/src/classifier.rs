//! Lexical risk classifier.
//!
//! Matching is lower-cased substring search, not whole-word: "sad" also
//! matches "crusade". Sets are tested in severity order, so the most severe
//! matching set wins regardless of where its keyword appears in the text.

use mindcare_core::models::risk::RiskTier;

const CRISIS_KEYWORDS: &[&str] = &[
    "kill myself",
    "suicide",
    "suicidal",
    "end my life",
    "want to die",
    "end it all",
    "better off dead",
    "no reason to live",
    "self harm",
    "self-harm",
    "hurt myself",
    "overdose",
];

const HIGH_KEYWORDS: &[&str] = &[
    "hopeless",
    "worthless",
    "can't go on",
    "cannot go on",
    "give up",
    "no way out",
    "panic attack",
    "can't cope",
    "cutting",
    "empty inside",
];

const MODERATE_KEYWORDS: &[&str] = &[
    "depressed",
    "anxious",
    "anxiety",
    "stress",
    "overwhelmed",
    "lonely",
    "sad",
    "worried",
    "can't sleep",
    "crying",
    "exhausted",
];

/// Keyword sets, most severe first.
const TIERS: [(RiskTier, &[&str]); 3] = [
    (RiskTier::Crisis, CRISIS_KEYWORDS),
    (RiskTier::High, HIGH_KEYWORDS),
    (RiskTier::Moderate, MODERATE_KEYWORDS),
];

/// Classify a message. Text matching no keyword, including empty text, is `low`.
pub fn classify(text: &str) -> RiskTier {
    let text = text.to_lowercase();
    TIERS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(tier, _)| *tier)
        .unwrap_or(RiskTier::Low)
}

/// The keywords that classify as `tier`. `low` has none.
pub fn keywords(tier: RiskTier) -> &'static [&'static str] {
    TIERS
        .iter()
        .find(|(t, _)| *t == tier)
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}
