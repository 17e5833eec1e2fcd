//! Supportive chat replies, keyed by tier.
//!
//! Selection takes the random source as a parameter so callers can seed it.

use rand::seq::SliceRandom;
use rand::Rng;

use mindcare_core::models::risk::RiskTier;

const LOW_RESPONSES: &[&str] = &[
    "Thanks for sharing. How has the rest of your day been?",
    "It sounds like things are going okay. Is there anything on your mind you'd like to talk through?",
    "I'm here whenever you want to chat. What would be helpful right now?",
];

const MODERATE_RESPONSES: &[&str] = &[
    "That sounds like a lot to carry. Would it help to talk about what's been weighing on you?",
    "It's completely understandable to feel this way. Small steps like a short walk or a chat with a friend can help.",
    "Thank you for telling me. Have you tried any of the breathing exercises in the resources section?",
];

const HIGH_RESPONSES: &[&str] = &[
    "I'm really sorry you're feeling this way. A counsellor will reach out to you soon, and you don't have to go through this alone.",
    "What you're describing sounds very hard. I've let our counselling team know so someone can support you.",
];

const CRISIS_RESPONSES: &[&str] = &[
    "I'm concerned about your safety. Please contact emergency services or a crisis line right now. A counsellor has been scheduled to follow up with you.",
    "You matter, and help is available right now. Please reach out to a crisis line or emergency services. We've booked a counsellor to contact you.",
];

const FALLBACK: &str = "I'm here to listen. Tell me more about how you're feeling.";

/// Every reply that may be shown for `tier`.
pub fn templates(tier: RiskTier) -> &'static [&'static str] {
    match tier {
        RiskTier::Low => LOW_RESPONSES,
        RiskTier::Moderate => MODERATE_RESPONSES,
        RiskTier::High => HIGH_RESPONSES,
        RiskTier::Crisis => CRISIS_RESPONSES,
    }
}

/// Pick one reply for `tier`.
pub fn pick_response<R: Rng + ?Sized>(tier: RiskTier, rng: &mut R) -> &'static str {
    templates(tier).choose(rng).copied().unwrap_or(FALLBACK)
}
