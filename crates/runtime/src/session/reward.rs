//! Reward card prompt composition and user-facing failure messages.

use quest_core::Outcome;

pub const SUCCESS_MOOD: &str = "Warm, golden lighting, harmonious composition";
pub const FAIL_MOOD: &str = "Slightly ominous, warning symbols, darker tones";
pub const STYLE_SUFFIX: &str = "Art Nouveau style, Alphonse Mucha inspired.";

pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to analyze image. Please try a clear photo of a child and animal.";
pub const REWARD_FAILED_MESSAGE: &str = "Could not generate reward card.";

/// Full prompt sent to the art generator for a resolved option.
pub fn compose_art_prompt(prompt: &str, outcome: Outcome) -> String {
    let mood = match outcome {
        Outcome::Success => SUCCESS_MOOD,
        Outcome::Fail => FAIL_MOOD,
    };
    format!("{prompt}. {mood}. {STYLE_SUFFIX}")
}
