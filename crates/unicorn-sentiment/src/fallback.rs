pub const POSITIVE_WORDS: [&str; 10] = [
    "innovative",
    "growth",
    "profitable",
    "success",
    "strong",
    "efficient",
    "strategic",
    "favorable",
    "positive",
    "excellent",
];

pub const NEGATIVE_WORDS: [&str; 9] = [
    "risky",
    "failure",
    "loss",
    "weak",
    "inefficient",
    "declining",
    "unfavorable",
    "negative",
    "poor",
];

/// Keyword-count polarity used when a model backend is unavailable.
///
/// Each listed word counts once if it occurs anywhere in the lower-cased
/// text (substring match, so "unfavorable" also counts as "favorable").
pub fn keyword_polarity(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let positive = POSITIVE_WORDS
        .iter()
        .filter(|w| lowered.contains(*w))
        .count();
    let negative = NEGATIVE_WORDS
        .iter()
        .filter(|w| lowered.contains(*w))
        .count();
    let total = positive + negative;
    if total == 0 {
        return 0.5;
    }
    0.2 + 0.8 * (positive as f64 / total as f64)
}
