use std::collections::HashMap;
use std::path::Path;

use crate::error::SentimentError;
use crate::traits::PolarityAnalyzer;

const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
const ALPHA: f64 = 15.0;

const BOOSTERS_UP: &[&str] = &[
    "absolutely",
    "amazingly",
    "awfully",
    "completely",
    "considerable",
    "considerably",
    "decidedly",
    "deeply",
    "enormous",
    "enormously",
    "entirely",
    "especially",
    "exceptional",
    "exceptionally",
    "extreme",
    "extremely",
    "fabulously",
    "fully",
    "greatly",
    "hella",
    "highly",
    "hugely",
    "incredible",
    "incredibly",
    "intensely",
    "major",
    "majorly",
    "more",
    "most",
    "particularly",
    "purely",
    "quite",
    "really",
    "remarkably",
    "so",
    "substantially",
    "thoroughly",
    "total",
    "totally",
    "tremendous",
    "tremendously",
    "uber",
    "unbelievably",
    "unusually",
    "utter",
    "utterly",
    "very",
];

const BOOSTERS_DOWN: &[&str] = &[
    "almost",
    "barely",
    "hardly",
    "kinda",
    "kindof",
    "kind-of",
    "less",
    "little",
    "marginal",
    "marginally",
    "occasional",
    "occasionally",
    "partly",
    "scarce",
    "scarcely",
    "slight",
    "slightly",
    "somewhat",
    "sorta",
    "sortof",
    "sort-of",
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "neednt", "never", "none", "nope",
    "nor", "not", "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "uh-uh", "wasnt",
    "werent", "without", "wont", "wouldnt", "rarely", "seldom", "despite",
];

/// Rule-based polarity analyzer over a VADER-format lexicon
/// (`token<TAB>mean[<TAB>...]` per line).
#[derive(Debug, Clone, Default)]
pub struct LexiconAnalyzer {
    lexicon: HashMap<String, f64>,
}

impl LexiconAnalyzer {
    pub fn from_path(path: &Path) -> Result<Self, SentimentError> {
        let raw = std::fs::read_to_string(path)?;
        let analyzer = Self::parse(&raw)?;
        tracing::info!(path = %path.display(), entries = analyzer.len(), "lexicon loaded");
        Ok(analyzer)
    }

    /// Parses lexicon text. Lines without a numeric second column are
    /// skipped; an input with no usable line is an error.
    pub fn parse(raw: &str) -> Result<Self, SentimentError> {
        let mut lexicon = HashMap::new();
        for line in raw.lines() {
            let mut cols = line.split('\t');
            let (Some(token), Some(mean)) = (cols.next(), cols.next()) else {
                continue;
            };
            let token = token.trim();
            let Ok(mean) = mean.trim().parse::<f64>() else {
                continue;
            };
            if token.is_empty() || !mean.is_finite() {
                continue;
            }
            lexicon.insert(token.to_lowercase(), mean);
        }
        if lexicon.is_empty() {
            return Err(SentimentError::Lexicon(
                "lexicon contains no valid entries".to_string(),
            ));
        }
        Ok(Self { lexicon })
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let lexicon = entries
            .into_iter()
            .map(|(k, v)| (k.into().to_lowercase(), v))
            .collect();
        Self { lexicon }
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    fn known(&self, word: Option<&str>) -> bool {
        word.is_some_and(|w| self.lexicon.contains_key(w))
    }

    fn valence(&self, tokens: &Tokens, i: usize) -> f64 {
        let Some(word) = tokens.lower(i) else {
            return 0.0;
        };
        let Some(&base) = self.lexicon.get(word) else {
            return 0.0;
        };
        let mut valence = base;

        // "no" directly before another sentiment word acts as a negator only
        if word == "no" && self.known(tokens.lower(i + 1)) {
            valence = 0.0;
        }
        let after_no = tokens.lower_back(i, 1) == Some("no")
            || tokens.lower_back(i, 2) == Some("no")
            || (tokens.lower_back(i, 3) == Some("no")
                && matches!(tokens.lower_back(i, 1), Some("or" | "nor")));
        if after_no {
            valence = base * N_SCALAR;
        }

        if tokens.cap_diff && tokens.raw(i).is_some_and(is_upper) {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        for distance in 1..=3 {
            let prev = tokens.lower_back(i, distance);
            if prev.is_none() || self.known(prev) {
                continue;
            }
            let mut s = scalar_inc_dec(tokens, i - distance, valence);
            if distance == 2 {
                s *= 0.95;
            } else if distance == 3 {
                s *= 0.9;
            }
            valence += s;
            valence = negation_check(valence, tokens, distance, i);
        }

        self.least_check(valence, tokens, i)
    }

    fn least_check(&self, valence: f64, tokens: &Tokens, i: usize) -> f64 {
        let prev = tokens.lower_back(i, 1);
        if prev != Some("least") || self.known(prev) {
            return valence;
        }
        match tokens.lower_back(i, 2) {
            Some("at" | "very") => valence,
            _ => valence * N_SCALAR,
        }
    }
}

impl PolarityAnalyzer for LexiconAnalyzer {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn compound(&self, text: &str) -> f64 {
        let tokens = Tokens::new(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let mut sentiments = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            let word = tokens.lower(i).unwrap_or_default();
            let kind_of = word == "kind" && tokens.lower(i + 1) == Some("of");
            if is_booster(word) || kind_of {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.valence(&tokens, i));
        }

        but_check(&tokens, &mut sentiments);

        let mut total: f64 = sentiments.iter().sum();
        let emphasis = punctuation_emphasis(text);
        if total > 0.0 {
            total += emphasis;
        } else if total < 0.0 {
            total -= emphasis;
        }
        normalize(total)
    }
}

struct Tokens {
    raw: Vec<String>,
    lower: Vec<String>,
    cap_diff: bool,
}

impl Tokens {
    fn new(text: &str) -> Self {
        let raw: Vec<String> = text.split_whitespace().map(strip_punctuation).collect();
        let lower = raw.iter().map(|w| w.to_lowercase()).collect();
        let upper = raw.iter().filter(|w| is_upper(w)).count();
        let cap_diff = upper > 0 && upper < raw.len();
        Self {
            raw,
            lower,
            cap_diff,
        }
    }

    fn len(&self) -> usize {
        self.raw.len()
    }

    fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    fn raw(&self, i: usize) -> Option<&str> {
        self.raw.get(i).map(String::as_str)
    }

    fn lower(&self, i: usize) -> Option<&str> {
        self.lower.get(i).map(String::as_str)
    }

    fn lower_back(&self, i: usize, distance: usize) -> Option<&str> {
        i.checked_sub(distance).and_then(|j| self.lower(j))
    }
}

/// Strips surrounding punctuation unless that would leave two characters
/// or fewer (keeps emoticons such as `:)` intact).
fn strip_punctuation(token: &str) -> String {
    let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
    if stripped.chars().count() <= 2 {
        token.to_string()
    } else {
        stripped.to_string()
    }
}

fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

fn is_booster(word: &str) -> bool {
    BOOSTERS_UP.contains(&word) || BOOSTERS_DOWN.contains(&word)
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

fn scalar_inc_dec(tokens: &Tokens, j: usize, valence: f64) -> f64 {
    let word = tokens.lower(j).unwrap_or_default();
    let mut scalar = if BOOSTERS_UP.contains(&word) {
        B_INCR
    } else if BOOSTERS_DOWN.contains(&word) {
        B_DECR
    } else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if tokens.cap_diff && tokens.raw(j).is_some_and(is_upper) {
        scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
    }
    scalar
}

fn negation_check(valence: f64, tokens: &Tokens, distance: usize, i: usize) -> f64 {
    let back = |d| tokens.lower_back(i, d);
    let so_or_this = |w: Option<&str>| matches!(w, Some("so" | "this"));
    match distance {
        1 => {
            if back(1).is_some_and(is_negation) {
                return valence * N_SCALAR;
            }
        }
        2 => {
            if back(2) == Some("never") && so_or_this(back(1)) {
                return valence * 1.25;
            }
            if back(2) == Some("without") && back(1) == Some("doubt") {
                return valence;
            }
            if back(2).is_some_and(is_negation) {
                return valence * N_SCALAR;
            }
        }
        3 => {
            if back(3) == Some("never") && (so_or_this(back(2)) || so_or_this(back(1))) {
                return valence * 1.25;
            }
            if back(3) == Some("without") && (back(2) == Some("doubt") || back(1) == Some("doubt"))
            {
                return valence;
            }
            if back(3).is_some_and(is_negation) {
                return valence * N_SCALAR;
            }
        }
        _ => {}
    }
    valence
}

/// Words before the first "but" are halved, words after it weigh 1.5x.
fn but_check(tokens: &Tokens, sentiments: &mut [f64]) {
    let Some(pivot) = tokens.lower.iter().position(|w| w == "but") else {
        return;
    };
    for (idx, s) in sentiments.iter_mut().enumerate() {
        if idx < pivot {
            *s *= 0.5;
        } else if idx > pivot {
            *s *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4);
    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2..=3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations as f64 * 0.292 + question_amp
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}
