use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A scalar profile leaf that may arrive as a JSON number or as free text
/// such as `"$27 billion"` or `"500+ connections"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Numeric reading used by [`normalize`]: numbers as-is, text by its
    /// first embedded number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Text(s) => first_number(s),
        }
    }

    /// Strict float parse: the whole text must be a number, optionally
    /// followed by a percent sign.
    pub fn parse_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Text(s) => {
                let trimmed = s.trim();
                let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
                trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
            }
        }
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

fn number_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"[+-]?\d*\.?\d+").ok())
        .as_ref()
}

/// First decimal or integer substring of `text`.
pub fn first_number(text: &str) -> Option<f64> {
    number_pattern()?
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Linear scaling of `value` from `[min, max]` onto `[0, 100]`, clamped.
pub fn scale(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span.abs() < f64::EPSILON {
        return if value >= max { 100.0 } else { 0.0 };
    }
    (((value - min) / span) * 100.0).clamp(0.0, 100.0)
}

/// Scores a scalar on `[0, 100]`, or returns `default` when the value is
/// missing or carries no number.
pub fn normalize(value: Option<&Scalar>, min: f64, max: f64, default: f64) -> f64 {
    match value.and_then(Scalar::as_number) {
        Some(v) => scale(v, min, max),
        None => default,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeUnit {
    Billion,
    Million,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Magnitude {
    pub value: f64,
    pub unit: MagnitudeUnit,
}

/// Reads a money-like magnitude such as `"$2.5 billion globally"`.
pub fn magnitude(value: &Scalar) -> Option<Magnitude> {
    let number = value.as_number()?;
    let unit = match value {
        Scalar::Number(_) => MagnitudeUnit::Plain,
        Scalar::Text(s) => {
            let lowered = s.to_lowercase();
            if lowered.contains("billion") {
                MagnitudeUnit::Billion
            } else if lowered.contains("million") {
                MagnitudeUnit::Million
            } else {
                MagnitudeUnit::Plain
            }
        }
    };
    Some(Magnitude {
        value: number,
        unit,
    })
}
