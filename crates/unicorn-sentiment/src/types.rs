use crate::error::SentimentError;

/// Class probabilities of a three-class financial sentiment model.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassProbabilities {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
}

impl ClassProbabilities {
    pub const fn new(negative: f64, neutral: f64, positive: f64) -> Self {
        Self {
            negative,
            neutral,
            positive,
        }
    }

    /// Builds probabilities from `(label, score)` pairs. Unknown labels are
    /// ignored; at least one of the three classes must be present.
    pub fn from_labels<'a>(
        pairs: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self, SentimentError> {
        let mut out = Self::default();
        let mut seen = false;
        for (label, score) in pairs {
            let slot = match label.trim().to_ascii_lowercase().as_str() {
                "negative" => &mut out.negative,
                "neutral" => &mut out.neutral,
                "positive" => &mut out.positive,
                _ => continue,
            };
            *slot = score;
            seen = true;
        }
        if seen {
            Ok(out)
        } else {
            Err(SentimentError::InvalidResponse(
                "no negative/neutral/positive labels in prediction".to_string(),
            ))
        }
    }

    /// `positive - negative + neutral / 2`, rescaled from `[-1, 1]` onto
    /// `[0, 1]` and clamped.
    pub fn polarity(&self) -> f64 {
        let raw = self.positive - self.negative + self.neutral / 2.0;
        let scaled = (raw + 1.0) / 2.0;
        if scaled.is_finite() {
            scaled.clamp(0.0, 1.0)
        } else {
            0.5
        }
    }
}
