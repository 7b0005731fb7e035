use unicorn_core::{Category, FactorSum};
use unicorn_reference::ReferenceTables;

use super::{present, CategoryEvaluator, EvalContext};
use crate::profile::StartupProfile;

const US_FALLBACK: f64 = 70.0;

pub struct MiscellaneousEvaluator;

impl CategoryEvaluator for MiscellaneousEvaluator {
    fn category(&self) -> Category {
        Category::Miscellaneous
    }

    fn evaluate(&self, profile: &StartupProfile, ctx: &EvalContext<'_>) -> u8 {
        let default = ctx.default_for(Category::Miscellaneous);
        let misc = profile.miscellaneous.as_ref();

        let mut acc = FactorSum::new();
        acc.add(geography_score(
            misc.and_then(|m| m.geographic_focus.as_deref()),
            ctx.tables,
            default,
        ));
        acc.add(
            present(misc.and_then(|m| m.timing_fad_risk.as_deref())).map_or(default, |t| {
                timing_risk_score(ctx.sentiment.financial_polarity(Some(t)))
            }),
        );
        acc.finish(default)
    }
}

/// Stability proxy of the first country named in `focus`.
pub fn geography_score(focus: Option<&str>, tables: &ReferenceTables, default: f64) -> f64 {
    let Some(focus) = present(focus) else {
        return default;
    };
    if let Some(score) = tables
        .countries
        .find_in(focus)
        .and_then(|c| c.corruption_score)
    {
        return score.clamp(0.0, 100.0);
    }
    if focus.to_lowercase().contains("united states") {
        US_FALLBACK
    } else {
        default
    }
}

/// Inverted financial polarity, `100 - p*100`.
pub fn timing_risk_score(polarity: f64) -> f64 {
    100.0 - polarity * 100.0
}
