use unicorn_core::{Category, FactorSum, Scalar};

use super::{present, CategoryEvaluator, EvalContext};
use crate::profile::StartupProfile;

const USER_GROWTH_WEIGHT: f64 = 1.3;
const TREND_WEIGHT: f64 = 1.2;

pub struct TractionEvaluator;

impl CategoryEvaluator for TractionEvaluator {
    fn category(&self) -> Category {
        Category::Traction
    }

    fn evaluate(&self, profile: &StartupProfile, ctx: &EvalContext<'_>) -> u8 {
        let default = ctx.default_for(Category::Traction);
        let traction = profile.traction.as_ref();
        let validation = traction.and_then(|t| t.customer_validation.as_ref());

        let mut acc = FactorSum::new();
        acc.add_weighted(
            user_growth_score(ctx, traction.and_then(|t| t.user_growth.as_deref()), default),
            USER_GROWTH_WEIGHT,
        );
        acc.add(
            present(traction.and_then(|t| t.engagement.as_deref()))
                .map_or(default, |t| ctx.preferred_polarity(t) * 100.0),
        );
        acc.add(
            present(validation.and_then(|v| v.churn.as_deref()))
                .map_or(default, |t| churn_score(ctx.preferred_polarity(t))),
        );
        acc.add(
            present(validation.and_then(|v| v.nps.as_deref()))
                .map_or(default, |t| ctx.blended_polarity(t) * 100.0),
        );
        acc.add_weighted(
            trend_score(traction.and_then(|t| t.google_trend_score.as_ref())),
            TREND_WEIGHT,
        );

        if ctx.policy.traction.score_revenue {
            let revenue = traction.and_then(|t| t.revenue_growth.as_ref());
            acc.add(ctx.financial_or(revenue.and_then(|r| r.mrr.as_deref()), default));
            acc.add(ctx.financial_or(revenue.and_then(|r| r.arr.as_deref()), default));
        }
        acc.finish(default)
    }
}

fn user_growth_score(ctx: &EvalContext<'_>, text: Option<&str>, default: f64) -> f64 {
    let Some(text) = present(text) else {
        return default;
    };
    let s = ctx.sentiment.financial_polarity(Some(text)) * 100.0;
    if s > 70.0 {
        (s + 10.0).min(100.0)
    } else {
        s
    }
}

/// Churn descriptions are risk statements: positive wording lowers the score.
pub fn churn_score(polarity: f64) -> f64 {
    100.0 - polarity * 100.0
}

/// Search-interest index: 100 and above saturate, 0 or less (or unknown)
/// is neutral 50, values in between map onto `50 + x/2` with +10 above 50.
pub fn trend_score(value: Option<&Scalar>) -> f64 {
    let Some(x) = value.and_then(Scalar::parse_f64) else {
        return 50.0;
    };
    if x >= 100.0 {
        100.0
    } else if x > 0.0 {
        let s = 50.0 + x / 2.0;
        if x > 50.0 {
            (s + 10.0).min(100.0)
        } else {
            s
        }
    } else {
        50.0
    }
}
