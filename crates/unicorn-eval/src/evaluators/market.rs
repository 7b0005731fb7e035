use unicorn_core::{magnitude, scale, Category, FactorSum, MagnitudeUnit, Scalar};

use super::{CategoryEvaluator, EvalContext};
use crate::profile::StartupProfile;

const GROWTH_WEIGHT: f64 = 1.5;

pub struct MarketEvaluator;

impl CategoryEvaluator for MarketEvaluator {
    fn category(&self) -> Category {
        Category::Market
    }

    fn evaluate(&self, profile: &StartupProfile, ctx: &EvalContext<'_>) -> u8 {
        let default = ctx.default_for(Category::Market);
        let market = profile.market.as_ref();

        let mut acc = FactorSum::new();
        acc.add(tam_score(market.and_then(|m| m.tam.as_ref()), default));
        acc.add_weighted(
            growth_score(market.and_then(|m| m.growth_rate.as_ref()), default),
            GROWTH_WEIGHT,
        );
        if ctx.policy.market.score_sub_markets {
            acc.add(sam_score(market.and_then(|m| m.sam.as_ref()), default));
            acc.add(som_score(market.and_then(|m| m.som.as_ref()), default));
        }
        acc.finish(default)
    }
}

/// Total addressable market on a 0-100 (billions-leaning) scale.
pub fn tam_score(value: Option<&Scalar>, default: f64) -> f64 {
    let Some(m) = value.and_then(magnitude) else {
        return default;
    };
    let base = scale(m.value, 0.0, 100.0);
    match m.unit {
        MagnitudeUnit::Billion => (base * 1.8).min(100.0),
        MagnitudeUnit::Million => base * 0.9,
        MagnitudeUnit::Plain => base,
    }
}

/// Annual growth rate in percent; rates above 10% get a 1.5x boost.
pub fn growth_score(value: Option<&Scalar>, default: f64) -> f64 {
    let Some(rate) = value.and_then(Scalar::parse_f64) else {
        return default;
    };
    let base = scale(rate, 0.0, 20.0);
    if rate > 10.0 {
        (base * 1.5).min(100.0)
    } else {
        base
    }
}

pub fn sam_score(value: Option<&Scalar>, default: f64) -> f64 {
    let Some(m) = value.and_then(magnitude) else {
        return default;
    };
    let base = scale(m.value, 0.0, 50.0);
    match m.unit {
        MagnitudeUnit::Billion => (base * 1.5).min(100.0),
        MagnitudeUnit::Million => base * 0.9,
        MagnitudeUnit::Plain => base,
    }
}

pub fn som_score(value: Option<&Scalar>, default: f64) -> f64 {
    let Some(m) = value.and_then(magnitude) else {
        return default;
    };
    let base = scale(m.value, 0.0, 20.0);
    match m.unit {
        MagnitudeUnit::Billion => 100.0,
        MagnitudeUnit::Million => (base * 1.2).min(100.0),
        MagnitudeUnit::Plain => base,
    }
}
