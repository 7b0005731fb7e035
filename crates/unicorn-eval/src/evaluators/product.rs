use unicorn_core::{Category, FactorSum};
use unicorn_reference::ReferenceTables;

use super::{present, CategoryEvaluator, EvalContext};
use crate::profile::StartupProfile;

const STAGE_WEIGHT: f64 = 1.2;

pub struct ProductEvaluator;

impl CategoryEvaluator for ProductEvaluator {
    fn category(&self) -> Category {
        Category::Product
    }

    fn evaluate(&self, profile: &StartupProfile, ctx: &EvalContext<'_>) -> u8 {
        let default = ctx.default_for(Category::Product);
        let product = profile.product.as_ref();

        let mut acc = FactorSum::new();
        acc.add_weighted(
            stage_score(product.and_then(|p| p.stage.as_deref()), ctx.tables, default),
            STAGE_WEIGHT,
        );
        acc.add(ctx.financial_or(product.and_then(|p| p.usp.as_deref()), default));
        acc.add(ctx.financial_or(
            product.and_then(|p| p.customer_acquisition.as_deref()),
            default,
        ));
        acc.finish(default)
    }
}

/// Rubric score of the first product stage named in `stage`, +5 above 70.
pub fn stage_score(stage: Option<&str>, tables: &ReferenceTables, default: f64) -> f64 {
    let Some(score) = present(stage)
        .and_then(|s| tables.product_stages.find_in(s))
        .and_then(|row| row.score)
    else {
        return default;
    };
    if score > 70.0 {
        (score + 5.0).min(100.0)
    } else {
        score.clamp(0.0, 100.0)
    }
}
