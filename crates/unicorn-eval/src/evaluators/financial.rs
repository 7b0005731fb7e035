use unicorn_core::{Category, FactorSum};

use super::{present, CategoryEvaluator, EvalContext};
use crate::profile::StartupProfile;

const POLARITY_CAP: f64 = 90.0;
const DAMPING: f64 = 0.9;

pub struct FinancialEfficiencyEvaluator;

impl CategoryEvaluator for FinancialEfficiencyEvaluator {
    fn category(&self) -> Category {
        Category::FinancialEfficiency
    }

    fn evaluate(&self, profile: &StartupProfile, ctx: &EvalContext<'_>) -> u8 {
        let default = ctx.default_for(Category::FinancialEfficiency);
        let fe = profile.financial_efficiency.as_ref();
        let fields = [
            fe.and_then(|f| f.burn_rate.as_deref()),
            fe.and_then(|f| f.cac_vs_ltv.as_deref()),
            fe.and_then(|f| f.unit_economics.as_deref()),
        ];

        let mut acc = FactorSum::new();
        for field in fields {
            acc.add(present(field).map_or(default, |t| {
                efficiency_score(ctx.sentiment.financial_polarity(Some(t)))
            }));
        }
        acc.finish(default)
    }
}

/// Financial polarity x100, capped at 90 and damped by 0.9, so even glowing
/// wording tops out at 81.
pub fn efficiency_score(polarity: f64) -> f64 {
    (polarity * 100.0).min(POLARITY_CAP) * DAMPING
}
