use unicorn_core::{magnitude, scale, Category, FactorSum, MagnitudeUnit, Scalar};
use unicorn_reference::ReferenceTables;

use super::{present, CategoryEvaluator, EvalContext};
use crate::profile::{Investor, StartupProfile};

pub struct FundingEvaluator;

impl CategoryEvaluator for FundingEvaluator {
    fn category(&self) -> Category {
        Category::Funding
    }

    fn evaluate(&self, profile: &StartupProfile, ctx: &EvalContext<'_>) -> u8 {
        let default = ctx.default_for(Category::Funding);
        let funding = profile.funding.as_ref();

        let mut acc = FactorSum::new();
        acc.add(stage_score(
            funding.and_then(|f| f.stage.as_deref()),
            ctx.tables,
            default,
        ));
        acc.add(amount_score(funding.and_then(|f| f.amount.as_ref()), default));
        acc.add(
            present(funding.and_then(|f| f.cap_table_strength.as_deref()))
                .map_or(default, |t| ctx.blended_polarity(t) * 100.0),
        );
        acc.add(investor_score(
            funding
                .map(|f| f.investors_on_board.as_slice())
                .unwrap_or_default(),
            ctx.tables,
        ));
        acc.finish(default)
    }
}

/// Rubric score of the first funding stage named in `stage`, falling back
/// to `stage_level * 20` for rows without a score.
pub fn stage_score(stage: Option<&str>, tables: &ReferenceTables, default: f64) -> f64 {
    present(stage)
        .and_then(|s| tables.funding_stages.find_in(s))
        .and_then(|row| row.score.or(row.stage_level.map(|level| level * 20.0)))
        .map_or(default, |s| s.clamp(0.0, 100.0))
}

pub fn amount_score(amount: Option<&Scalar>, default: f64) -> f64 {
    let Some(m) = amount.and_then(magnitude) else {
        return default;
    };
    match m.unit {
        MagnitudeUnit::Billion => 100.0,
        MagnitudeUnit::Million => (scale(m.value, 0.0, 50.0) * 1.5).min(100.0),
        MagnitudeUnit::Plain => scale(m.value, 0.0, 50.0),
    }
}

/// Board quality. Fortune 500 backers dominate, then ranked investors, then
/// the plain head count.
pub fn investor_score(investors: &[Investor], tables: &ReferenceTables) -> f64 {
    if investors.is_empty() {
        return 50.0;
    }
    let names = || investors.iter().filter_map(|i| present(i.name.as_deref()));

    let fortune = names()
        .filter(|n| tables.fortune500.mentioned_in(n))
        .count();
    if fortune > 0 {
        return 90.0 + fortune.min(10) as f64;
    }

    let ranks: Vec<f64> = names()
        .filter_map(|n| tables.investors.find_in(n))
        .filter_map(|row| row.investor_rank)
        .collect();
    if !ranks.is_empty() {
        let ranking_sum: f64 = ranks.iter().map(|r| 100.0 - r.min(99.0)).sum();
        return (50.0 + ranking_sum / 10.0).min(100.0);
    }

    if investors.len() > 2 {
        70.0
    } else {
        60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluators::testing::scorer;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use unicorn_core::ScoringPolicy;
    use unicorn_reference::{Fortune500Company, FundingStage, RankedInvestor, Table};

    fn tables() -> ReferenceTables {
        let mut tables = ReferenceTables::empty();
        tables.fortune500 = Table::new(
            "fortune500",
            vec![
                Fortune500Company {
                    name: "Microsoft".to_string(),
                },
                Fortune500Company {
                    name: "Salesforce".to_string(),
                },
            ],
        );
        tables.investors = Table::new(
            "investors",
            vec![
                RankedInvestor {
                    investor_name: "Sequoia Capital".to_string(),
                    investor_rank: Some(1.0),
                },
                RankedInvestor {
                    investor_name: "Y Combinator".to_string(),
                    investor_rank: Some(20.0),
                },
                RankedInvestor {
                    investor_name: "Unranked Partners".to_string(),
                    investor_rank: None,
                },
            ],
        );
        tables.funding_stages = Table::new(
            "funding",
            vec![
                FundingStage {
                    stage: "Pre-Seed".to_string(),
                    stage_level: Some(1.0),
                    score: Some(40.0),
                },
                FundingStage {
                    stage: "Seed".to_string(),
                    stage_level: Some(2.0),
                    score: Some(55.0),
                },
                FundingStage {
                    stage: "Bridge".to_string(),
                    stage_level: Some(2.0),
                    score: None,
                },
            ],
        );
        tables
    }

    fn investors(names: &[&str]) -> Vec<Investor> {
        names
            .iter()
            .map(|n| Investor {
                name: Some((*n).to_string()),
                kind: None,
            })
            .collect()
    }

    #[test]
    fn amount_rules() {
        assert_eq!(amount_score(Some(&Scalar::from("$10 million")), 50.0), 30.0);
        assert_eq!(amount_score(Some(&Scalar::from("$40 million")), 50.0), 100.0);
        assert_eq!(amount_score(Some(&Scalar::from("$1.2 billion")), 50.0), 100.0);
        assert_eq!(amount_score(Some(&Scalar::Number(25.0)), 50.0), 50.0);
        assert_eq!(amount_score(Some(&Scalar::from("undisclosed")), 50.0), 50.0);
        assert_eq!(amount_score(None, 50.0), 50.0);
    }

    #[test]
    fn stage_prefers_score_then_level() {
        let t = tables();
        assert_eq!(stage_score(Some("Pre-Seed round"), &t, 50.0), 40.0);
        assert_eq!(stage_score(Some("Seed"), &t, 50.0), 55.0);
        assert_eq!(stage_score(Some("Bridge note"), &t, 50.0), 40.0);
        assert_eq!(stage_score(Some("Series Z"), &t, 50.0), 50.0);
    }

    #[test]
    fn investor_tiers() {
        let t = tables();
        assert_eq!(investor_score(&[], &t), 50.0);
        assert_eq!(investor_score(&investors(&["Angel A"]), &t), 60.0);
        assert_eq!(investor_score(&investors(&["A", "B", "C"]), &t), 70.0);
        assert_eq!(investor_score(&investors(&["Unranked Partners"]), &t), 60.0);
        // (100 - 1) + (100 - 20) = 179 -> 50 + 17.9
        let ranked = investor_score(&investors(&["Sequoia Capital", "Y Combinator"]), &t);
        assert!((ranked - 67.9).abs() < 1e-9);
        assert_eq!(
            investor_score(&investors(&["Microsoft Ventures", "Sequoia Capital"]), &t),
            91.0
        );
    }

    #[test]
    fn fortune_backer_never_lowers_score() {
        let t = tables();
        let base = investors(&["Sequoia Capital", "Y Combinator", "Angel"]);
        let mut with_fortune = base.clone();
        with_fortune.extend(investors(&["Salesforce Ventures"]));
        assert!(investor_score(&with_fortune, &t) >= investor_score(&base, &t));
    }

    #[test]
    fn category_blends_all_fields() {
        let t = tables();
        let sentiment = scorer(0.75, None);
        let policy = ScoringPolicy::default();
        let profile = StartupProfile::from_value(&json!({"funding": {
            "stage": "Seed",
            "amount": "$10 million",
            "cap_table_strength": "Founders hold 70%",
            "investors_on_board": ["Sequoia Capital"]
        }}))
        .expect("profile");
        // 55 + 30 + 75 + (50 + 9.9) = 219.9 / 4 = 54.975
        let score = FundingEvaluator.evaluate(&profile, &EvalContext::new(&t, &sentiment, &policy));
        assert_eq!(score, 55);
    }
}
