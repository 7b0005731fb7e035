use crate::category::{CategoryScores, Metrics};
use crate::factors::to_score;
use crate::policy::{BoostCurve, CategoryWeights, ScoringPolicy};

pub fn weighted_sum(scores: &CategoryScores, weights: &CategoryWeights) -> f64 {
    scores
        .iter()
        .map(|(category, score)| f64::from(score) * weights.weight(category))
        .sum()
}

pub fn apply_boost(score: f64, curve: &BoostCurve) -> f64 {
    if score > curve.threshold {
        score + (score - curve.threshold) * curve.factor
    } else {
        score
    }
}

pub fn unicorn_score(scores: &CategoryScores, policy: &ScoringPolicy) -> u8 {
    let total = weighted_sum(scores, &policy.weights);
    to_score(apply_boost(total, &policy.curve))
}

pub fn aggregate(categories: CategoryScores, policy: &ScoringPolicy) -> Metrics {
    Metrics {
        unicorn_score: unicorn_score(&categories, policy),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    fn uniform(score: u8) -> CategoryScores {
        let mut scores = CategoryScores::default();
        for category in Category::ALL {
            scores.set(category, score);
        }
        scores
    }

    #[test]
    fn below_threshold_is_plain_weighted_sum() {
        let policy = ScoringPolicy::default();
        let scores = CategoryScores {
            team: 60,
            market: 60,
            product: 60,
            traction: 58,
            funding: 50,
            financial_efficiency: 50,
            miscellaneous: 50,
        };
        // 18 + 12 + 10.8 + 8.7 + 4 + 3.5 + 1
        assert!((weighted_sum(&scores, &policy.weights) - 58.0).abs() < 1e-9);
        assert_eq!(unicorn_score(&scores, &policy), 58);
    }

    #[test]
    fn strong_profiles_get_convexity_bonus() {
        let policy = ScoringPolicy::default();
        // 80 + (80 - 60) * 0.15 = 83
        assert_eq!(unicorn_score(&uniform(80), &policy), 83);
        // 100 + 40 * 0.15 = 106, clamped
        assert_eq!(unicorn_score(&uniform(100), &policy), 100);
        assert_eq!(unicorn_score(&uniform(60), &policy), 60);
    }

    #[test]
    fn boost_is_monotonic() {
        let curve = BoostCurve::default();
        let mut last = f64::MIN;
        for step in 0..=100 {
            let boosted = apply_boost(f64::from(step), &curve);
            assert!(boosted >= last);
            last = boosted;
        }
    }

    #[test]
    fn aggregate_keeps_categories() {
        let metrics = aggregate(uniform(76), &ScoringPolicy::default());
        assert_eq!(metrics.get(Category::Market), 76);
        // 76 + 16 * 0.15 = 78.4
        assert_eq!(metrics.unicorn_score, 78);
    }
}
