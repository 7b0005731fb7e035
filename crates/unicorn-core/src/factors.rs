/// Running sum of sub-scores and of the (possibly fractional) number of
/// factors that produced them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FactorSum {
    sum: f64,
    factors: f64,
}

impl FactorSum {
    pub const fn new() -> Self {
        Self {
            sum: 0.0,
            factors: 0.0,
        }
    }

    pub fn add(&mut self, score: f64) {
        self.add_weighted(score, 1.0);
    }

    /// Records `score` as `weight` factors.
    pub fn add_weighted(&mut self, score: f64, weight: f64) {
        if !score.is_finite() || !weight.is_finite() || weight <= 0.0 {
            return;
        }
        self.sum += score * weight;
        self.factors += weight;
    }

    pub const fn factors(&self) -> f64 {
        self.factors
    }

    pub fn mean(&self) -> Option<f64> {
        (self.factors > 0.0).then(|| self.sum / self.factors)
    }

    /// Rounded mean, or `default` when nothing was recorded.
    pub fn finish(&self, default: f64) -> u8 {
        to_score(self.mean().unwrap_or(default))
    }
}

/// Rounds half to even and clamps into `[0, 100]`.
pub fn to_score(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.clamp(0.0, 100.0).round_ties_even() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_mean_uses_fractional_factors() {
        let mut acc = FactorSum::new();
        acc.add(100.0);
        acc.add_weighted(60.0, 1.5);
        assert_eq!(acc.factors(), 2.5);
        assert_eq!(acc.finish(50.0), 76);
    }

    #[test]
    fn empty_sum_falls_back_to_default() {
        let acc = FactorSum::new();
        assert_eq!(acc.mean(), None);
        assert_eq!(acc.finish(60.0), 60);
    }

    #[test]
    fn ignores_non_finite_inputs() {
        let mut acc = FactorSum::new();
        acc.add(f64::NAN);
        acc.add_weighted(80.0, 0.0);
        assert_eq!(acc.factors(), 0.0);
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(to_score(62.5), 62);
        assert_eq!(to_score(63.5), 64);
        assert_eq!(to_score(65.625), 66);
        assert_eq!(to_score(140.0), 100);
        assert_eq!(to_score(-3.0), 0);
    }
}
