//! # Factor Weights
//! Materializes caller-supplied weight fractions into a full distribution and
//! renormalizes it to sum to one. Inputs are never rejected: negatives clamp
//! to zero, non-finite values count as missing, and a degenerate all-zero set
//! falls back to the default distribution.

use crate::model::{FactorBreakdown, WeightInputs};

/// Default factor distribution, used whenever a caller omits weights or
/// supplies an unusable set.
pub const DEFAULT_WEIGHTS: FactorWeights = FactorWeights {
    team_strength: 0.20,
    market_opportunity: 0.20,
    product_moat: 0.15,
    go_to_market: 0.15,
    financials: 0.30,
};

/// A weight set whose sum is within this distance of 1.0 is used as-is and
/// not reported as renormalized.
pub const WEIGHT_DRIFT_TOLERANCE: f64 = 0.05;

/// A fully-specified, non-negative weight vector over the five factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorWeights {
    pub team_strength: f64,
    pub market_opportunity: f64,
    pub product_moat: f64,
    pub go_to_market: f64,
    pub financials: f64,
}

impl FactorWeights {
    pub fn sum(&self) -> f64 {
        self.team_strength
            + self.market_opportunity
            + self.product_moat
            + self.go_to_market
            + self.financials
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            team_strength: f(self.team_strength),
            market_opportunity: f(self.market_opportunity),
            product_moat: f(self.product_moat),
            go_to_market: f(self.go_to_market),
            financials: f(self.financials),
        }
    }
}

/// Fill gaps from [`DEFAULT_WEIGHTS`] and clamp negatives to zero. Non-finite
/// inputs (JSON `1e999` overflows to infinity) are treated as missing.
pub fn materialize(inputs: &WeightInputs) -> FactorWeights {
    fn pick(value: Option<f64>, default: f64) -> f64 {
        match value {
            Some(v) if v.is_finite() => v.max(0.0),
            _ => default,
        }
    }

    FactorWeights {
        team_strength: pick(inputs.team_strength, DEFAULT_WEIGHTS.team_strength),
        market_opportunity: pick(
            inputs.market_opportunity,
            DEFAULT_WEIGHTS.market_opportunity,
        ),
        product_moat: pick(inputs.product_moat, DEFAULT_WEIGHTS.product_moat),
        go_to_market: pick(inputs.go_to_market, DEFAULT_WEIGHTS.go_to_market),
        financials: pick(inputs.financials, DEFAULT_WEIGHTS.financials),
    }
}

/// Scale the weights to sum to 1.0. The boolean reports whether the caller's
/// set had to be replaced or rescaled beyond [`WEIGHT_DRIFT_TOLERANCE`];
/// proportional multiples of a valid distribution scale silently.
pub fn normalize(weights: FactorWeights) -> (FactorWeights, bool) {
    let clamped = weights.map(|w| w.max(0.0));
    let total = clamped.sum();
    if total <= 0.0 {
        return (DEFAULT_WEIGHTS, true);
    }

    // With a finite total the shares sum to 1.0 within rounding; an
    // overflowed total zeroes every share and trips the drift check.
    let scaled = clamped.map(|w| w / total);
    let drift = (scaled.sum() - 1.0).abs();
    (scaled, drift > WEIGHT_DRIFT_TOLERANCE)
}

/// Weighted sum of the integer factor scores. With normalized weights this is
/// a convex combination, so the composite stays inside [0, 100].
pub fn aggregate(weights: &FactorWeights, breakdown: &FactorBreakdown) -> f64 {
    weights.team_strength * f64::from(breakdown.team_strength)
        + weights.market_opportunity * f64::from(breakdown.market_opportunity)
        + weights.product_moat * f64::from(breakdown.product_moat)
        + weights.go_to_market * f64::from(breakdown.go_to_market)
        + weights.financials * f64::from(breakdown.financials)
}
