//! # Revenue Simulation
//! Monte Carlo projection of monthly recurring revenue over the configured
//! horizon. Growth multipliers are lognormal, churn and measurement noise are
//! normal, and a burn-efficiency boost feeds a slice of the revenue-to-burn
//! ratio back into each month's growth.
//!
//! Runs are reproducible: a fixed seed always yields the same summary, which
//! is what makes identical requests return identical responses.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal, Normal};

use crate::model::{FinancialSignals, McsConfig, McsSummary};

/// Seed the service uses for reproducible assessments.
pub const DEFAULT_SEED: u64 = 12_345;

const DEFAULT_GROWTH_MEAN: f64 = 0.03;
const DEFAULT_GROWTH_SD: f64 = 0.02;
const DEFAULT_CHURN_MEAN: f64 = 0.02;
const DEFAULT_CHURN_SD: f64 = 0.01;

/// Fraction of the burn-efficiency ratio added to each month's growth factor.
const EFFICIENCY_BOOST_RATE: f64 = 0.0192;
/// Efficiency ratio assumed when no burn is reported.
const ZERO_BURN_EFFICIENCY: f64 = 1.5;
const EFFICIENCY_CAP: f64 = 2.5;
const CHURN_CAP: f64 = 0.6;
const NOISE_SD: f64 = 0.02;
const NOISE_MIN: f64 = 0.9;
const NOISE_MAX: f64 = 1.1;

/// Simulate terminal revenue across `config.iterations` trajectories and
/// summarize the distribution. Missing fields take the documented defaults;
/// a missing claim falls back to the base revenue, making the success
/// probability a plain "did we at least hold steady" measure.
pub fn simulate_revenue(
    financials: &FinancialSignals,
    config: &McsConfig,
    seed: u64,
) -> McsSummary {
    let base_revenue = financials.base_monthly_revenue.unwrap_or(0.0).max(0.0);
    let growth_mean = financials.growth_mean.unwrap_or(DEFAULT_GROWTH_MEAN);
    let growth_sd = financials.growth_sd.unwrap_or(DEFAULT_GROWTH_SD).max(0.0);
    let churn_mean = financials.churn_mean.unwrap_or(DEFAULT_CHURN_MEAN);
    let churn_sd = financials.churn_sd.unwrap_or(DEFAULT_CHURN_SD).max(0.0);
    let claimed = financials.claimed_month12_revenue.unwrap_or(base_revenue);
    let burn = financials.burn.unwrap_or(0.0).abs();

    // Mean-preserving location for the growth multiplier; the floor keeps
    // the log finite for growth at or below -100%.
    let location =
        (1.0 + growth_mean).max(f64::MIN_POSITIVE).ln() - 0.5 * growth_sd * growth_sd;
    let growth = LogNormal::new(location, growth_sd).expect("lognormal: sanitized parameters");
    let churn = Normal::new(churn_mean, churn_sd).expect("normal: sanitized parameters");
    let noise = Normal::new(1.0, NOISE_SD).expect("normal: constant parameters");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let iterations = config.iterations.max(1) as usize;
    let mut outcomes = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let mut revenue = base_revenue;
        for _ in 0..config.horizon_months {
            let growth_factor = growth.sample(&mut rng);
            let churn_rate = churn.sample(&mut rng).clamp(0.0, CHURN_CAP);
            let efficiency = if burn > 0.0 {
                (revenue / burn).clamp(0.0, EFFICIENCY_CAP)
            } else {
                ZERO_BURN_EFFICIENCY
            };
            revenue *= growth_factor + efficiency * EFFICIENCY_BOOST_RATE;
            revenue *= 1.0 - churn_rate;
            revenue *= noise.sample(&mut rng).clamp(NOISE_MIN, NOISE_MAX);
            revenue = revenue.max(0.0);
        }
        outcomes.push(revenue);
    }

    outcomes.sort_by(f64::total_cmp);
    let successes = outcomes.iter().filter(|&&r| r >= claimed).count();
    let mean = outcomes.iter().sum::<f64>() / outcomes.len() as f64;

    McsSummary {
        metric: config.target.clone(),
        iterations: iterations as u32,
        p10: percentile(&outcomes, 10.0),
        p50: percentile(&outcomes, 50.0),
        p90: percentile(&outcomes, 90.0),
        mean,
        success_prob_vs_claim: successes as f64 / outcomes.len() as f64,
    }
}

/// Linear-interpolation percentile over an ascending, non-empty sample.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = (sorted.len() - 1) as f64 * q / 100.0;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = rank - lower as f64;
    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}
