//! # Factor Scoring
//! Heuristic 0-100 scores for the five due-diligence factors. Every scorer
//! accepts an optional signal group: a missing group logs a warning and gets
//! a conservative fallback score instead of failing the assessment, so the
//! composite can always be produced from partial data.
//!
//! The membership curves for the financial terms live in
//! [`crate::membership`]; this module owns the per-factor mixing of their
//! outputs and the rationale strings surfaced in the narrative.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::membership::{clamp_score, trapezoidal, triangular};
use crate::model::{
    FactorRationale, FinancialSignals, GtmSignals, MarketSignals, ProductSignals, TeamSignals,
};

/// Conservative scores applied when an entire signal group is absent.
pub const FALLBACK_TEAM_SCORE: i32 = 45;
pub const FALLBACK_MARKET_SCORE: i32 = 50;
pub const FALLBACK_PRODUCT_SCORE: i32 = 48;
pub const FALLBACK_GTM_SCORE: i32 = 46;
pub const FALLBACK_FINANCIALS_SCORE: i32 = 40;

/// Defaults substituted for individual missing fields.
pub const DEFAULT_TAM: f64 = 5e8;
pub const DEFAULT_SAM_SHARE: f64 = 0.2;
pub const DEFAULT_GROWTH_RATE: f64 = 0.05;
pub const DEFAULT_TEAM_SIZE: f64 = 5.0;
pub const DEFAULT_SENIOR_RATIO: f64 = 0.3;
pub const DEFAULT_SALES_CYCLE_DAYS: f64 = 90.0;
pub const DEFAULT_CAC_PAYBACK_MONTHS: f64 = 18.0;
pub const DEFAULT_GROSS_MARGIN: f64 = 0.55;

/// Revenue-to-burn ratio assumed when reported burn is zero.
pub const ZERO_BURN_EFFICIENCY_RATIO: f64 = 1.2;

/// Steepness of the logistic squash applied to the simulated success
/// probability in [`blend_financials`].
pub const LOGISTIC_STEEPNESS: f64 = 8.0;

/// Score penalty per reported competition level; unrecognized labels take
/// [`UNKNOWN_COMPETITION_PENALTY`].
static COMPETITION_PENALTIES: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("low", 0.0),
        ("moderate", 3.0),
        ("medium", 5.0),
        ("high", 15.0),
        ("crowded", 20.0),
    ])
});

const UNKNOWN_COMPETITION_PENALTY: f64 = 10.0;

/// Moat bonus per reported switching-cost level; unrecognized labels take
/// [`DEFAULT_SWITCHING_BONUS`].
static SWITCHING_BONUSES: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| HashMap::from([("high", 18.0), ("medium", 12.0), ("low", 6.0)]));

const DEFAULT_SWITCHING_BONUS: f64 = 6.0;

/// Defensibility vocabulary scanned against the keyword phrases.
const STRATEGIC_TERMS: [&str; 7] = [
    "network",
    "data",
    "proprietary",
    "regulation",
    "compliance",
    "ai",
    "automation",
];

pub fn score_team(team: Option<&TeamSignals>) -> (i32, FactorRationale) {
    let team = match team {
        Some(team) => team,
        None => {
            warn!("team signals missing; applying conservative defaults");
            return (
                FALLBACK_TEAM_SCORE,
                FactorRationale::new(
                    "Limited team data available",
                    "Provide founder history and team makeup to refine confidence",
                ),
            );
        }
    };

    let founder_count = team.founders.len().max(1) as f64;
    let total_experience: f64 = team.founders.iter().map(|f| f.years_experience).sum();
    let avg_experience = total_experience / founder_count;
    let domain_alignment =
        team.founders.iter().filter(|f| f.domain_match).count() as f64 / founder_count;
    let prior_exit_ratio =
        team.founders.iter().filter(|f| f.prior_exit).count() as f64 / founder_count;

    let team_size = team.team_size.map_or(DEFAULT_TEAM_SIZE, f64::from);
    let senior_ratio = team.senior_ratio.unwrap_or(DEFAULT_SENIOR_RATIO);

    let experience_score = clamp_score((avg_experience / 12.0).min(1.2) * 22.0);
    let domain_score = clamp_score(domain_alignment * 18.0);
    let exit_score = clamp_score((prior_exit_ratio * 24.0).min(12.0));
    let size_score = clamp_score((team_size / 30.0).min(1.0) * 18.0);
    let senior_score = clamp_score((senior_ratio / 0.6).min(1.2) * 18.0);

    let blended =
        experience_score + domain_score + exit_score + size_score + senior_score + 12.0;

    let signal = format!(
        "Avg {avg_experience:.1} yrs experience with {:.0}% domain fit",
        domain_alignment * 100.0
    );
    let caveat = if senior_ratio < 0.4 {
        "Increase senior leadership depth"
    } else {
        "Continue scaling hiring pace"
    };
    (
        clamp_score(blended).round_ties_even() as i32,
        FactorRationale::new(signal, caveat),
    )
}

pub fn score_market(market: Option<&MarketSignals>) -> (i32, FactorRationale) {
    let market = match market {
        Some(market) => market,
        None => {
            warn!("market signals missing; applying conservative defaults");
            return (
                FALLBACK_MARKET_SCORE,
                FactorRationale::new(
                    "Market size unknown",
                    "Clarify TAM, growth, and competition dynamics",
                ),
            );
        }
    };

    // Zero-valued sizes count as unreported, same as absent fields.
    let tam = match market.tam {
        Some(v) if v != 0.0 => v,
        _ => DEFAULT_TAM,
    };
    let sam = match market.sam {
        Some(v) if v != 0.0 => v,
        _ => tam * DEFAULT_SAM_SHARE,
    };
    let growth_rate = market.growth_rate.unwrap_or(DEFAULT_GROWTH_RATE);
    let competition = match market.competition_intensity.as_deref() {
        Some(s) if !s.is_empty() => s.to_lowercase(),
        _ => "unknown".to_string(),
    };

    // Log scale: $1M maps to 0, $1B and beyond saturate at 100.
    let tam_score = clamp_score((tam.max(1.0).log10() - 6.0) / 3.0 * 100.0);
    let sam_score = clamp_score(sam / tam * 120.0);
    let growth_score = clamp_score(growth_rate * 400.0);
    let competition_penalty = COMPETITION_PENALTIES
        .get(competition.as_str())
        .copied()
        .unwrap_or(UNKNOWN_COMPETITION_PENALTY);

    let total = clamp_score(
        0.5 * tam_score + 0.2 * sam_score + 0.3 * growth_score - competition_penalty,
    );

    let signal = format!(
        "TAM ~${:.1}B with {:.0}% growth",
        tam / 1e9,
        growth_rate * 100.0
    );
    let caveat = if competition_penalty >= UNKNOWN_COMPETITION_PENALTY {
        "Competitive intensity requires differentiated positioning"
    } else {
        "Maintain momentum in capturing SAM"
    };
    (
        total.round_ties_even() as i32,
        FactorRationale::new(signal, caveat),
    )
}

pub fn score_product(product: Option<&ProductSignals>) -> (i32, FactorRationale) {
    let product = match product {
        Some(product) => product,
        None => {
            warn!("product signals missing; applying conservative defaults");
            return (
                FALLBACK_PRODUCT_SCORE,
                FactorRationale::new(
                    "Moat details sparse",
                    "Document IP, defensibility, and switching costs",
                ),
            );
        }
    };

    let base = if product.ip_claims.is_empty() { 15.0 } else { 28.0 };
    let patent_bonus = if product
        .ip_claims
        .iter()
        .any(|claim| claim.to_lowercase().contains("patent"))
    {
        12.0
    } else {
        0.0
    };

    // Terms match by substring containment, not word boundaries. Each term
    // counts at most once per phrase, but again for every phrase it appears
    // in.
    let mut keyword_hits = 0u32;
    for phrase in &product.defensibility_keywords {
        let phrase = phrase.to_lowercase();
        for term in STRATEGIC_TERMS {
            if phrase.contains(term) {
                keyword_hits += 1;
            }
        }
    }
    let keyword_bonus = (f64::from(keyword_hits) * 6.0).min(18.0);

    let switching = match product.switching_cost_signal.as_deref() {
        Some(s) if !s.is_empty() => s.to_lowercase(),
        _ => "low".to_string(),
    };
    let switching_bonus = SWITCHING_BONUSES
        .get(switching.as_str())
        .copied()
        .unwrap_or(DEFAULT_SWITCHING_BONUS);

    let moat_depth = (product.ip_claims.len() as f64 * 5.0).min(15.0);

    let score = clamp_score(base + patent_bonus + keyword_bonus + switching_bonus + moat_depth);

    let signal = if score >= 70.0 {
        "IP claims and defensibility signals present"
    } else {
        "Emerging moat signals identified"
    };
    let caveat = if score < 80.0 {
        "Expand patent coverage and deepen switching costs"
    } else {
        "Keep reinforcing data advantages"
    };
    (
        score.round_ties_even() as i32,
        FactorRationale::new(signal, caveat),
    )
}

pub fn score_gtm(gtm: Option<&GtmSignals>) -> (i32, FactorRationale) {
    let gtm = match gtm {
        Some(gtm) => gtm,
        None => {
            warn!("gtm signals missing; applying conservative defaults");
            return (
                FALLBACK_GTM_SCORE,
                FactorRationale::new(
                    "GTM details incomplete",
                    "Clarify ICP, channels, and traction milestones",
                ),
            );
        }
    };

    let icp_score = if gtm.icp_defined.unwrap_or(false) { 30.0 } else { 10.0 };
    let channel_score = clamp_score(gtm.channels.len() as f64 * 12.0);
    let sales_cycle = gtm
        .sales_cycle_days
        .map_or(DEFAULT_SALES_CYCLE_DAYS, f64::from);
    let cycle_score = clamp_score(100.0 - sales_cycle.min(240.0) / 240.0 * 100.0);

    let traction = gtm.early_traction.as_ref();
    let logos = traction.and_then(|t| t.logos).unwrap_or(0);
    let pilots = traction.and_then(|t| t.paid_pilots).unwrap_or(0);
    let traction_score =
        clamp_score((f64::from(logos) * 5.0 + f64::from(pilots) * 8.0).min(40.0));

    let total = clamp_score(
        0.25 * icp_score + 0.25 * channel_score + 0.25 * cycle_score + 0.25 * traction_score
            + 32.0,
    );

    let signal = format!(
        "ICP defined with {} channels and {logos} logos",
        gtm.channels.len()
    );
    let caveat = if cycle_score < 60.0 {
        "Shorten sales cycle and expand reference wins"
    } else {
        "Systematize repeatable demand generation"
    };
    (
        total.round_ties_even() as i32,
        FactorRationale::new(signal, caveat),
    )
}

/// Static financial score plus the burn-efficiency ratio reused by the
/// caveat selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialBase {
    pub score: i32,
    pub rationale: FactorRationale,
    pub efficiency_ratio: f64,
}

pub fn score_financials_base(financials: Option<&FinancialSignals>) -> FinancialBase {
    let financials = match financials {
        Some(financials) => financials,
        None => {
            warn!("financial signals missing; applying conservative defaults");
            return FinancialBase {
                score: FALLBACK_FINANCIALS_SCORE,
                rationale: FactorRationale::new(
                    "Financial runway unclear",
                    "Share revenue, burn, and efficiency metrics",
                ),
                efficiency_ratio: 0.0,
            };
        }
    };

    let revenue = financials.base_monthly_revenue.unwrap_or(0.0);
    let burn = financials.burn.unwrap_or(0.0).abs();
    let cac_payback = financials
        .cac_payback_months
        .unwrap_or(DEFAULT_CAC_PAYBACK_MONTHS);
    let gross_margin = financials.gross_margin.unwrap_or(DEFAULT_GROSS_MARGIN);

    let arr = revenue * 12.0;
    let efficiency_ratio = if burn != 0.0 {
        revenue / burn
    } else {
        ZERO_BURN_EFFICIENCY_RATIO
    };
    let efficiency_score = clamp_score(trapezoidal(efficiency_ratio, 0.2, 0.6, 1.5, 3.0));
    let arr_score = clamp_score(trapezoidal(arr, 5e5, 1e6, 1e7, 3e7));
    // Inverted interval by calibration: the payback term is currently retired
    // and always contributes zero.
    let payback_score = clamp_score(triangular(cac_payback, 24.0, 10.0, 6.0));
    let margin_score = clamp_score(trapezoidal(gross_margin, 0.2, 0.45, 0.75, 0.9));

    let base = clamp_score(
        0.35 * efficiency_score + 0.35 * arr_score + 0.2 * payback_score + 0.1 * margin_score,
    );

    let signal = format!("ARR ${:.2}M with CAC payback ~{cac_payback:.0}m", arr / 1e6);
    let caveat = if efficiency_ratio < 1.0 {
        "Improve burn efficiency"
    } else {
        "Sustain healthy margins"
    };
    FinancialBase {
        score: base.round_ties_even() as i32,
        rationale: FactorRationale::new(signal, caveat),
        efficiency_ratio,
    }
}

/// Mix the static financial score 40/60 with a logistic squash of the
/// simulated success probability.
pub fn blend_financials(base_score: i32, success_prob: f64) -> i32 {
    let scaled = 1.0 / (1.0 + (-LOGISTIC_STEEPNESS * (success_prob - 0.5)).exp());
    let component = clamp_score(scaled * 100.0);
    let blended = clamp_score(0.4 * f64::from(base_score) + 0.6 * component);
    blended.round_ties_even() as i32
}
