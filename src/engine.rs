//! # Assessment Engine
//! Pure, testable logic that maps `RiskAssessmentRequest` → scored response.
//! No I/O beyond logging, suitable for unit tests and offline batch scoring.
//!
//! Policy: the four qualitative factors always produce a score, falling back
//! to conservative defaults when a signal group is missing. Financial signals
//! are mandatory because the simulation and the blended financial score have
//! nothing to run on without them.

use std::fmt;

use tracing::info;

use crate::factors;
use crate::model::{
    FactorBreakdown, RationaleSet, RiskAssessmentRequest, RiskAssessmentResponse,
};
use crate::narrative::build_narrative;
use crate::simulate::simulate_revenue;
use crate::weights::{aggregate, materialize, normalize};

/// Why an assessment could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessError {
    /// The request carried no financial signal group.
    MissingFinancials,
    /// A field failed range validation.
    InvalidInput(String),
}

impl fmt::Display for AssessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessError::MissingFinancials => {
                write!(f, "Financial signals are required for risk assessment")
            }
            AssessError::InvalidInput(detail) => write!(f, "{detail}"),
        }
    }
}

impl std::error::Error for AssessError {}

/// A scored request plus whether the caller's weights had to be replaced or
/// rescaled beyond the drift tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub response: RiskAssessmentResponse,
    pub weights_normalized: bool,
}

/// Same logic as the `/api/risk/assess` handler but purely functional for
/// testing: validate, score the five factors, simulate, blend, narrate.
pub fn assess(request: &RiskAssessmentRequest, seed: u64) -> Result<Assessment, AssessError> {
    request.validate().map_err(AssessError::InvalidInput)?;

    // 1) Weights: fill gaps, clamp, renormalize.
    let (weights, weights_normalized) = normalize(materialize(&request.weights));

    // 2) Qualitative factors tolerate missing groups.
    let analysis = &request.analysis_data;
    let (team_score, team_rationale) = factors::score_team(analysis.team.as_ref());
    let (market_score, market_rationale) = factors::score_market(analysis.market.as_ref());
    let (product_score, product_rationale) = factors::score_product(analysis.product.as_ref());
    let (gtm_score, gtm_rationale) = factors::score_gtm(analysis.gtm.as_ref());

    // 3) Financials gate the whole assessment.
    let financials = analysis
        .financials
        .as_ref()
        .ok_or(AssessError::MissingFinancials)?;

    let base = factors::score_financials_base(Some(financials));
    let mcs = simulate_revenue(financials, &request.mcs, seed);
    let financial_score = factors::blend_financials(base.score, mcs.success_prob_vs_claim);

    let mut financial_rationale = base.rationale;
    financial_rationale.signal = format!(
        "{}; MCS success {:.0}%",
        financial_rationale.signal,
        mcs.success_prob_vs_claim * 100.0
    );
    financial_rationale.caveat = if mcs.success_prob_vs_claim < 0.5 {
        "Bridge plan needed to reach claimed revenue".to_string()
    } else {
        "Track execution to convert modeled upside".to_string()
    };

    let breakdown = FactorBreakdown {
        team_strength: team_score,
        market_opportunity: market_score,
        product_moat: product_score,
        go_to_market: gtm_score,
        financials: financial_score,
    };
    let rationales = RationaleSet {
        team_strength: team_rationale,
        market_opportunity: market_rationale,
        product_moat: product_rationale,
        go_to_market: gtm_rationale,
        financials: financial_rationale,
    };

    // 4) Composite and narrative.
    let composite = aggregate(&weights, &breakdown);
    let narrative = build_narrative(&rationales, &mcs);

    info!(
        composite,
        success = mcs.success_prob_vs_claim,
        weights_normalized,
        "risk assessment scored"
    );

    Ok(Assessment {
        response: RiskAssessmentResponse {
            composite_investment_safety_score: (composite * 10.0).round_ties_even() / 10.0,
            factor_breakdown: breakdown,
            narrative_justification: narrative,
            mcs,
        },
        weights_normalized,
    })
}
