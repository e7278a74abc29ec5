//! # Wire Model
//! Typed request/response contracts for risk assessment, matching the JSON
//! shapes dashboards already speak: camelCase weight and breakdown keys,
//! uppercase `TAM`/`SAM`, snake_case everywhere else.
//!
//! Unknown fields are ignored; missing fields fall back to struct defaults so
//! partially-filled payloads always parse. Range violations are caught by
//! [`RiskAssessmentRequest::validate`] before any scoring runs.

use serde::{Deserialize, Serialize};

/// Simulation bounds mirrored by request validation.
pub const MIN_ITERATIONS: u32 = 100;
pub const MAX_ITERATIONS: u32 = 20_000;
pub const DEFAULT_ITERATIONS: u32 = 5_000;
pub const MIN_HORIZON_MONTHS: u32 = 1;
pub const MAX_HORIZON_MONTHS: u32 = 60;
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;
pub const DEFAULT_TARGET: &str = "revenue";

/// One founder's track record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FounderProfile {
    #[serde(default)]
    pub years_experience: f64,
    #[serde(default)]
    pub domain_match: bool,
    #[serde(default)]
    pub prior_exit: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamSignals {
    #[serde(default)]
    pub founders: Vec<FounderProfile>,
    #[serde(default)]
    pub team_size: Option<u32>,
    #[serde(default)]
    pub senior_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketSignals {
    #[serde(default, rename = "TAM")]
    pub tam: Option<f64>,
    #[serde(default, rename = "SAM")]
    pub sam: Option<f64>,
    #[serde(default)]
    pub growth_rate: Option<f64>,
    #[serde(default)]
    pub competition_intensity: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductSignals {
    #[serde(default)]
    pub ip_claims: Vec<String>,
    #[serde(default)]
    pub switching_cost_signal: Option<String>,
    #[serde(default)]
    pub defensibility_keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EarlyTraction {
    #[serde(default)]
    pub logos: Option<u32>,
    #[serde(default)]
    pub paid_pilots: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GtmSignals {
    #[serde(default)]
    pub icp_defined: Option<bool>,
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default)]
    pub sales_cycle_days: Option<u32>,
    #[serde(default)]
    pub early_traction: Option<EarlyTraction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinancialSignals {
    #[serde(default)]
    pub base_monthly_revenue: Option<f64>,
    #[serde(default)]
    pub growth_mean: Option<f64>,
    #[serde(default)]
    pub growth_sd: Option<f64>,
    #[serde(default)]
    pub churn_mean: Option<f64>,
    #[serde(default)]
    pub churn_sd: Option<f64>,
    #[serde(default)]
    pub burn: Option<f64>,
    #[serde(default)]
    pub claimed_month12_revenue: Option<f64>,
    #[serde(default)]
    pub cac_payback_months: Option<f64>,
    #[serde(default)]
    pub gross_margin: Option<f64>,
}

/// The due-diligence signal groups. Every group except `financials` may be
/// absent; the scorers degrade to conservative defaults instead of failing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisData {
    #[serde(default)]
    pub team: Option<TeamSignals>,
    #[serde(default)]
    pub market: Option<MarketSignals>,
    #[serde(default)]
    pub product: Option<ProductSignals>,
    #[serde(default)]
    pub gtm: Option<GtmSignals>,
    #[serde(default)]
    pub financials: Option<FinancialSignals>,
}

/// Caller-supplied factor weights; missing keys are filled from the default
/// distribution, out-of-range values are clamped rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightInputs {
    #[serde(default)]
    pub team_strength: Option<f64>,
    #[serde(default)]
    pub market_opportunity: Option<f64>,
    #[serde(default)]
    pub product_moat: Option<f64>,
    #[serde(default)]
    pub go_to_market: Option<f64>,
    #[serde(default)]
    pub financials: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct McsConfig {
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default = "default_horizon_months")]
    pub horizon_months: u32,
}

impl Default for McsConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            target: DEFAULT_TARGET.to_string(),
            horizon_months: DEFAULT_HORIZON_MONTHS,
        }
    }
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

fn default_horizon_months() -> u32 {
    DEFAULT_HORIZON_MONTHS
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RiskAssessmentRequest {
    #[serde(default)]
    pub weights: WeightInputs,
    #[serde(default, rename = "analysisData")]
    pub analysis_data: AnalysisData,
    #[serde(default)]
    pub mcs: McsConfig,
}

impl RiskAssessmentRequest {
    /// Range checks applied before scoring. Weight inputs are exempt: they
    /// are clamped and renormalized instead of rejected.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(team) = &self.analysis_data.team {
            for (idx, founder) in team.founders.iter().enumerate() {
                non_negative(
                    Some(founder.years_experience),
                    &format!("team.founders[{idx}].years_experience"),
                )?;
            }
            if let Some(ratio) = team.senior_ratio {
                if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
                    return Err("team.senior_ratio must be between 0 and 1".to_string());
                }
            }
        }

        if let Some(market) = &self.analysis_data.market {
            non_negative(market.tam, "market.TAM")?;
            non_negative(market.sam, "market.SAM")?;
            finite(market.growth_rate, "market.growth_rate")?;
        }

        if let Some(financials) = &self.analysis_data.financials {
            non_negative(
                financials.base_monthly_revenue,
                "financials.base_monthly_revenue",
            )?;
            finite(financials.growth_mean, "financials.growth_mean")?;
            non_negative(financials.growth_sd, "financials.growth_sd")?;
            finite(financials.churn_mean, "financials.churn_mean")?;
            non_negative(financials.churn_sd, "financials.churn_sd")?;
            finite(financials.burn, "financials.burn")?;
            non_negative(
                financials.claimed_month12_revenue,
                "financials.claimed_month12_revenue",
            )?;
            non_negative(
                financials.cac_payback_months,
                "financials.cac_payback_months",
            )?;
            finite(financials.gross_margin, "financials.gross_margin")?;
        }

        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&self.mcs.iterations) {
            return Err(format!(
                "mcs.iterations must be between {MIN_ITERATIONS} and {MAX_ITERATIONS}"
            ));
        }
        if !(MIN_HORIZON_MONTHS..=MAX_HORIZON_MONTHS).contains(&self.mcs.horizon_months) {
            return Err(format!(
                "mcs.horizon_months must be between {MIN_HORIZON_MONTHS} and {MAX_HORIZON_MONTHS}"
            ));
        }

        Ok(())
    }
}

fn non_negative(value: Option<f64>, field: &str) -> Result<(), String> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(format!("{field} must be a non-negative number"))
        }
        _ => Ok(()),
    }
}

fn finite(value: Option<f64>, field: &str) -> Result<(), String> {
    match value {
        Some(v) if !v.is_finite() => Err(format!("{field} must be a finite number")),
        _ => Ok(()),
    }
}

/// Human-readable evidence for one factor score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorRationale {
    pub signal: String,
    pub caveat: String,
}

impl FactorRationale {
    pub fn new(signal: impl Into<String>, caveat: impl Into<String>) -> Self {
        Self {
            signal: signal.into(),
            caveat: caveat.into(),
        }
    }
}

/// Rationales for all five factors, in the fixed narrative order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RationaleSet {
    pub team_strength: FactorRationale,
    pub market_opportunity: FactorRationale,
    pub product_moat: FactorRationale,
    pub go_to_market: FactorRationale,
    pub financials: FactorRationale,
}

/// Integer factor scores in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorBreakdown {
    pub team_strength: i32,
    pub market_opportunity: i32,
    pub product_moat: i32,
    pub go_to_market: i32,
    pub financials: i32,
}

/// Terminal distribution of the simulated revenue trajectories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct McsSummary {
    pub metric: String,
    pub iterations: u32,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
    pub mean: f64,
    pub success_prob_vs_claim: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessmentResponse {
    pub composite_investment_safety_score: f64,
    pub factor_breakdown: FactorBreakdown,
    pub narrative_justification: String,
    pub mcs: McsSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_parses_wire_field_names() {
        let raw = json!({
            "weights": {"teamStrength": 0.5, "financials": 0.5},
            "analysisData": {
                "market": {"TAM": 2.1e9, "SAM": 4.5e8, "growth_rate": 0.18},
                "financials": {"base_monthly_revenue": 82000.0}
            },
            "mcs": {"iterations": 250, "horizon_months": 6}
        });
        let req: RiskAssessmentRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(req.weights.team_strength, Some(0.5));
        assert_eq!(req.weights.market_opportunity, None);
        assert_eq!(req.weights.financials, Some(0.5));
        let market = req.analysis_data.market.unwrap();
        assert_eq!(market.tam, Some(2.1e9));
        assert_eq!(market.sam, Some(4.5e8));
        assert_eq!(req.mcs.iterations, 250);
        assert_eq!(req.mcs.horizon_months, 6);
        assert_eq!(req.mcs.target, DEFAULT_TARGET);
        assert!(req.analysis_data.team.is_none());
    }

    #[test]
    fn empty_body_parses_with_defaults() {
        let req: RiskAssessmentRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.mcs.iterations, DEFAULT_ITERATIONS);
        assert_eq!(req.mcs.horizon_months, DEFAULT_HORIZON_MONTHS);
        assert!(req.analysis_data.financials.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn breakdown_serializes_camel_case() {
        let breakdown = FactorBreakdown {
            team_strength: 82,
            market_opportunity: 74,
            product_moat: 69,
            go_to_market: 76,
            financials: 75,
        };
        let v = serde_json::to_value(breakdown).unwrap();
        assert_eq!(
            v,
            json!({
                "teamStrength": 82,
                "marketOpportunity": 74,
                "productMoat": 69,
                "goToMarket": 76,
                "financials": 75
            })
        );
    }

    #[test]
    fn validate_rejects_out_of_range_iterations() {
        let mut req = RiskAssessmentRequest::default();
        req.mcs.iterations = 50;
        assert!(req.validate().unwrap_err().contains("mcs.iterations"));
        req.mcs.iterations = 30_000;
        assert!(req.validate().unwrap_err().contains("mcs.iterations"));
    }

    #[test]
    fn validate_rejects_out_of_range_horizon() {
        let mut req = RiskAssessmentRequest::default();
        req.mcs.horizon_months = 0;
        assert!(req.validate().unwrap_err().contains("mcs.horizon_months"));
        req.mcs.horizon_months = 90;
        assert!(req.validate().unwrap_err().contains("mcs.horizon_months"));
    }

    #[test]
    fn validate_rejects_senior_ratio_above_one() {
        let raw = json!({"analysisData": {"team": {"senior_ratio": 1.4}}});
        let req: RiskAssessmentRequest = serde_json::from_value(raw).unwrap();
        assert!(req.validate().unwrap_err().contains("senior_ratio"));
    }

    #[test]
    fn validate_rejects_negative_financials() {
        let raw = json!({"analysisData": {"financials": {"base_monthly_revenue": -1.0}}});
        let req: RiskAssessmentRequest = serde_json::from_value(raw).unwrap();
        assert!(req
            .validate()
            .unwrap_err()
            .contains("base_monthly_revenue"));
    }

    #[test]
    fn validate_accepts_negative_growth_and_burn() {
        let raw = json!({
            "analysisData": {
                "financials": {"growth_mean": -0.05, "burn": -40000.0, "churn_mean": -0.01}
            }
        });
        let req: RiskAssessmentRequest = serde_json::from_value(raw).unwrap();
        assert!(req.validate().is_ok());
    }
}
