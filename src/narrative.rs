//! # Narrative Assembly
//! Renders the per-factor rationales and the simulation summary into the
//! single bullet-list string returned as `narrative_justification`. Bullets
//! always appear in the same factor order, with the simulation line last.

use crate::model::{McsSummary, RationaleSet};

/// Hard cap on narrative length, counted in characters.
pub const NARRATIVE_MAX_CHARS: usize = 900;

const TRUNCATION_SUFFIX: &str = "...";

pub fn build_narrative(rationales: &RationaleSet, mcs: &McsSummary) -> String {
    let ordered = [
        ("Team", &rationales.team_strength),
        ("Market", &rationales.market_opportunity),
        ("Product", &rationales.product_moat),
        ("Go-To-Market", &rationales.go_to_market),
        ("Financials", &rationales.financials),
    ];

    let mut bullets: Vec<String> = ordered
        .iter()
        .map(|(label, rationale)| {
            format!(
                "• {label}: {}. Caveat: {}.",
                rationale.signal, rationale.caveat
            )
        })
        .collect();
    bullets.push(format!(
        "• MCS: p50 ${}, success vs claim {:.0}%.",
        thousands(mcs.p50),
        mcs.success_prob_vs_claim * 100.0
    ));

    truncate_chars(bullets.join(" "))
}

/// Round to a whole number (ties to even) and group digits by thousands.
fn thousands(value: f64) -> String {
    let rounded = value.round_ties_even() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn truncate_chars(narrative: String) -> String {
    // Counted in characters, not bytes; the bullet glyph is multi-byte.
    if narrative.chars().count() <= NARRATIVE_MAX_CHARS {
        return narrative;
    }
    let kept: String = narrative
        .chars()
        .take(NARRATIVE_MAX_CHARS - TRUNCATION_SUFFIX.len())
        .collect();
    format!("{kept}{TRUNCATION_SUFFIX}")
}
