//! # Membership Functions
//! Piecewise-linear fuzzy membership primitives shared by the factor scorers.
//! Raw due-diligence metrics (efficiency ratios, ARR, margins) map onto the
//! canonical 0-100 suitability scale through triangular and trapezoidal
//! shapes.

/// Clamp a raw score to the canonical [0, 100] range.
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Triangular membership over `(left, right)` peaking at `peak`.
///
/// Values at or outside the interval edges score 0. With `left >= right` the
/// edge guard covers the whole axis and the shape is constantly zero; the
/// financial payback term is parameterized that way on purpose.
pub fn triangular(value: f64, left: f64, peak: f64, right: f64) -> f64 {
    if value <= left || value >= right {
        return 0.0;
    }
    if value == peak {
        return 100.0;
    }
    if value < peak {
        100.0 * (value - left) / (peak - left)
    } else {
        100.0 * (right - value) / (right - peak)
    }
}

/// Trapezoidal membership: 0 at or outside `(left, right)`, 100 on the
/// plateau `[left_top, right_top]`, linear ramps on both shoulders.
pub fn trapezoidal(value: f64, left: f64, left_top: f64, right_top: f64, right: f64) -> f64 {
    if value <= left || value >= right {
        return 0.0;
    }
    if (left_top..=right_top).contains(&value) {
        return 100.0;
    }
    if value < left_top {
        100.0 * (value - left) / (left_top - left)
    } else {
        100.0 * (right - value) / (right - right_top)
    }
}
