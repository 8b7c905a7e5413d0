//! Contrast ratios between tones.
//!
//! Tone is L*, and L* maps one-to-one onto relative luminance Y, so the
//! WCAG contrast ratio of two colors depends on their tones alone:
//!
//!   ratio = (`Y_lighter` + 5) / (`Y_darker` + 5)     with Y on a 0-100 scale
//!
//! The solvers here answer the inverse question: given one tone and a ratio,
//! which tone on the lighter (or darker) side reaches it? They nudge the
//! answer 0.4 tone further out, because the HCT solver rounds to 8-bit
//! channels and can land a hair short.

use crate::argb::{lstar_from_y, y_from_lstar};

/// A solved tone may miss the ratio by this much before it is rejected.
const CONTRAST_RATIO_EPSILON: f64 = 0.04;

/// Safety margin added to solved tones.
const LUMINANCE_GAMUT_MAP_TOLERANCE: f64 = 0.4;

/// Contrast ratio between two tones, in [1, 21].
///
/// Tones outside [0, 100] are clamped first.
#[must_use]
pub fn ratio_of_tones(a: f64, b: f64) -> f64 {
    let a = a.clamp(0.0, 100.0);
    let b = b.clamp(0.0, 100.0);
    ratio_of_ys(y_from_lstar(a), y_from_lstar(b))
}

/// Contrast ratio between two luminances on the 0-100 scale.
#[must_use]
pub fn ratio_of_ys(y1: f64, y2: f64) -> f64 {
    let lighter = y1.max(y2);
    let darker = if lighter == y2 { y1 } else { y2 };
    (lighter + 5.0) / (darker + 5.0)
}

/// The tone above `tone` that reaches `ratio` against it.
///
/// `None` if `tone` is outside [0, 100] or if even white falls short.
#[must_use]
pub fn lighter(tone: f64, ratio: f64) -> Option<f64> {
    if !(0.0..=100.0).contains(&tone) {
        return None;
    }

    let dark_y = y_from_lstar(tone);
    let light_y = ratio.mul_add(dark_y + 5.0, -5.0);
    if !(0.0..=100.0).contains(&light_y) {
        return None;
    }

    let real = ratio_of_ys(light_y, dark_y);
    if real < ratio && (real - ratio).abs() > CONTRAST_RATIO_EPSILON {
        return None;
    }

    let answer = lstar_from_y(light_y) + LUMINANCE_GAMUT_MAP_TOLERANCE;
    (0.0..=100.0).contains(&answer).then_some(answer)
}

/// The tone below `tone` that reaches `ratio` against it.
///
/// `None` if `tone` is outside [0, 100] or if even black falls short.
#[must_use]
pub fn darker(tone: f64, ratio: f64) -> Option<f64> {
    if !(0.0..=100.0).contains(&tone) {
        return None;
    }

    let light_y = y_from_lstar(tone);
    let dark_y = (light_y + 5.0) / ratio - 5.0;
    if !(0.0..=100.0).contains(&dark_y) {
        return None;
    }

    let real = ratio_of_ys(light_y, dark_y);
    if real < ratio && (real - ratio).abs() > CONTRAST_RATIO_EPSILON {
        return None;
    }

    let answer = lstar_from_y(dark_y) - LUMINANCE_GAMUT_MAP_TOLERANCE;
    (0.0..=100.0).contains(&answer).then_some(answer)
}

/// [`lighter`], falling back to white.
#[must_use]
pub fn lighter_unsafe(tone: f64, ratio: f64) -> f64 {
    lighter(tone, ratio).unwrap_or(100.0)
}

/// [`darker`], falling back to black.
#[must_use]
pub fn darker_unsafe(tone: f64, ratio: f64) -> f64 {
    darker(tone, ratio).unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
