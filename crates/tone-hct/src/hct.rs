// SPDX-License-Identifier: MIT
//
// HCT — hue and chroma from CAM16, tone from L*.
//
// Going from a pixel to HCT is a direct computation. Going the other way is
// a search: most (hue, chroma, tone) triples are outside sRGB, so the solver
// keeps hue and tone and gives up as little chroma as it has to.
//
// The solver bisects on chroma. For each chroma candidate it bisects on CAM16
// lightness J until the rendered pixel lands within 0.2 L* of the target tone,
// and accepts it only if clipping to sRGB kept the appearance within 1 ΔE of
// the requested hue.

use std::fmt;

use crate::argb::{Argb, sanitize_degrees};
use crate::cam16::{Cam16, ViewingConditions};

/// Chroma bisection stops once the bracket is narrower than this.
const CHROMA_SEARCH_ENDPOINT: f64 = 0.4;

/// J bisection stops once the bracket is narrower than this.
const LIGHTNESS_SEARCH_ENDPOINT: f64 = 0.01;

/// Largest acceptable L* error for a candidate pixel.
const DL_MAX: f64 = 0.2;

/// Largest acceptable CAM16-UCS shift introduced by gamut clipping.
const DE_MAX: f64 = 1.0;

// ─── Hct ─────────────────────────────────────────────────────────────────────

/// A color in hue/chroma/tone form, always backed by a displayable pixel.
///
/// The stored hue, chroma and tone are measured from the pixel, so they can
/// differ from what was requested in [`Hct::from`]: chroma is clipped to the
/// sRGB gamut and tone is rounded to what 8-bit channels can express.
///
/// # Examples
///
/// ```
/// use tone_hct::Hct;
///
/// let accent = Hct::from(270.0, 36.0, 40.0);
/// assert!((accent.tone() - 40.0).abs() < 1.0);
/// assert!(accent.chroma() <= 40.0);
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Hct {
    hue: f64,
    chroma: f64,
    tone: f64,
    argb: Argb,
}

impl Hct {
    /// Solve for the pixel closest to the requested hue, chroma and tone.
    ///
    /// - `hue`: degrees, any value (wrapped to [0, 360))
    /// - `chroma`: requested colorfulness, reduced if out of gamut
    /// - `tone`: L*, clamped to [0, 100]
    #[must_use]
    pub fn from(hue: f64, chroma: f64, tone: f64) -> Self {
        Self::from_argb(solve_to_argb(hue, chroma, tone))
    }

    /// Measure a pixel.
    #[must_use]
    pub fn from_argb(argb: Argb) -> Self {
        let cam = Cam16::from_argb(argb);
        Self {
            hue: cam.hue,
            chroma: cam.chroma,
            tone: argb.lstar(),
            argb,
        }
    }

    /// Hue angle in degrees, [0, 360).
    #[inline]
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    /// CAM16 chroma (>= 0).
    #[inline]
    #[must_use]
    pub const fn chroma(&self) -> f64 {
        self.chroma
    }

    /// L*, [0, 100].
    #[inline]
    #[must_use]
    pub const fn tone(&self) -> f64 {
        self.tone
    }

    #[inline]
    #[must_use]
    pub const fn to_argb(&self) -> Argb {
        self.argb
    }
}

impl fmt::Debug for Hct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hct({:.1}, {:.1}, {:.1}) {}",
            self.hue, self.chroma, self.tone, self.argb
        )
    }
}

impl fmt::Display for Hct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argb)
    }
}

impl From<Argb> for Hct {
    fn from(argb: Argb) -> Self {
        Self::from_argb(argb)
    }
}

// ─── Hue Families ────────────────────────────────────────────────────────────
//
// At equal tone these hue ranges read noticeably brighter (yellow) or more
// saturated than their neighbours, so some roles special-case them.

/// Hue in [105, 125).
#[inline]
#[must_use]
pub fn is_yellow(hue: f64) -> bool {
    (105.0..125.0).contains(&hue)
}

// ─── Solver ──────────────────────────────────────────────────────────────────

fn solve_to_argb(hue: f64, chroma: f64, tone: f64) -> Argb {
    let tone = tone.clamp(0.0, 100.0);
    if chroma < 1.0 || tone.round() <= 0.0 || tone.round() >= 100.0 {
        return Argb::from_lstar(tone);
    }

    let hue = sanitize_degrees(hue);
    let vc = ViewingConditions::standard();

    let mut high = chroma;
    let mut mid = chroma;
    let mut low = 0.0_f64;
    let mut first_pass = true;
    let mut answer = None;

    while (low - high).abs() >= CHROMA_SEARCH_ENDPOINT {
        let candidate = find_by_j(hue, mid, tone, vc);

        // The requested chroma is in gamut: nothing to search for.
        if first_pass {
            if let Some(argb) = candidate {
                return argb;
            }
            first_pass = false;
            mid = low + (high - low) / 2.0;
            continue;
        }

        match candidate {
            Some(argb) => {
                answer = Some(argb);
                low = mid;
            }
            None => high = mid,
        }
        mid = low + (high - low) / 2.0;
    }

    answer.unwrap_or_else(|| Argb::from_lstar(tone))
}

/// Bisect on J for a pixel at `tone` whose clipped appearance still has the
/// requested hue and chroma. Returns the best clipped pixel, if any.
fn find_by_j(hue: f64, chroma: f64, tone: f64, vc: &ViewingConditions) -> Option<Argb> {
    let mut low = 0.0_f64;
    let mut high = 100.0_f64;
    let mut best_dl = f64::MAX;
    let mut best_de = f64::MAX;
    let mut best = None;

    while (low - high).abs() > LIGHTNESS_SEARCH_ENDPOINT {
        let mid = low + (high - low) / 2.0;
        let clipped = Cam16::from_jch_in(mid, chroma, hue, vc).viewed(vc);
        let clipped_lstar = clipped.lstar();
        let dl = (tone - clipped_lstar).abs();

        if dl < DL_MAX {
            let cam = Cam16::from_argb_in(clipped, vc);
            let de = cam.distance(&Cam16::from_jch_in(cam.j, cam.chroma, hue, vc));
            if de <= DE_MAX && de <= best_de {
                best_dl = dl;
                best_de = de;
                best = Some(clipped);
            }
        }

        if best_dl <= 0.0 && best_de <= 0.0 {
            break;
        }

        if clipped_lstar < tone {
            low = mid;
        } else {
            high = mid;
        }
    }

    best
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn hue_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        if d > 180.0 { 360.0 - d } else { d }
    }

    // ── Measuring ────────────────────────────────────────────────────────

    #[test]
    fn from_argb_keeps_the_pixel() {
        for argb in [0xff67_50a4, 0xffff_0000, 0xff00_0000, 0xffff_ffff] {
            assert_eq!(Hct::from_argb(Argb(argb)).to_argb(), Argb(argb));
        }
    }

    #[test]
    fn measured_tone_is_lstar() {
        let hct = Hct::from_argb(Argb(0xff67_50a4));
        assert!(approx_eq(hct.tone(), Argb(0xff67_50a4).lstar(), 1e-12));
    }

    // ── Solving ──────────────────────────────────────────────────────────

    #[test]
    fn solved_tone_matches_request() {
        for tone in [5.0, 20.0, 40.0, 50.0, 80.0, 95.0] {
            for hue in [0.0, 60.0, 120.0, 200.0, 282.0] {
                let hct = Hct::from(hue, 40.0, tone);
                assert!(
                    approx_eq(hct.tone(), tone, 1.0),
                    "requested tone {tone} at hue {hue}, got {}",
                    hct.tone()
                );
            }
        }
    }

    #[test]
    fn in_gamut_request_keeps_hue_and_chroma() {
        let hct = Hct::from(270.0, 20.0, 50.0);
        assert!(hue_diff(hct.hue(), 270.0) < 3.0, "hue = {}", hct.hue());
        assert!(approx_eq(hct.chroma(), 20.0, 2.0), "chroma = {}", hct.chroma());
    }

    #[test]
    fn out_of_gamut_request_loses_chroma_not_tone() {
        let hct = Hct::from(120.0, 200.0, 50.0);
        assert!(hct.chroma() < 200.0);
        assert!(hct.chroma() > 20.0, "should keep most available chroma");
        assert!(approx_eq(hct.tone(), 50.0, 1.0));
    }

    #[test]
    fn low_chroma_is_gray() {
        let argb = Hct::from(200.0, 0.5, 50.0).to_argb();
        assert_eq!(argb.red(), argb.green());
        assert_eq!(argb.green(), argb.blue());
    }

    #[test]
    fn extreme_tones_are_black_and_white() {
        assert_eq!(Hct::from(30.0, 80.0, 0.0).to_argb(), Argb::BLACK);
        assert_eq!(Hct::from(30.0, 80.0, 100.0).to_argb(), Argb::WHITE);
        assert_eq!(Hct::from(30.0, 80.0, 140.0).to_argb(), Argb::WHITE);
    }

    #[test]
    fn negative_hue_wraps() {
        let a = Hct::from(-90.0, 30.0, 50.0);
        let b = Hct::from(270.0, 30.0, 50.0);
        assert_eq!(a.to_argb(), b.to_argb());
    }

    // ── Hue Families ─────────────────────────────────────────────────────

    #[test]
    fn hue_family_bounds() {
        assert!(is_yellow(105.0) && is_yellow(124.9) && !is_yellow(125.0));
    }

    #[test]
    fn debug_shows_components() {
        let dbg = format!("{:?}", Hct::from_argb(Argb::WHITE));
        assert!(dbg.starts_with("Hct("), "{dbg}");
        assert!(dbg.ends_with("#ffffff"), "{dbg}");
    }
}
