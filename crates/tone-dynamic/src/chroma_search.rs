//! Find the tone where a palette is most colorful.
//!
//! sRGB can't show every chroma at every tone: a yellow peaks near the top of
//! the tone range, a blue near the bottom. Accent roles that want "as vivid as
//! possible" walk the palette from one end of the tone range until the
//! palette's chroma is reached.

use tone_hct::{Hct, TonalPalette};

/// Tone in `[lower, upper]` where `palette` (chroma scaled by `multiplier`)
/// reaches its highest chroma, searching down from tone 100.
#[must_use]
pub fn tone_max_chroma(palette: &TonalPalette, lower: f64, upper: f64, multiplier: f64) -> f64 {
    let chroma = palette.chroma() * multiplier;
    best_tone_for_chroma(palette.hue(), chroma, 100.0, true).clamp(lower, upper)
}

/// Like [`tone_max_chroma`] but searching up from tone 0, so darker tones win
/// ties.
#[must_use]
pub fn tone_min_chroma(palette: &TonalPalette, lower: f64, upper: f64) -> f64 {
    best_tone_for_chroma(palette.hue(), palette.chroma(), 0.0, false).clamp(lower, upper)
}

/// Step one tone at a time from `tone`, keeping the best tone seen, until the
/// requested chroma is reached or the tone range ends. Steps that don't
/// improve are skipped, not final: near white and black the gamut is too
/// narrow to tell hues apart. Returns `tone` itself if nothing improves on it.
fn best_tone_for_chroma(hue: f64, chroma: f64, tone: f64, by_decreasing_tone: bool) -> f64 {
    let step = if by_decreasing_tone { -1.0 } else { 1.0 };
    let mut answer = tone;
    let mut best = Hct::from(hue, chroma, answer);
    let mut tone = tone;

    while best.chroma() < chroma {
        tone += step;
        if !(0.0..=100.0).contains(&tone) {
            break;
        }
        let candidate = Hct::from(hue, chroma, tone);
        if candidate.chroma() > best.chroma() {
            best = candidate;
            answer = tone;
        }
    }

    answer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_in_bounds() {
        let palette = TonalPalette::from_hue_and_chroma(270.0, 36.0);
        let tone = tone_max_chroma(&palette, 0.0, 90.0, 1.0);
        assert!((0.0..=90.0).contains(&tone), "tone = {tone}");
        let tone = tone_min_chroma(&palette, 35.0, 93.0);
        assert!((35.0..=93.0).contains(&tone), "tone = {tone}");
    }

    #[test]
    fn max_chroma_is_a_local_peak() {
        let palette = TonalPalette::from_hue_and_chroma(120.0, 40.0);
        let tone = tone_max_chroma(&palette, 0.0, 100.0, 1.0);
        let here = Hct::from(120.0, 40.0, tone).chroma();
        let next = Hct::from(120.0, 40.0, tone - 1.0).chroma();
        assert!(
            here >= 40.0 - 0.5 || next <= here,
            "tone {tone}: chroma {here}, next {next}"
        );
    }

    #[test]
    fn search_climbs_past_the_gray_top() {
        for hue in [0.0, 322.0] {
            let palette = TonalPalette::from_hue_and_chroma(hue, 28.0);
            let tone = tone_max_chroma(&palette, 0.0, 100.0, 1.0);
            let chroma = Hct::from(hue, 28.0, tone).chroma();
            assert!(tone < 100.0, "hue {hue}: tone {tone}");
            assert!(chroma > 10.0, "hue {hue}: tone {tone}, chroma {chroma}");
        }
    }

    #[test]
    fn min_chroma_search_reaches_chroma_too() {
        let palette = TonalPalette::from_hue_and_chroma(270.0, 36.0);
        let tone = tone_min_chroma(&palette, 0.0, 100.0);
        assert!(tone > 0.0, "tone = {tone}");
        assert!(Hct::from(270.0, 36.0, tone).chroma() > 20.0, "tone = {tone}");
    }

    #[test]
    fn achromatic_palette_keeps_seed_tone() {
        // Nothing improves on zero chroma, so the seed tone comes back.
        let palette = TonalPalette::from_hue_and_chroma(0.0, 0.0);
        assert!((tone_max_chroma(&palette, 0.0, 100.0, 1.0) - 100.0).abs() < 1e-12);
        assert!(tone_min_chroma(&palette, 0.0, 100.0).abs() < 1e-12);
    }
}
