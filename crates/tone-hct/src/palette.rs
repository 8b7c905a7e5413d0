//! Tonal palettes: one hue and chroma, every tone.
//!
//! A palette is the unit a dynamic scheme draws from: "primary" is a palette,
//! "neutral" is a palette, and a role asks its palette for a particular tone.
//! The palette itself stores no colors, only the request, so any tone can be
//! produced on demand.
//!
//! Each palette also has a key color: the tone closest to 50 where the
//! requested chroma is still reachable. It is what a swatch picker would show
//! as "the" color of the palette.

use std::collections::HashMap;

use crate::argb::Argb;
use crate::hct::Hct;

/// Chroma far above anything sRGB can show; asking for it yields the
/// per-tone maximum.
const MAX_CHROMA_VALUE: f64 = 200.0;

// ---------------------------------------------------------------------------
// TonalPalette
// ---------------------------------------------------------------------------

/// A hue and chroma that can be rendered at any tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TonalPalette {
    hue: f64,
    chroma: f64,
    key_color: Hct,
}

impl TonalPalette {
    /// Build a palette from a requested hue and chroma.
    ///
    /// The key color is searched for; see [`KeyColor`].
    #[must_use]
    pub fn from_hue_and_chroma(hue: f64, chroma: f64) -> Self {
        Self {
            hue,
            chroma,
            key_color: KeyColor::new(hue, chroma).create(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    #[inline]
    #[must_use]
    pub const fn chroma(&self) -> f64 {
        self.chroma
    }

    #[inline]
    #[must_use]
    pub const fn key_color(&self) -> Hct {
        self.key_color
    }

    /// The pixel at `tone`.
    #[must_use]
    pub fn tone(&self, tone: f64) -> Argb {
        self.hct_at(tone).to_argb()
    }

    /// The full color at `tone`.
    #[must_use]
    pub fn hct_at(&self, tone: f64) -> Hct {
        Hct::from(self.hue, self.chroma, tone)
    }
}

// ---------------------------------------------------------------------------
// KeyColor
// ---------------------------------------------------------------------------

/// Search for a palette's key color.
///
/// Binary search over integer tones for the one nearest 50 whose maximum
/// reachable chroma covers the requested chroma. When no tone reaches it,
/// the search settles on the tone of peak chroma for the hue.
pub struct KeyColor {
    hue: f64,
    requested_chroma: f64,
    chroma_cache: HashMap<i32, f64>,
}

impl KeyColor {
    const PIVOT_TONE: i32 = 50;
    const TONE_STEP: i32 = 1;
    const EPSILON: f64 = 0.01;

    #[must_use]
    pub fn new(hue: f64, requested_chroma: f64) -> Self {
        Self {
            hue,
            requested_chroma,
            chroma_cache: HashMap::new(),
        }
    }

    /// Run the search.
    #[must_use]
    pub fn create(mut self) -> Hct {
        let mut lower = 0;
        let mut upper = 100;

        while lower < upper {
            let mid = (lower + upper) / 2;
            let mid_chroma = self.max_chroma(mid);
            let is_ascending = mid_chroma < self.max_chroma(mid + Self::TONE_STEP);
            let sufficient = mid_chroma >= self.requested_chroma - Self::EPSILON;

            if sufficient {
                // Move toward the pivot while keeping enough chroma.
                if (lower - Self::PIVOT_TONE).abs() < (upper - Self::PIVOT_TONE).abs() {
                    upper = mid;
                } else {
                    if lower == mid {
                        return Hct::from(self.hue, self.requested_chroma, f64::from(lower));
                    }
                    lower = mid;
                }
            } else if is_ascending {
                lower = mid + Self::TONE_STEP;
            } else {
                upper = mid;
            }
        }

        Hct::from(self.hue, self.requested_chroma, f64::from(lower))
    }

    fn max_chroma(&mut self, tone: i32) -> f64 {
        let hue = self.hue;
        *self
            .chroma_cache
            .entry(tone)
            .or_insert_with(|| Hct::from(hue, MAX_CHROMA_VALUE, f64::from(tone)).chroma())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extremes_are_black_and_white() {
        let palette = TonalPalette::from_hue_and_chroma(270.0, 36.0);
        assert_eq!(palette.tone(0.0), Argb::BLACK);
        assert_eq!(palette.tone(100.0), Argb::WHITE);
    }

    #[test]
    fn tones_get_lighter() {
        let palette = TonalPalette::from_hue_and_chroma(25.0, 84.0);
        let lstars: Vec<f64> = [10.0, 30.0, 50.0, 70.0, 90.0]
            .iter()
            .map(|&t| palette.tone(t).lstar())
            .collect();
        assert!(lstars.windows(2).all(|w| w[0] < w[1]), "{lstars:?}");
    }

    #[test]
    fn reachable_key_color_keeps_chroma_near_mid_tone() {
        let key = TonalPalette::from_hue_and_chroma(270.0, 36.0).key_color();
        assert!((key.chroma() - 36.0).abs() < 2.0, "key = {key:?}");
        assert!((30.0..=70.0).contains(&key.tone()), "key = {key:?}");
    }

    #[test]
    fn unreachable_key_color_settles_on_peak() {
        let key = TonalPalette::from_hue_and_chroma(120.0, MAX_CHROMA_VALUE).key_color();
        assert!(key.chroma() > 30.0, "key = {key:?}");
        assert!(key.chroma() < MAX_CHROMA_VALUE);
    }

    #[test]
    fn hct_at_matches_tone() {
        let palette = TonalPalette::from_hue_and_chroma(150.0, 16.0);
        assert_eq!(palette.hct_at(40.0).to_argb(), palette.tone(40.0));
    }
}
