//! Seed color → the six tonal palettes a scheme draws from.
//!
//! Only the "tonal spot" style is implemented: a calm primary at moderate
//! chroma, a muted secondary on the same hue, a tertiary on a neighbouring
//! hue, near-gray neutrals and a red error palette.

use std::fmt;

use tone_hct::argb::sanitize_degrees;
use tone_hct::{Hct, TonalPalette};

// ---------------------------------------------------------------------------
// Palette slots
// ---------------------------------------------------------------------------

/// Which of a scheme's palettes a role draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    Primary,
    Secondary,
    Tertiary,
    Neutral,
    NeutralVariant,
    Error,
}

impl Palette {
    pub const ALL: [Self; 6] = [
        Self::Primary,
        Self::Secondary,
        Self::Tertiary,
        Self::Neutral,
        Self::NeutralVariant,
        Self::Error,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Neutral => "neutral",
            Self::NeutralVariant => "neutral_variant",
            Self::Error => "error",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One tonal palette per [`Palette`] slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palettes {
    slots: [TonalPalette; 6],
}

impl Palettes {
    #[must_use]
    pub const fn get(&self, palette: Palette) -> &TonalPalette {
        &self.slots[palette.index()]
    }

    pub fn set(&mut self, palette: Palette, tonal: TonalPalette) {
        self.slots[palette.index()] = tonal;
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Derives palettes from a seed color.
///
/// One implementation per spec version. Palettes are generated once, when
/// the scheme is built, for the scheme's own dark flag.
pub trait PaletteGenerator: Send + Sync {
    fn primary(&self, source: &Hct, is_dark: bool) -> TonalPalette;
    fn secondary(&self, source: &Hct, is_dark: bool) -> TonalPalette;
    fn tertiary(&self, source: &Hct, is_dark: bool) -> TonalPalette;
    fn neutral(&self, source: &Hct, is_dark: bool) -> TonalPalette;
    fn neutral_variant(&self, source: &Hct, is_dark: bool) -> TonalPalette;
    fn error(&self, source: &Hct, is_dark: bool) -> TonalPalette;

    /// All six palettes.
    fn generate(&self, source: &Hct, is_dark: bool) -> Palettes {
        Palettes {
            slots: [
                self.primary(source, is_dark),
                self.secondary(source, is_dark),
                self.tertiary(source, is_dark),
                self.neutral(source, is_dark),
                self.neutral_variant(source, is_dark),
                self.error(source, is_dark),
            ],
        }
    }
}

/// Tonal spot palettes under the 2021 rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct TonalSpot2021;

impl PaletteGenerator for TonalSpot2021 {
    fn primary(&self, source: &Hct, _is_dark: bool) -> TonalPalette {
        TonalPalette::from_hue_and_chroma(source.hue(), 36.0)
    }

    fn secondary(&self, source: &Hct, _is_dark: bool) -> TonalPalette {
        TonalPalette::from_hue_and_chroma(source.hue(), 16.0)
    }

    fn tertiary(&self, source: &Hct, _is_dark: bool) -> TonalPalette {
        TonalPalette::from_hue_and_chroma(sanitize_degrees(source.hue() + 60.0), 24.0)
    }

    fn neutral(&self, source: &Hct, _is_dark: bool) -> TonalPalette {
        TonalPalette::from_hue_and_chroma(source.hue(), 6.0)
    }

    fn neutral_variant(&self, source: &Hct, _is_dark: bool) -> TonalPalette {
        TonalPalette::from_hue_and_chroma(source.hue(), 8.0)
    }

    fn error(&self, _source: &Hct, _is_dark: bool) -> TonalPalette {
        TonalPalette::from_hue_and_chroma(25.0, 84.0)
    }
}

/// Tonal spot palettes under the 2025 rules. Secondary is unchanged from 2021.
#[derive(Debug, Clone, Copy, Default)]
pub struct TonalSpot2025;

impl TonalSpot2025 {
    const TERTIARY_HUES: [f64; 6] = [0.0, 20.0, 71.0, 161.0, 333.0, 360.0];
    const TERTIARY_ROTATIONS: [f64; 5] = [-40.0, 48.0, -32.0, 40.0, -32.0];
    const ERROR_HUES: [f64; 9] = [0.0, 3.0, 13.0, 23.0, 33.0, 43.0, 153.0, 273.0, 360.0];
    const ERROR_TARGETS: [f64; 8] = [12.0, 22.0, 32.0, 12.0, 22.0, 32.0, 22.0, 12.0];
}

impl PaletteGenerator for TonalSpot2025 {
    fn primary(&self, source: &Hct, is_dark: bool) -> TonalPalette {
        TonalPalette::from_hue_and_chroma(source.hue(), if is_dark { 26.0 } else { 32.0 })
    }

    fn secondary(&self, source: &Hct, is_dark: bool) -> TonalPalette {
        TonalSpot2021.secondary(source, is_dark)
    }

    fn tertiary(&self, source: &Hct, _is_dark: bool) -> TonalPalette {
        let hue = rotated_hue(source.hue(), &Self::TERTIARY_HUES, &Self::TERTIARY_ROTATIONS);
        TonalPalette::from_hue_and_chroma(hue, 28.0)
    }

    fn neutral(&self, source: &Hct, _is_dark: bool) -> TonalPalette {
        TonalPalette::from_hue_and_chroma(source.hue(), 5.0)
    }

    fn neutral_variant(&self, source: &Hct, _is_dark: bool) -> TonalPalette {
        TonalPalette::from_hue_and_chroma(source.hue(), 8.5)
    }

    fn error(&self, source: &Hct, _is_dark: bool) -> TonalPalette {
        let hue = piecewise_hue(source.hue(), &Self::ERROR_HUES, &Self::ERROR_TARGETS);
        TonalPalette::from_hue_and_chroma(hue, 60.0)
    }
}

// ---------------------------------------------------------------------------
// Hue tables
// ---------------------------------------------------------------------------

/// Look `hue` up in a table of breakpoints: the value for the segment
/// `[breakpoints[i], breakpoints[i + 1])` is `values[i]`. A hue that falls in
/// no segment is returned as is.
#[must_use]
pub fn piecewise_hue(hue: f64, breakpoints: &[f64], values: &[f64]) -> f64 {
    segment_value(hue, breakpoints, values).unwrap_or(hue)
}

/// `hue` rotated by its segment's entry in `rotations`, wrapped to [0, 360).
#[must_use]
pub fn rotated_hue(hue: f64, breakpoints: &[f64], rotations: &[f64]) -> f64 {
    sanitize_degrees(hue + segment_value(hue, breakpoints, rotations).unwrap_or(0.0))
}

fn segment_value(hue: f64, breakpoints: &[f64], values: &[f64]) -> Option<f64> {
    breakpoints
        .windows(2)
        .zip(values)
        .find(|(segment, _)| segment[0] <= hue && hue < segment[1])
        .map(|(_, &value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(hue: f64) -> Hct {
        Hct::from(hue, 50.0, 50.0)
    }

    #[test]
    fn piecewise_picks_segment_value() {
        let hues = TonalSpot2025::ERROR_HUES;
        let targets = TonalSpot2025::ERROR_TARGETS;
        assert!((piecewise_hue(0.0, &hues, &targets) - 12.0).abs() < 1e-12);
        assert!((piecewise_hue(5.0, &hues, &targets) - 22.0).abs() < 1e-12);
        assert!((piecewise_hue(200.0, &hues, &targets) - 22.0).abs() < 1e-12);
        assert!((piecewise_hue(359.9, &hues, &targets) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn piecewise_falls_back_to_input() {
        assert!((piecewise_hue(400.0, &[0.0, 360.0], &[5.0]) - 400.0).abs() < 1e-12);
    }

    #[test]
    fn rotation_wraps() {
        let hues = TonalSpot2025::TERTIARY_HUES;
        let rotations = TonalSpot2025::TERTIARY_ROTATIONS;
        // [0, 20) rotates by -40.
        assert!((rotated_hue(10.0, &hues, &rotations) - 330.0).abs() < 1e-9);
        // [71, 161) rotates by -32.
        assert!((rotated_hue(100.0, &hues, &rotations) - 68.0).abs() < 1e-9);
        // [333, 360) rotates by -32.
        assert!((rotated_hue(350.0, &hues, &rotations) - 318.0).abs() < 1e-9);
    }

    #[test]
    fn tonal_spot_2021_chromas() {
        let palettes = TonalSpot2021.generate(&source(200.0), false);
        let chromas: Vec<f64> = Palette::ALL.iter().map(|&p| palettes.get(p).chroma()).collect();
        assert_eq!(chromas, vec![36.0, 16.0, 24.0, 6.0, 8.0, 84.0]);
        assert!((palettes.get(Palette::Error).hue() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn tonal_spot_2021_tertiary_is_rotated_sixty() {
        let src = source(320.0);
        let tertiary = TonalSpot2021.tertiary(&src, false);
        assert!((tertiary.hue() - sanitize_degrees(src.hue() + 60.0)).abs() < 1e-9);
    }

    #[test]
    fn tonal_spot_2025_primary_depends_on_dark() {
        let src = source(200.0);
        assert!((TonalSpot2025.primary(&src, true).chroma() - 26.0).abs() < 1e-12);
        assert!((TonalSpot2025.primary(&src, false).chroma() - 32.0).abs() < 1e-12);
    }

    #[test]
    fn tonal_spot_2025_reuses_2021_secondary() {
        let src = source(42.0);
        assert_eq!(
            TonalSpot2025.secondary(&src, true),
            TonalSpot2021.secondary(&src, true)
        );
    }

    #[test]
    fn override_slot() {
        let mut palettes = TonalSpot2021.generate(&source(10.0), false);
        let custom = TonalPalette::from_hue_and_chroma(140.0, 20.0);
        palettes.set(Palette::Tertiary, custom);
        assert_eq!(*palettes.get(Palette::Tertiary), custom);
    }
}
