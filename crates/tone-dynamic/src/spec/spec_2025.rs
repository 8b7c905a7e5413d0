//! The 2025 color rules.
//!
//! Accents chase the most colorful tone their palette offers instead of a
//! fixed tone, neutral surfaces and content pick up extra chroma, and every
//! accent gains a "dim" sibling. Pairs no longer solve both members
//! together: each member is placed relative to its partner's final tone.
//!
//! Roles whose rules didn't change (key colors, shadow, scrim) reuse the
//! 2021 constructors.

use tone_hct::contrast::ratio_of_tones;
use tone_hct::hct::is_yellow;

use super::spec_2021::{key_color, shadow};
use super::{ColorSpec, SpecVersion, highest_surface};
use crate::chroma_search::{tone_max_chroma, tone_min_chroma};
use crate::contrast_curve::ContrastCurve;
use crate::dynamic_color::{DynamicColor, against_two_backgrounds, foreground_tone};
use crate::error::Result;
use crate::palettes::Palette;
use crate::role::Role;
use crate::scheme::Ctx;
use crate::tone_delta_pair::{DeltaConstraint, TonePolarity, ToneDeltaPair};

type ToneRule = fn(&Ctx<'_>) -> f64;

/// Rulebook for the 2025 spec version.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorSpec2025;

impl ColorSpec for ColorSpec2025 {
    fn version(&self) -> SpecVersion {
        SpecVersion::V2025
    }

    #[allow(clippy::too_many_lines)]
    fn node(&self, role: Role) -> Option<DynamicColor> {
        let node = match role {
            Role::PrimaryPaletteKeyColor => key_color(role, Palette::Primary),
            Role::SecondaryPaletteKeyColor => key_color(role, Palette::Secondary),
            Role::TertiaryPaletteKeyColor => key_color(role, Palette::Tertiary),
            Role::NeutralPaletteKeyColor => key_color(role, Palette::Neutral),
            Role::NeutralVariantPaletteKeyColor => key_color(role, Palette::NeutralVariant),
            Role::ErrorPaletteKeyColor => key_color(role, Palette::Error),

            // ── Surfaces ─────────────────────────────────────
            Role::Surface => surface(role, |ctx| {
                if ctx.is_dark() {
                    4.0
                } else if yellow(ctx) {
                    99.0
                } else {
                    98.0
                }
            }),
            Role::SurfaceDim => surface(role, |ctx| {
                if ctx.is_dark() {
                    4.0
                } else if yellow(ctx) {
                    90.0
                } else {
                    87.0
                }
            })
            .with_chroma_multiplier(|ctx| if ctx.is_dark() { 1.0 } else { 1.7 }),
            Role::SurfaceBright => surface(role, |ctx| {
                if ctx.is_dark() {
                    18.0
                } else if yellow(ctx) {
                    99.0
                } else {
                    98.0
                }
            })
            .with_chroma_multiplier(|ctx| if ctx.is_dark() { 1.7 } else { 1.0 }),
            Role::SurfaceContainerLowest => {
                surface(role, |ctx| if ctx.is_dark() { 0.0 } else { 100.0 })
            }
            Role::SurfaceContainerLow => surface(role, |ctx| {
                if ctx.is_dark() {
                    6.0
                } else if yellow(ctx) {
                    98.0
                } else {
                    96.0
                }
            })
            .with_chroma_multiplier(|_| 1.25),
            Role::SurfaceContainer => surface(role, |ctx| {
                if ctx.is_dark() {
                    9.0
                } else if yellow(ctx) {
                    96.0
                } else {
                    94.0
                }
            })
            .with_chroma_multiplier(|_| 1.4),
            Role::SurfaceContainerHigh => surface(role, |ctx| {
                if ctx.is_dark() {
                    12.0
                } else if yellow(ctx) {
                    94.0
                } else {
                    92.0
                }
            })
            .with_chroma_multiplier(|_| 1.5),
            Role::SurfaceContainerHighest => surface(role, |ctx| {
                if ctx.is_dark() {
                    15.0
                } else if yellow(ctx) {
                    92.0
                } else {
                    90.0
                }
            })
            .with_chroma_multiplier(|_| 1.7),

            Role::OnSurface => DynamicColor::new(role, Palette::Neutral)
                .with_background_fn(highest_surface)
                .with_chroma_multiplier(|_| 1.7)
                .with_curve_fn(|ctx| Some(curve(if ctx.is_dark() { 11.0 } else { 9.0 }))),
            Role::OnSurfaceVariant => DynamicColor::new(role, Palette::NeutralVariant)
                .with_background_fn(highest_surface)
                .with_chroma_multiplier(|_| 1.7)
                .with_curve_fn(|ctx| Some(curve(if ctx.is_dark() { 6.0 } else { 4.5 }))),
            Role::InverseSurface => DynamicColor::new(role, Palette::Neutral)
                .as_background()
                .with_tone(|ctx| if ctx.is_dark() { 98.0 } else { 4.0 }),
            Role::InverseOnSurface => DynamicColor::new(role, Palette::Neutral)
                .with_background(Role::InverseSurface)
                .with_contrast_curve(curve(7.0)),
            Role::Outline => DynamicColor::new(role, Palette::NeutralVariant)
                .with_background_fn(highest_surface)
                .with_chroma_multiplier(|_| 1.7)
                .with_contrast_curve(curve(3.0)),
            Role::OutlineVariant => DynamicColor::new(role, Palette::NeutralVariant)
                .with_background_fn(highest_surface)
                .with_chroma_multiplier(|_| 1.7)
                .with_contrast_curve(curve(1.5)),
            Role::Shadow | Role::Scrim => shadow(role),

            // ── Legacy names ─────────────────────────────────
            Role::SurfaceVariant => self.node(Role::SurfaceContainerHighest)?.aliased(role),
            Role::SurfaceTint => self.node(Role::Primary)?.aliased(role),
            Role::Background => self.node(Role::Surface)?.aliased(role),
            Role::OnBackground => self.node(Role::OnSurface)?.aliased(role),

            // ── Primary ──────────────────────────────────────
            Role::Primary => accent(role, Palette::Primary, Role::PrimaryContainer, |ctx| {
                if ctx.is_dark() { 80.0 } else { max_chroma(ctx, Palette::Primary, 100.0) }
            }),
            Role::PrimaryDim => dim(role, Palette::Primary, Role::Primary, |ctx| {
                max_chroma(ctx, Palette::Primary, 90.0)
            }),
            Role::OnPrimary => on_accent(role, Palette::Primary, Role::Primary),
            Role::PrimaryContainer => container(role, Palette::Primary, |ctx| {
                let palette = ctx.palette(Palette::Primary);
                if ctx.is_dark() {
                    tone_min_chroma(palette, 35.0, 93.0)
                } else {
                    tone_max_chroma(palette, 0.0, 90.0, 1.0)
                }
            }),
            Role::OnPrimaryContainer => {
                on_container(role, Palette::Primary, Role::PrimaryContainer, 6.0)
            }
            Role::InversePrimary => DynamicColor::new(role, Palette::Primary)
                .with_tone(|ctx| max_chroma(ctx, Palette::Primary, 100.0))
                .with_background(Role::InverseSurface)
                .with_contrast_curve(curve(6.0)),

            // ── Secondary ────────────────────────────────────
            Role::Secondary => accent(role, Palette::Secondary, Role::SecondaryContainer, |ctx| {
                if ctx.is_dark() { 80.0 } else { max_chroma(ctx, Palette::Secondary, 100.0) }
            }),
            Role::SecondaryDim => dim(role, Palette::Secondary, Role::Secondary, |ctx| {
                max_chroma(ctx, Palette::Secondary, 90.0)
            }),
            Role::OnSecondary => on_accent(role, Palette::Secondary, Role::Secondary),
            Role::SecondaryContainer => container(role, Palette::Secondary, |ctx| {
                if ctx.is_dark() { 25.0 } else { 90.0 }
            }),
            Role::OnSecondaryContainer => {
                on_container(role, Palette::Secondary, Role::SecondaryContainer, 6.0)
            }

            // ── Tertiary ─────────────────────────────────────
            Role::Tertiary => accent(role, Palette::Tertiary, Role::TertiaryContainer, |ctx| {
                let upper = if ctx.is_dark() { 98.0 } else { 100.0 };
                max_chroma(ctx, Palette::Tertiary, upper)
            }),
            Role::TertiaryDim => dim(role, Palette::Tertiary, Role::Tertiary, |ctx| {
                max_chroma(ctx, Palette::Tertiary, 90.0)
            }),
            Role::OnTertiary => on_accent(role, Palette::Tertiary, Role::Tertiary),
            Role::TertiaryContainer => container(role, Palette::Tertiary, |ctx| {
                let upper = if ctx.is_dark() { 93.0 } else { 100.0 };
                max_chroma(ctx, Palette::Tertiary, upper)
            }),
            Role::OnTertiaryContainer => {
                on_container(role, Palette::Tertiary, Role::TertiaryContainer, 6.0)
            }

            // ── Error ────────────────────────────────────────
            Role::Error => accent(role, Palette::Error, Role::ErrorContainer, |ctx| {
                let palette = ctx.palette(Palette::Error);
                if ctx.is_dark() {
                    tone_min_chroma(palette, 0.0, 98.0)
                } else {
                    tone_max_chroma(palette, 0.0, 100.0, 1.0)
                }
            }),
            Role::ErrorDim => dim(role, Palette::Error, Role::Error, |ctx| {
                tone_min_chroma(ctx.palette(Palette::Error), 0.0, 100.0)
            }),
            Role::OnError => on_accent(role, Palette::Error, Role::Error),
            Role::ErrorContainer => container(role, Palette::Error, |ctx| {
                let palette = ctx.palette(Palette::Error);
                if ctx.is_dark() {
                    tone_min_chroma(palette, 30.0, 93.0)
                } else {
                    tone_max_chroma(palette, 0.0, 90.0, 1.0)
                }
            }),
            Role::OnErrorContainer => on_container(role, Palette::Error, Role::ErrorContainer, 4.5),

            // ── Fixed ────────────────────────────────────────
            Role::PrimaryFixed => fixed(role, Palette::Primary, Role::PrimaryContainer),
            Role::PrimaryFixedDim => fixed_dim(role, Palette::Primary, Role::PrimaryFixed),
            Role::OnPrimaryFixed => on_fixed(role, Palette::Primary, Role::PrimaryFixedDim, 7.0),
            Role::OnPrimaryFixedVariant => {
                on_fixed(role, Palette::Primary, Role::PrimaryFixedDim, 4.5)
            }
            Role::SecondaryFixed => fixed(role, Palette::Secondary, Role::SecondaryContainer),
            Role::SecondaryFixedDim => fixed_dim(role, Palette::Secondary, Role::SecondaryFixed),
            Role::OnSecondaryFixed => {
                on_fixed(role, Palette::Secondary, Role::SecondaryFixedDim, 7.0)
            }
            Role::OnSecondaryFixedVariant => {
                on_fixed(role, Palette::Secondary, Role::SecondaryFixedDim, 4.5)
            }
            Role::TertiaryFixed => fixed(role, Palette::Tertiary, Role::TertiaryContainer),
            Role::TertiaryFixedDim => fixed_dim(role, Palette::Tertiary, Role::TertiaryFixed),
            Role::OnTertiaryFixed => on_fixed(role, Palette::Tertiary, Role::TertiaryFixedDim, 7.0),
            Role::OnTertiaryFixedVariant => {
                on_fixed(role, Palette::Tertiary, Role::TertiaryFixedDim, 4.5)
            }
        };
        Some(node)
    }

    fn tone(&self, ctx: &Ctx<'_>, color: &DynamicColor) -> Result<f64> {
        match color.tone_delta_pair() {
            Some(pair) => pair_tone(ctx, color, pair),
            None => single_tone(ctx, color),
        }
    }
}

// ---------------------------------------------------------------------------
// Contrast curves
// ---------------------------------------------------------------------------

/// The standard curve whose normal-contrast ratio is `normal`.
#[must_use]
pub fn curve(normal: f64) -> ContrastCurve {
    const TABLE: [(f64, ContrastCurve); 8] = [
        (1.5, ContrastCurve::new(1.5, 1.5, 3.0, 4.5)),
        (3.0, ContrastCurve::new(3.0, 3.0, 4.5, 7.0)),
        (4.5, ContrastCurve::new(4.5, 4.5, 7.0, 11.0)),
        (6.0, ContrastCurve::new(6.0, 6.0, 7.0, 11.0)),
        (7.0, ContrastCurve::new(7.0, 7.0, 11.0, 21.0)),
        (9.0, ContrastCurve::new(9.0, 9.0, 11.0, 21.0)),
        (11.0, ContrastCurve::new(11.0, 11.0, 21.0, 21.0)),
        (21.0, ContrastCurve::new(21.0, 21.0, 21.0, 21.0)),
    ];
    TABLE
        .iter()
        .find(|(key, _)| (key - normal).abs() < f64::EPSILON)
        .map_or_else(
            || ContrastCurve::new(normal, normal, 7.0, 21.0),
            |&(_, found)| found,
        )
}

// ---------------------------------------------------------------------------
// Node constructors
// ---------------------------------------------------------------------------

fn yellow(ctx: &Ctx<'_>) -> bool {
    is_yellow(ctx.palette(Palette::Neutral).hue())
}

fn max_chroma(ctx: &Ctx<'_>, palette: Palette, upper: f64) -> f64 {
    tone_max_chroma(ctx.palette(palette), 0.0, upper, 1.0)
}

fn surface(role: Role, tone: ToneRule) -> DynamicColor {
    DynamicColor::new(role, Palette::Neutral)
        .as_background()
        .with_tone(tone)
}

/// Curve that only exists above standard contrast.
fn above_standard(ctx: &Ctx<'_>) -> Option<ContrastCurve> {
    (ctx.contrast_level() > 0.0).then(|| curve(1.5))
}

fn accent(role: Role, palette: Palette, container: Role, tone: ToneRule) -> DynamicColor {
    DynamicColor::new(role, palette)
        .as_background()
        .with_tone(tone)
        .with_background_fn(highest_surface)
        .with_contrast_curve(curve(4.5))
        .with_tone_delta_pair(
            ToneDeltaPair::new(container, role, 5.0, TonePolarity::RelativeLighter, true)
                .with_constraint(DeltaConstraint::Farther),
        )
}

fn dim(role: Role, palette: Palette, accent: Role, tone: ToneRule) -> DynamicColor {
    DynamicColor::new(role, palette)
        .as_background()
        .with_tone(tone)
        .with_background(Role::SurfaceContainerHigh)
        .with_contrast_curve(curve(4.5))
        .with_tone_delta_pair(
            ToneDeltaPair::new(role, accent, 5.0, TonePolarity::Darker, true)
                .with_constraint(DeltaConstraint::Farther),
        )
}

fn on_accent(role: Role, palette: Palette, accent: Role) -> DynamicColor {
    DynamicColor::new(role, palette)
        .with_background(accent)
        .with_contrast_curve(curve(6.0))
}

fn container(role: Role, palette: Palette, tone: ToneRule) -> DynamicColor {
    DynamicColor::new(role, palette)
        .as_background()
        .with_tone(tone)
        .with_background_fn(highest_surface)
        .with_curve_fn(above_standard)
}

fn on_container(role: Role, palette: Palette, container: Role, normal: f64) -> DynamicColor {
    DynamicColor::new(role, palette)
        .with_background(container)
        .with_contrast_curve(curve(normal))
}

/// Fixed roles look the same in both modes: the light-mode container at
/// standard contrast.
fn fixed(role: Role, palette: Palette, container: Role) -> DynamicColor {
    DynamicColor::new(role, palette)
        .as_background()
        .with_derived_tone(move |ctx| ctx.with_overrides(false, 0.0).tone_of(container))
        .with_background_fn(highest_surface)
        .with_curve_fn(above_standard)
}

fn fixed_dim(role: Role, palette: Palette, fixed: Role) -> DynamicColor {
    DynamicColor::new(role, palette)
        .as_background()
        .with_derived_tone(move |ctx| ctx.tone_of(fixed))
        .with_tone_delta_pair(ToneDeltaPair::new(
            role,
            fixed,
            5.0,
            TonePolarity::Darker,
            true,
        ))
}

fn on_fixed(role: Role, palette: Palette, fixed_dim: Role, normal: f64) -> DynamicColor {
    DynamicColor::new(role, palette)
        .with_background(fixed_dim)
        .with_contrast_curve(curve(normal))
}

// ---------------------------------------------------------------------------
// Tone resolution
// ---------------------------------------------------------------------------

/// Keep `tone` if it reaches `ratio` at non-negative contrast, else solve.
fn meet_contrast_2025(ctx: &Ctx<'_>, tone: f64, bg_tone: f64, ratio: f64) -> f64 {
    if ratio_of_tones(bg_tone, tone) >= ratio && ctx.contrast_level() >= 0.0 {
        tone
    } else {
        foreground_tone(bg_tone, ratio)
    }
}

/// Backgrounds stay out of 50–64: light ones go to 65+, dark ones to 49-.
fn avoid_awkward_tones(color: &DynamicColor, tone: f64) -> f64 {
    if !color.is_background() || color.role().is_fixed_dim() {
        tone
    } else if tone >= 57.0 {
        tone.clamp(65.0, 100.0)
    } else {
        tone.clamp(0.0, 49.0)
    }
}

fn single_tone(ctx: &Ctx<'_>, color: &DynamicColor) -> Result<f64> {
    let tone = color.base_tone(ctx)?;
    let (Some(background), Some(curve)) = (color.background(ctx), color.contrast_curve(ctx))
    else {
        return Ok(tone);
    };

    let bg_tone = ctx.tone_of(background)?;
    let ratio = curve.value_at(ctx.contrast_level());
    let answer = avoid_awkward_tones(color, meet_contrast_2025(ctx, tone, bg_tone, ratio));

    match color.second_background(ctx) {
        Some(second) => Ok(against_two_backgrounds(
            answer,
            bg_tone,
            ctx.tone_of(second)?,
            ratio,
        )),
        None => Ok(answer),
    }
}

fn pair_tone(ctx: &Ctx<'_>, color: &DynamicColor, pair: &ToneDeltaPair) -> Result<f64> {
    let is_dark = ctx.is_dark();
    let absolute_delta = match pair.polarity {
        TonePolarity::Darker => -pair.delta,
        TonePolarity::RelativeLighter if is_dark => -pair.delta,
        TonePolarity::RelativeDarker if !is_dark => -pair.delta,
        _ => pair.delta,
    };

    let am_role_a = color.role() == pair.role_a;
    let reference = pair.partner_of(color.role());
    let relative_delta = if am_role_a { absolute_delta } else { -absolute_delta };

    // Contrast and the awkward-tone remap move the member first; the pair
    // placement runs last so nothing can pull the two back together.
    let mut self_tone = color.base_tone(ctx)?;
    if let (Some(background), Some(curve)) = (color.background(ctx), color.contrast_curve(ctx)) {
        let bg_tone = ctx.tone_of(background)?;
        let ratio = curve.value_at(ctx.contrast_level());
        self_tone = meet_contrast_2025(ctx, self_tone, bg_tone, ratio);
    }
    let self_tone = avoid_awkward_tones(color, self_tone);

    let ref_tone = ctx.tone_of(reference)?;
    let target = ref_tone + relative_delta;

    Ok(match pair.constraint {
        DeltaConstraint::Exact => target.clamp(0.0, 100.0),
        DeltaConstraint::Nearer if relative_delta > 0.0 => {
            self_tone.clamp(ref_tone, target).clamp(0.0, 100.0)
        }
        DeltaConstraint::Nearer => self_tone.clamp(target, ref_tone).clamp(0.0, 100.0),
        DeltaConstraint::Farther if relative_delta > 0.0 => {
            self_tone.clamp(target.min(100.0), 100.0)
        }
        DeltaConstraint::Farther => self_tone.clamp(0.0, target.max(0.0)),
    })
}
