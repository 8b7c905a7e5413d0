//! The 2021 color rules.
//!
//! Tones are fixed per mode and nudged by contrast curves. Pairs are
//! resolved together: both members are first brought up to their own
//! contrast target, then pushed apart until they are `delta` tones apart,
//! and finally moved out of the 50–59 band where neither light nor dark
//! text reads well.

use tone_hct::Hct;
use tone_hct::contrast::ratio_of_tones;

use super::{ColorSpec, SpecVersion, highest_surface};
use crate::contrast_curve::ContrastCurve;
use crate::dynamic_color::{DynamicColor, against_two_backgrounds, foreground_tone, meet_contrast};
use crate::error::Result;
use crate::palettes::Palette;
use crate::role::Role;
use crate::scheme::Ctx;
use crate::tone_delta_pair::{TonePolarity, ToneDeltaPair};

/// Rulebook for the 2021 spec version.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorSpec2021;

impl ColorSpec for ColorSpec2021 {
    fn version(&self) -> SpecVersion {
        SpecVersion::V2021
    }

    fn node(&self, role: Role) -> Option<DynamicColor> {
        let node = match role {
            Role::PrimaryPaletteKeyColor => key_color(role, Palette::Primary),
            Role::SecondaryPaletteKeyColor => key_color(role, Palette::Secondary),
            Role::TertiaryPaletteKeyColor => key_color(role, Palette::Tertiary),
            Role::NeutralPaletteKeyColor => key_color(role, Palette::Neutral),
            Role::NeutralVariantPaletteKeyColor => key_color(role, Palette::NeutralVariant),
            Role::ErrorPaletteKeyColor => key_color(role, Palette::Error),

            Role::Background | Role::Surface => neutral_surface(role, |_| 6.0, |_| 98.0),
            Role::SurfaceDim => neutral_surface(role, |_| 6.0, |level| {
                ContrastCurve::new(87.0, 87.0, 80.0, 75.0).value_at(level)
            }),
            Role::SurfaceBright => neutral_surface(
                role,
                |level| ContrastCurve::new(24.0, 24.0, 29.0, 34.0).value_at(level),
                |_| 98.0,
            ),
            Role::SurfaceContainerLowest => neutral_surface(
                role,
                |level| ContrastCurve::new(4.0, 4.0, 2.0, 0.0).value_at(level),
                |_| 100.0,
            ),
            Role::SurfaceContainerLow => neutral_surface(
                role,
                |level| ContrastCurve::new(10.0, 10.0, 11.0, 12.0).value_at(level),
                |level| ContrastCurve::new(96.0, 96.0, 96.0, 95.0).value_at(level),
            ),
            Role::SurfaceContainer => neutral_surface(
                role,
                |level| ContrastCurve::new(12.0, 12.0, 16.0, 20.0).value_at(level),
                |level| ContrastCurve::new(94.0, 94.0, 92.0, 90.0).value_at(level),
            ),
            Role::SurfaceContainerHigh => neutral_surface(
                role,
                |level| ContrastCurve::new(17.0, 17.0, 21.0, 25.0).value_at(level),
                |level| ContrastCurve::new(92.0, 92.0, 88.0, 85.0).value_at(level),
            ),
            Role::SurfaceContainerHighest => neutral_surface(
                role,
                |level| ContrastCurve::new(22.0, 22.0, 26.0, 30.0).value_at(level),
                |level| ContrastCurve::new(90.0, 90.0, 84.0, 80.0).value_at(level),
            ),

            Role::OnBackground => DynamicColor::new(role, Palette::Neutral)
                .with_tone(|ctx| if ctx.is_dark() { 90.0 } else { 10.0 })
                .with_background(Role::Background)
                .with_contrast_curve(ContrastCurve::new(3.0, 3.0, 4.5, 7.0)),
            Role::OnSurface => DynamicColor::new(role, Palette::Neutral)
                .with_tone(|ctx| if ctx.is_dark() { 90.0 } else { 10.0 })
                .with_background_fn(highest_surface)
                .with_contrast_curve(ContrastCurve::new(4.5, 7.0, 11.0, 21.0)),
            Role::SurfaceVariant => DynamicColor::new(role, Palette::NeutralVariant)
                .as_background()
                .with_tone(|ctx| if ctx.is_dark() { 30.0 } else { 90.0 }),
            Role::OnSurfaceVariant => DynamicColor::new(role, Palette::NeutralVariant)
                .with_tone(|ctx| if ctx.is_dark() { 80.0 } else { 30.0 })
                .with_background_fn(highest_surface)
                .with_contrast_curve(ContrastCurve::new(3.0, 4.5, 7.0, 11.0)),
            Role::InverseSurface => DynamicColor::new(role, Palette::Neutral)
                .with_tone(|ctx| if ctx.is_dark() { 90.0 } else { 20.0 }),
            Role::InverseOnSurface => DynamicColor::new(role, Palette::Neutral)
                .with_tone(|ctx| if ctx.is_dark() { 20.0 } else { 95.0 })
                .with_background(Role::InverseSurface)
                .with_contrast_curve(ContrastCurve::new(4.5, 7.0, 11.0, 21.0)),
            Role::Outline => DynamicColor::new(role, Palette::NeutralVariant)
                .with_tone(|ctx| if ctx.is_dark() { 60.0 } else { 50.0 })
                .with_background_fn(highest_surface)
                .with_contrast_curve(ContrastCurve::new(1.5, 3.0, 4.5, 7.0)),
            Role::OutlineVariant => DynamicColor::new(role, Palette::NeutralVariant)
                .with_tone(|ctx| if ctx.is_dark() { 30.0 } else { 80.0 })
                .with_background_fn(highest_surface)
                .with_contrast_curve(ContrastCurve::new(1.0, 1.0, 3.0, 4.5)),
            Role::Shadow | Role::Scrim => shadow(role),
            Role::SurfaceTint => DynamicColor::new(role, Palette::Primary)
                .as_background()
                .with_tone(|ctx| if ctx.is_dark() { 80.0 } else { 40.0 }),

            Role::Primary => accent(role, Palette::Primary, Role::PrimaryContainer),
            Role::OnPrimary => on_accent(role, Palette::Primary, Role::Primary),
            Role::PrimaryContainer => container(role, Palette::Primary, Role::Primary),
            Role::OnPrimaryContainer => {
                on_container(role, Palette::Primary, Role::PrimaryContainer)
            }
            Role::InversePrimary => DynamicColor::new(role, Palette::Primary)
                .with_tone(|ctx| if ctx.is_dark() { 40.0 } else { 80.0 })
                .with_background(Role::InverseSurface)
                .with_contrast_curve(ContrastCurve::new(3.0, 4.5, 7.0, 7.0)),

            Role::Secondary => accent(role, Palette::Secondary, Role::SecondaryContainer),
            Role::OnSecondary => on_accent(role, Palette::Secondary, Role::Secondary),
            Role::SecondaryContainer => container(role, Palette::Secondary, Role::Secondary),
            Role::OnSecondaryContainer => {
                on_container(role, Palette::Secondary, Role::SecondaryContainer)
            }

            Role::Tertiary => accent(role, Palette::Tertiary, Role::TertiaryContainer),
            Role::OnTertiary => on_accent(role, Palette::Tertiary, Role::Tertiary),
            Role::TertiaryContainer => container(role, Palette::Tertiary, Role::Tertiary),
            Role::OnTertiaryContainer => {
                on_container(role, Palette::Tertiary, Role::TertiaryContainer)
            }

            Role::Error => accent(role, Palette::Error, Role::ErrorContainer),
            Role::OnError => on_accent(role, Palette::Error, Role::Error),
            Role::ErrorContainer => container(role, Palette::Error, Role::Error),
            Role::OnErrorContainer => on_container(role, Palette::Error, Role::ErrorContainer),

            Role::PrimaryFixed => fixed(role, Palette::Primary, Role::PrimaryFixedDim),
            Role::PrimaryFixedDim => fixed_dim(role, Palette::Primary, Role::PrimaryFixed),
            Role::OnPrimaryFixed => {
                on_fixed(role, Palette::Primary, Role::PrimaryFixed, Role::PrimaryFixedDim)
            }
            Role::OnPrimaryFixedVariant => {
                on_fixed_variant(role, Palette::Primary, Role::PrimaryFixed, Role::PrimaryFixedDim)
            }
            Role::SecondaryFixed => fixed(role, Palette::Secondary, Role::SecondaryFixedDim),
            Role::SecondaryFixedDim => fixed_dim(role, Palette::Secondary, Role::SecondaryFixed),
            Role::OnSecondaryFixed => on_fixed(
                role,
                Palette::Secondary,
                Role::SecondaryFixed,
                Role::SecondaryFixedDim,
            ),
            Role::OnSecondaryFixedVariant => on_fixed_variant(
                role,
                Palette::Secondary,
                Role::SecondaryFixed,
                Role::SecondaryFixedDim,
            ),
            Role::TertiaryFixed => fixed(role, Palette::Tertiary, Role::TertiaryFixedDim),
            Role::TertiaryFixedDim => fixed_dim(role, Palette::Tertiary, Role::TertiaryFixed),
            Role::OnTertiaryFixed => on_fixed(
                role,
                Palette::Tertiary,
                Role::TertiaryFixed,
                Role::TertiaryFixedDim,
            ),
            Role::OnTertiaryFixedVariant => on_fixed_variant(
                role,
                Palette::Tertiary,
                Role::TertiaryFixed,
                Role::TertiaryFixedDim,
            ),

            Role::PrimaryDim | Role::SecondaryDim | Role::TertiaryDim | Role::ErrorDim => {
                return None;
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

    /// 2021 roles sample their palette as is.
    fn hct_at(&self, ctx: &Ctx<'_>, color: &DynamicColor, tone: f64) -> Hct {
        ctx.palette(color.palette()).hct_at(tone)
    }
}

// ---------------------------------------------------------------------------
// Node constructors
// ---------------------------------------------------------------------------
//
// Shared with the 2025 rules for the roles that didn't change.

/// A palette's key color at its own tone.
#[must_use]
pub fn key_color(role: Role, palette: Palette) -> DynamicColor {
    DynamicColor::new(role, palette).with_tone(move |ctx| ctx.palette(palette).key_color().tone())
}

/// Pure black on the neutral palette.
#[must_use]
pub fn shadow(role: Role) -> DynamicColor {
    DynamicColor::new(role, Palette::Neutral).with_tone(|_| 0.0)
}

fn neutral_surface(role: Role, dark: fn(f64) -> f64, light: fn(f64) -> f64) -> DynamicColor {
    DynamicColor::new(role, Palette::Neutral)
        .as_background()
        .with_tone(move |ctx| {
            let level = ctx.contrast_level();
            if ctx.is_dark() { dark(level) } else { light(level) }
        })
}

fn accent(role: Role, palette: Palette, container: Role) -> DynamicColor {
    DynamicColor::new(role, palette)
        .as_background()
        .with_tone(|ctx| if ctx.is_dark() { 80.0 } else { 40.0 })
        .with_background_fn(highest_surface)
        .with_contrast_curve(ContrastCurve::new(3.0, 4.5, 7.0, 7.0))
        .with_tone_delta_pair(ToneDeltaPair::new(
            container,
            role,
            10.0,
            TonePolarity::Nearer,
            false,
        ))
}

fn on_accent(role: Role, palette: Palette, accent: Role) -> DynamicColor {
    DynamicColor::new(role, palette)
        .with_tone(|ctx| if ctx.is_dark() { 20.0 } else { 100.0 })
        .with_background(accent)
        .with_contrast_curve(ContrastCurve::new(4.5, 7.0, 11.0, 21.0))
}

fn container(role: Role, palette: Palette, accent: Role) -> DynamicColor {
    DynamicColor::new(role, palette)
        .as_background()
        .with_tone(|ctx| if ctx.is_dark() { 30.0 } else { 90.0 })
        .with_background_fn(highest_surface)
        .with_contrast_curve(ContrastCurve::new(1.0, 1.0, 3.0, 4.5))
        .with_tone_delta_pair(ToneDeltaPair::new(
            role,
            accent,
            10.0,
            TonePolarity::Nearer,
            false,
        ))
}

fn on_container(role: Role, palette: Palette, container: Role) -> DynamicColor {
    DynamicColor::new(role, palette)
        .with_tone(|ctx| if ctx.is_dark() { 90.0 } else { 30.0 })
        .with_background(container)
        .with_contrast_curve(ContrastCurve::new(3.0, 4.5, 7.0, 11.0))
}

fn fixed(role: Role, palette: Palette, dim: Role) -> DynamicColor {
    DynamicColor::new(role, palette)
        .as_background()
        .with_tone(|_| 90.0)
        .with_background_fn(highest_surface)
        .with_contrast_curve(ContrastCurve::new(1.0, 1.0, 3.0, 4.5))
        .with_tone_delta_pair(ToneDeltaPair::new(
            role,
            dim,
            10.0,
            TonePolarity::Lighter,
            true,
        ))
}

fn fixed_dim(role: Role, palette: Palette, fixed: Role) -> DynamicColor {
    DynamicColor::new(role, palette)
        .as_background()
        .with_tone(|_| 80.0)
        .with_background_fn(highest_surface)
        .with_contrast_curve(ContrastCurve::new(1.0, 1.0, 3.0, 4.5))
        .with_tone_delta_pair(ToneDeltaPair::new(
            fixed,
            role,
            10.0,
            TonePolarity::Lighter,
            true,
        ))
}

fn on_fixed(role: Role, palette: Palette, fixed: Role, dim: Role) -> DynamicColor {
    DynamicColor::new(role, palette)
        .with_tone(|_| 10.0)
        .with_background(dim)
        .with_second_background(fixed)
        .with_contrast_curve(ContrastCurve::new(4.5, 7.0, 11.0, 21.0))
}

fn on_fixed_variant(role: Role, palette: Palette, fixed: Role, dim: Role) -> DynamicColor {
    DynamicColor::new(role, palette)
        .with_tone(|_| 30.0)
        .with_background(dim)
        .with_second_background(fixed)
        .with_contrast_curve(ContrastCurve::new(3.0, 4.5, 7.0, 11.0))
}

// ---------------------------------------------------------------------------
// Tone resolution
// ---------------------------------------------------------------------------

fn single_tone(ctx: &Ctx<'_>, color: &DynamicColor) -> Result<f64> {
    let tone = color.base_tone(ctx)?;
    let (Some(background), Some(curve)) = (color.background(ctx), color.contrast_curve(ctx))
    else {
        return Ok(tone);
    };

    let bg_tone = ctx.tone_of(background)?;
    let ratio = curve.value_at(ctx.contrast_level());

    let mut answer = if ctx.contrast_level() < 0.0 {
        foreground_tone(bg_tone, ratio)
    } else {
        meet_contrast(tone, bg_tone, ratio)
    };

    if color.is_background() && (50.0..60.0).contains(&answer) {
        answer = if ratio_of_tones(49.0, bg_tone) >= ratio { 49.0 } else { 60.0 };
    }

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
    let Some(background) = color.background(ctx) else {
        return single_tone(ctx, color);
    };
    let bg_tone = ctx.tone_of(background)?;
    let is_dark = ctx.is_dark();
    let level = ctx.contrast_level();

    let a_is_nearer = match pair.polarity {
        TonePolarity::Nearer | TonePolarity::RelativeLighter => true,
        TonePolarity::Lighter => !is_dark,
        TonePolarity::Darker => is_dark,
        TonePolarity::Farther | TonePolarity::RelativeDarker => false,
    };
    let (nearer_role, farther_role) = if a_is_nearer {
        (pair.role_a, pair.role_b)
    } else {
        (pair.role_b, pair.role_a)
    };
    let nearer = ctx.node(nearer_role)?;
    let farther = ctx.node(farther_role)?;
    let am_nearer = color.role() == nearer_role;
    let delta = pair.delta;
    let direction = if is_dark { 1.0 } else { -1.0 };

    let n_ratio = nearer.contrast_curve(ctx).map_or(1.0, |c| c.value_at(level));
    let f_ratio = farther.contrast_curve(ctx).map_or(1.0, |c| c.value_at(level));

    // Each member on its own.
    let (mut n_tone, mut f_tone) = if level < 0.0 {
        (foreground_tone(bg_tone, n_ratio), foreground_tone(bg_tone, f_ratio))
    } else {
        (
            meet_contrast(nearer.base_tone(ctx)?, bg_tone, n_ratio),
            meet_contrast(farther.base_tone(ctx)?, bg_tone, f_ratio),
        )
    };

    // Expand the farther one, then contract the nearer one if that wasn't
    // enough.
    if (f_tone - n_tone) * direction < delta {
        f_tone = delta.mul_add(direction, n_tone).clamp(0.0, 100.0);
        if (f_tone - n_tone) * direction < delta {
            n_tone = (-delta).mul_add(direction, f_tone).clamp(0.0, 100.0);
        }
    }

    // Neither light nor dark text reads well on 50-59.
    let move_both = |n_tone: &mut f64, f_tone: &mut f64| {
        if direction > 0.0 {
            *n_tone = 60.0;
            *f_tone = f_tone.max(delta.mul_add(direction, *n_tone));
        } else {
            *n_tone = 49.0;
            *f_tone = f_tone.min(delta.mul_add(direction, *n_tone));
        }
    };
    if (50.0..60.0).contains(&n_tone) {
        move_both(&mut n_tone, &mut f_tone);
    } else if (50.0..60.0).contains(&f_tone) {
        if pair.stay_together {
            move_both(&mut n_tone, &mut f_tone);
        } else {
            f_tone = if direction > 0.0 { 60.0 } else { 49.0 };
        }
    }

    Ok(if am_nearer { n_tone } else { f_tone })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::DynamicScheme;
    use tone_hct::Argb;

    fn scheme(source: impl Into<Hct>, dark: bool, level: f64) -> DynamicScheme {
        DynamicScheme::builder(source)
            .dark(dark)
            .contrast_level(level)
            .spec_version(SpecVersion::V2021)
            .build()
            .unwrap()
    }

    fn tone(scheme: &DynamicScheme, role: Role) -> f64 {
        scheme.resolve(role).unwrap().tone
    }

    #[test]
    fn reference_light_scheme() {
        let scheme = scheme(Hct::from(0.0, 50.0, 50.0), false, 0.0);
        assert!((tone(&scheme, Role::Primary) - 40.0).abs() < 1e-9);
        assert!((tone(&scheme, Role::SurfaceContainerLowest) - 100.0).abs() < 1e-9);
        assert!((tone(&scheme, Role::Surface) - 98.0).abs() < 1e-9);
    }

    #[test]
    fn dark_surfaces() {
        let scheme = scheme(Argb(0xff67_50a4), true, 0.0);
        assert!((tone(&scheme, Role::Surface) - 6.0).abs() < 1e-9);
        assert!((tone(&scheme, Role::SurfaceBright) - 24.0).abs() < 1e-9);
        assert!((tone(&scheme, Role::SurfaceContainerLowest) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn surfaces_follow_contrast_level() {
        let high = scheme(Argb(0xff67_50a4), false, 1.0);
        assert!((tone(&high, Role::SurfaceDim) - 75.0).abs() < 1e-9);
        assert!((tone(&high, Role::SurfaceContainerHighest) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn on_primary_contrasts_with_primary() {
        for dark in [false, true] {
            let scheme = scheme(Argb(0xff67_50a4), dark, 0.0);
            let on_primary = tone(&scheme, Role::OnPrimary);
            let ratio = ratio_of_tones(on_primary, tone(&scheme, Role::Primary));
            // White on tone 40 tops out around 6.5:1.
            assert!(ratio >= 4.5, "dark={dark} ratio={ratio}");
            if !dark {
                assert!((on_primary - 100.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn container_and_accent_keep_their_distance() {
        for dark in [false, true] {
            for level in [-1.0, 0.0, 0.5, 1.0] {
                let scheme = scheme(Argb(0xff67_50a4), dark, level);
                let accent = tone(&scheme, Role::Primary);
                let container = tone(&scheme, Role::PrimaryContainer);
                assert!(
                    (accent - container).abs() >= 10.0 - 1e-9,
                    "dark={dark} level={level}: {accent} vs {container}"
                );
            }
        }
    }

    #[test]
    fn fixed_is_lighter_than_fixed_dim() {
        let scheme = scheme(Argb(0xff67_50a4), true, 0.0);
        let fixed = tone(&scheme, Role::PrimaryFixed);
        let dim = tone(&scheme, Role::PrimaryFixedDim);
        assert!(fixed - dim >= 10.0 - 1e-9, "{fixed} vs {dim}");
    }

    #[test]
    fn on_fixed_reads_on_both_backgrounds() {
        let scheme = scheme(Argb(0xff67_50a4), false, 0.0);
        let on_fixed = tone(&scheme, Role::OnPrimaryFixed);
        for background in [Role::PrimaryFixed, Role::PrimaryFixedDim] {
            let ratio = ratio_of_tones(on_fixed, tone(&scheme, background));
            assert!(ratio >= 7.0 - 0.05, "{background}: {ratio}");
        }
    }

    #[test]
    fn key_colors_use_palette_key_tone() {
        let scheme = scheme(Argb(0xff67_50a4), false, 0.0);
        let key = scheme.palette(Palette::Primary).key_color();
        assert!((tone(&scheme, Role::PrimaryPaletteKeyColor) - key.tone()).abs() < 1e-9);
    }

    #[test]
    fn dim_roles_are_missing() {
        for role in [Role::PrimaryDim, Role::SecondaryDim, Role::TertiaryDim, Role::ErrorDim] {
            assert!(ColorSpec2021.node(role).is_none());
        }
    }
}
