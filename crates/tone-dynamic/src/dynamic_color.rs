//! Dynamic colors: role descriptors that compute their tone on demand.
//!
//! A [`DynamicColor`] doesn't hold a color. It holds rules: which palette to
//! draw from, what tone to start at, which role it sits on and how much
//! contrast it needs against it, and which sibling it must stay apart from.
//! Resolving it against a [`Ctx`] runs those rules through the active
//! spec version and samples the palette at the resulting tone.
//!
//! Rules refer to other roles by [`Role`], never by node, so a background
//! is looked up through the same spec version every time it's needed. The
//! role graph is acyclic and shallow, so resolution simply recurses.

use std::fmt;

use tone_hct::Hct;
use tone_hct::contrast::{darker, darker_unsafe, lighter, lighter_unsafe, ratio_of_tones};
use tracing::trace;

use crate::contrast_curve::ContrastCurve;
use crate::error::Result;
use crate::palettes::Palette;
use crate::role::Role;
use crate::scheme::{Ctx, ResolvedColor};
use crate::tone_delta_pair::ToneDeltaPair;

type ToneFn = Box<dyn Fn(&Ctx<'_>) -> Result<f64> + Send + Sync>;
type RoleFn = Box<dyn Fn(&Ctx<'_>) -> Role + Send + Sync>;
type CurveFn = Box<dyn Fn(&Ctx<'_>) -> Option<ContrastCurve> + Send + Sync>;
type ScalarFn = Box<dyn Fn(&Ctx<'_>) -> f64 + Send + Sync>;

/// Tone used when a role has neither an explicit tone nor a background.
const DEFAULT_TONE: f64 = 50.0;

// ---------------------------------------------------------------------------
// DynamicColor
// ---------------------------------------------------------------------------

/// A role descriptor. Built fresh per lookup, never mutated once built.
pub struct DynamicColor {
    role: Role,
    palette: Palette,
    is_background: bool,
    tone: Option<ToneFn>,
    background: Option<RoleFn>,
    second_background: Option<RoleFn>,
    contrast_curve: Option<CurveFn>,
    tone_delta_pair: Option<ToneDeltaPair>,
    chroma_multiplier: Option<ScalarFn>,
}

impl DynamicColor {
    /// A bare descriptor: no tone rule, no background, no contrast.
    #[must_use]
    pub fn new(role: Role, palette: Palette) -> Self {
        Self {
            role,
            palette,
            is_background: false,
            tone: None,
            background: None,
            second_background: None,
            contrast_curve: None,
            tone_delta_pair: None,
            chroma_multiplier: None,
        }
    }

    // ── Builder ──────────────────────────────────────────────

    #[must_use]
    pub fn with_tone(mut self, tone: impl Fn(&Ctx<'_>) -> f64 + Send + Sync + 'static) -> Self {
        self.tone = Some(Box::new(move |ctx| Ok(tone(ctx))));
        self
    }

    /// A tone rule that itself resolves other roles.
    #[must_use]
    pub fn with_derived_tone(
        mut self,
        tone: impl Fn(&Ctx<'_>) -> Result<f64> + Send + Sync + 'static,
    ) -> Self {
        self.tone = Some(Box::new(tone));
        self
    }

    #[must_use]
    pub fn with_background(self, role: Role) -> Self {
        self.with_background_fn(move |_| role)
    }

    #[must_use]
    pub fn with_background_fn(
        mut self,
        background: impl Fn(&Ctx<'_>) -> Role + Send + Sync + 'static,
    ) -> Self {
        self.background = Some(Box::new(background));
        self
    }

    #[must_use]
    pub fn with_second_background(mut self, role: Role) -> Self {
        self.second_background = Some(Box::new(move |_| role));
        self
    }

    #[must_use]
    pub fn with_contrast_curve(self, curve: ContrastCurve) -> Self {
        self.with_curve_fn(move |_| Some(curve))
    }

    /// A curve that only applies in some contexts.
    #[must_use]
    pub fn with_curve_fn(
        mut self,
        curve: impl Fn(&Ctx<'_>) -> Option<ContrastCurve> + Send + Sync + 'static,
    ) -> Self {
        self.contrast_curve = Some(Box::new(curve));
        self
    }

    #[must_use]
    pub const fn with_tone_delta_pair(mut self, pair: ToneDeltaPair) -> Self {
        self.tone_delta_pair = Some(pair);
        self
    }

    #[must_use]
    pub fn with_chroma_multiplier(
        mut self,
        multiplier: impl Fn(&Ctx<'_>) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.chroma_multiplier = Some(Box::new(multiplier));
        self
    }

    /// Mark as a surface other roles sit on.
    #[must_use]
    pub const fn as_background(mut self) -> Self {
        self.is_background = true;
        self
    }

    /// The same rules under another role's name.
    #[must_use]
    pub const fn aliased(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    // ── Accessors ────────────────────────────────────────────

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.role.name()
    }

    #[must_use]
    pub const fn palette(&self) -> Palette {
        self.palette
    }

    #[must_use]
    pub const fn is_background(&self) -> bool {
        self.is_background
    }

    #[must_use]
    pub const fn tone_delta_pair(&self) -> Option<&ToneDeltaPair> {
        self.tone_delta_pair.as_ref()
    }

    #[must_use]
    pub fn background(&self, ctx: &Ctx<'_>) -> Option<Role> {
        self.background.as_ref().map(|f| f(ctx))
    }

    #[must_use]
    pub fn second_background(&self, ctx: &Ctx<'_>) -> Option<Role> {
        self.second_background.as_ref().map(|f| f(ctx))
    }

    #[must_use]
    pub fn contrast_curve(&self, ctx: &Ctx<'_>) -> Option<ContrastCurve> {
        self.contrast_curve.as_ref().and_then(|f| f(ctx))
    }

    #[must_use]
    pub fn chroma_multiplier(&self, ctx: &Ctx<'_>) -> f64 {
        self.chroma_multiplier.as_ref().map_or(1.0, |f| f(ctx))
    }

    // ── Resolution ───────────────────────────────────────────

    /// The tone before contrast and pairing rules run.
    ///
    /// The explicit tone rule if there is one, otherwise the background's
    /// resolved tone, otherwise 50.
    pub fn base_tone(&self, ctx: &Ctx<'_>) -> Result<f64> {
        if let Some(tone) = &self.tone {
            return Ok(tone(ctx)?.clamp(0.0, 100.0));
        }
        match self.background(ctx) {
            Some(background) => ctx.tone_of(background),
            None => Ok(DEFAULT_TONE),
        }
    }

    /// The final tone under the active spec version, in [0, 100].
    pub fn tone(&self, ctx: &Ctx<'_>) -> Result<f64> {
        Ok(ctx.spec().tone(ctx, self)?.clamp(0.0, 100.0))
    }

    pub fn hct(&self, ctx: &Ctx<'_>) -> Result<Hct> {
        ctx.spec().hct(ctx, self)
    }

    pub fn resolve(&self, ctx: &Ctx<'_>) -> Result<ResolvedColor> {
        let tone = self.tone(ctx)?;
        let hct = ctx.spec().hct_at(ctx, self, tone);
        trace!(role = self.name(), tone, color = %hct.to_argb(), "resolved");
        Ok(ResolvedColor {
            role: self.role,
            name: self.name(),
            hct,
            tone,
        })
    }
}

impl fmt::Debug for DynamicColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicColor")
            .field("role", &self.role)
            .field("palette", &self.palette)
            .field("is_background", &self.is_background)
            .field("has_tone", &self.tone.is_some())
            .field("has_background", &self.background.is_some())
            .field("has_contrast_curve", &self.contrast_curve.is_some())
            .field("tone_delta_pair", &self.tone_delta_pair)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tone helpers shared by the spec versions
// ---------------------------------------------------------------------------

/// Whether text on a background of this tone should be light.
#[must_use]
pub fn tone_prefers_light_foreground(tone: f64) -> bool {
    tone.round() < 60.0
}

/// A tone reaching `ratio` against `bg_tone`, on the side the background
/// prefers. If neither side reaches it, whichever side gets closer.
#[must_use]
pub fn foreground_tone(bg_tone: f64, ratio: f64) -> f64 {
    let lighter_tone = lighter_unsafe(bg_tone, ratio);
    let darker_tone = darker_unsafe(bg_tone, ratio);
    let lighter_ratio = ratio_of_tones(lighter_tone, bg_tone);
    let darker_ratio = ratio_of_tones(darker_tone, bg_tone);

    if tone_prefers_light_foreground(bg_tone) {
        let negligible_difference = (lighter_ratio - darker_ratio).abs() < 0.1
            && lighter_ratio < ratio
            && darker_ratio < ratio;
        if lighter_ratio >= ratio || lighter_ratio >= darker_ratio || negligible_difference {
            lighter_tone
        } else {
            darker_tone
        }
    } else if darker_ratio >= ratio || darker_ratio >= lighter_ratio {
        darker_tone
    } else {
        lighter_tone
    }
}

/// Keep `tone` if it reaches `ratio` against `bg_tone`, else solve for one.
#[must_use]
pub fn meet_contrast(tone: f64, bg_tone: f64, ratio: f64) -> f64 {
    if ratio_of_tones(bg_tone, tone) >= ratio {
        tone
    } else {
        foreground_tone(bg_tone, ratio)
    }
}

/// Adjust `tone` so it reaches `ratio` against two backgrounds at once.
///
/// If that's impossible, light-preferring backgrounds get the lighter
/// option (or white), others the darker option (or black).
#[must_use]
pub fn against_two_backgrounds(tone: f64, bg_tone: f64, second_bg_tone: f64, ratio: f64) -> f64 {
    let upper = bg_tone.max(second_bg_tone);
    let lower = bg_tone.min(second_bg_tone);

    if ratio_of_tones(upper, tone) >= ratio && ratio_of_tones(lower, tone) >= ratio {
        return tone;
    }

    let light_option = lighter(upper, ratio);
    let dark_option = darker(lower, ratio);

    if tone_prefers_light_foreground(bg_tone) || tone_prefers_light_foreground(second_bg_tone) {
        return light_option.unwrap_or(100.0);
    }

    match (light_option, dark_option) {
        (Some(light), None) => light,
        (_, Some(dark)) => dark,
        (None, None) => 0.0,
    }
}
