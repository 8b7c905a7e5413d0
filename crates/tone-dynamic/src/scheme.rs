//! Dynamic schemes: a seed, a mode and a contrast level, frozen together.
//!
//! A [`DynamicScheme`] owns the six palettes generated from its seed and
//! knows which spec version governs it. It stores no resolved colors: every
//! [`DynamicScheme::resolve`] call looks the role up and runs its rules.
//!
//! Rules evaluate against a [`Ctx`], a borrowed view of the scheme whose dark
//! flag and contrast level can be overridden. That is how a role asks "what
//! would this other role be in light mode at standard contrast?" without
//! building a second scheme.

use tone_hct::{Argb, Hct, TonalPalette};
use tracing::debug;

use crate::dynamic_color::DynamicColor;
use crate::error::{Result, SchemeError};
use crate::palettes::{Palette, Palettes};
use crate::role::Role;
use crate::spec::{ColorSpec, SpecVersion};

// ---------------------------------------------------------------------------
// ResolvedColor
// ---------------------------------------------------------------------------

/// A role's final color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedColor {
    pub role: Role,
    pub name: &'static str,
    /// The sampled color. Its measured tone can differ slightly from `tone`
    /// after rounding to 8-bit channels.
    pub hct: Hct,
    /// The tone the rules solved for, in [0, 100].
    pub tone: f64,
}

impl ResolvedColor {
    #[must_use]
    pub const fn argb(&self) -> Argb {
        self.hct.to_argb()
    }
}

// ---------------------------------------------------------------------------
// DynamicScheme
// ---------------------------------------------------------------------------

/// An immutable theme description that resolves roles on demand.
///
/// # Examples
///
/// ```
/// use tone_dynamic::{DynamicScheme, Role, SpecVersion};
/// use tone_hct::Argb;
///
/// let scheme = DynamicScheme::builder(Argb(0xff67_50a4))
///     .dark(true)
///     .spec_version(SpecVersion::V2025)
///     .build()
///     .unwrap();
/// let surface = scheme.resolve(Role::Surface).unwrap();
/// assert_eq!(surface.tone, 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicScheme {
    source: Hct,
    is_dark: bool,
    contrast_level: f64,
    version: SpecVersion,
    palettes: Palettes,
}

impl DynamicScheme {
    #[must_use]
    pub fn builder(source: impl Into<Hct>) -> SchemeBuilder {
        SchemeBuilder::new(source.into())
    }

    #[must_use]
    pub const fn source(&self) -> Hct {
        self.source
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// In [-1, 1]: -1 reduced, 0 standard, 0.5 medium, 1 high.
    #[must_use]
    pub const fn contrast_level(&self) -> f64 {
        self.contrast_level
    }

    #[must_use]
    pub const fn spec_version(&self) -> SpecVersion {
        self.version
    }

    #[must_use]
    pub const fn palettes(&self) -> &Palettes {
        &self.palettes
    }

    #[must_use]
    pub const fn palette(&self, palette: Palette) -> &TonalPalette {
        self.palettes.get(palette)
    }

    /// Evaluation context with the scheme's own mode and contrast.
    #[must_use]
    pub const fn ctx(&self) -> Ctx<'_> {
        Ctx::new(self)
    }

    /// Roles the active spec version defines, in catalog order.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        let spec = self.version.color_spec();
        Role::ALL.iter().copied().filter(move |&role| spec.supports(role))
    }

    /// The descriptor for `role` under the active spec version.
    pub fn node(&self, role: Role) -> Result<DynamicColor> {
        self.ctx().node(role)
    }

    pub fn resolve(&self, role: Role) -> Result<ResolvedColor> {
        let ctx = self.ctx();
        ctx.node(role)?.resolve(&ctx)
    }

    /// Resolve by name; see [`Role::from_name`] for accepted spellings.
    pub fn resolve_name(&self, name: &str) -> Result<ResolvedColor> {
        self.resolve(name.parse()?)
    }

    /// Every role the active spec version defines.
    pub fn resolve_all(&self) -> Result<Vec<ResolvedColor>> {
        self.roles().map(|role| self.resolve(role)).collect()
    }

    pub fn argb(&self, role: Role) -> Result<Argb> {
        Ok(self.resolve(role)?.argb())
    }
}

// ---------------------------------------------------------------------------
// SchemeBuilder
// ---------------------------------------------------------------------------

/// Collects scheme parameters. Palettes are generated in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct SchemeBuilder {
    source: Hct,
    is_dark: bool,
    contrast_level: f64,
    version: SpecVersion,
    overrides: Vec<(Palette, TonalPalette)>,
}

impl SchemeBuilder {
    const fn new(source: Hct) -> Self {
        Self {
            source,
            is_dark: false,
            contrast_level: 0.0,
            version: SpecVersion::V2021,
            overrides: Vec::new(),
        }
    }

    #[must_use]
    pub const fn dark(mut self, is_dark: bool) -> Self {
        self.is_dark = is_dark;
        self
    }

    #[must_use]
    pub const fn contrast_level(mut self, contrast_level: f64) -> Self {
        self.contrast_level = contrast_level;
        self
    }

    #[must_use]
    pub const fn spec_version(mut self, version: SpecVersion) -> Self {
        self.version = version;
        self
    }

    /// Use `tonal` instead of the generated palette for `palette`.
    #[must_use]
    pub fn palette(mut self, palette: Palette, tonal: TonalPalette) -> Self {
        self.overrides.push((palette, tonal));
        self
    }

    pub fn build(self) -> Result<DynamicScheme> {
        if !(-1.0..=1.0).contains(&self.contrast_level) {
            return Err(SchemeError::ContrastOutOfRange(self.contrast_level));
        }

        debug!(
            version = %self.version,
            dark = self.is_dark,
            contrast = self.contrast_level,
            source = %self.source.to_argb(),
            overrides = self.overrides.len(),
            "building dynamic scheme"
        );

        let mut palettes = self
            .version
            .palette_generator()
            .generate(&self.source, self.is_dark);
        for (palette, tonal) in self.overrides {
            palettes.set(palette, tonal);
        }

        Ok(DynamicScheme {
            source: self.source,
            is_dark: self.is_dark,
            contrast_level: self.contrast_level,
            version: self.version,
            palettes,
        })
    }
}

// ---------------------------------------------------------------------------
// Ctx
// ---------------------------------------------------------------------------

/// What a role's rules evaluate against: a scheme, a mode and a contrast
/// level. Usually the scheme's own; see [`Ctx::with_overrides`].
#[derive(Debug, Clone, Copy)]
pub struct Ctx<'a> {
    scheme: &'a DynamicScheme,
    is_dark: bool,
    contrast_level: f64,
}

impl<'a> Ctx<'a> {
    #[must_use]
    pub const fn new(scheme: &'a DynamicScheme) -> Self {
        Self {
            scheme,
            is_dark: scheme.is_dark,
            contrast_level: scheme.contrast_level,
        }
    }

    /// Same scheme and palettes, different mode and contrast.
    #[must_use]
    pub const fn with_overrides(self, is_dark: bool, contrast_level: f64) -> Self {
        Self {
            scheme: self.scheme,
            is_dark,
            contrast_level,
        }
    }

    #[must_use]
    pub const fn scheme(&self) -> &'a DynamicScheme {
        self.scheme
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.is_dark
    }

    #[must_use]
    pub const fn contrast_level(&self) -> f64 {
        self.contrast_level
    }

    #[must_use]
    pub const fn palette(&self, palette: Palette) -> &'a TonalPalette {
        self.scheme.palettes.get(palette)
    }

    #[must_use]
    pub fn spec(&self) -> &'static dyn ColorSpec {
        self.scheme.version.color_spec()
    }

    pub fn node(&self, role: Role) -> Result<DynamicColor> {
        self.spec().node(role).ok_or(SchemeError::RoleUnavailable {
            role,
            version: self.scheme.version,
        })
    }

    /// Resolved tone of another role in this context.
    pub fn tone_of(&self, role: Role) -> Result<f64> {
        self.node(role)?.tone(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scheme(version: SpecVersion, dark: bool) -> DynamicScheme {
        DynamicScheme::builder(Argb(0xff67_50a4))
            .dark(dark)
            .spec_version(version)
            .build()
            .unwrap()
    }

    #[test]
    fn builder_defaults() {
        let scheme = DynamicScheme::builder(Argb(0xff67_50a4)).build().unwrap();
        assert!(!scheme.is_dark());
        assert_eq!(scheme.contrast_level(), 0.0);
        assert_eq!(scheme.spec_version(), SpecVersion::V2021);
        assert_eq!(scheme.source().to_argb(), Argb(0xff67_50a4));
    }

    #[test]
    fn contrast_out_of_range_is_rejected() {
        for level in [1.5, -1.01, f64::NAN] {
            let err = DynamicScheme::builder(Argb::WHITE)
                .contrast_level(level)
                .build()
                .unwrap_err();
            assert!(matches!(err, SchemeError::ContrastOutOfRange(_)), "{level}");
        }
    }

    #[test]
    fn palette_override_wins() {
        let custom = TonalPalette::from_hue_and_chroma(140.0, 20.0);
        let scheme = DynamicScheme::builder(Argb(0xff67_50a4))
            .palette(Palette::Tertiary, custom)
            .build()
            .unwrap();
        assert_eq!(*scheme.palette(Palette::Tertiary), custom);
    }

    #[test]
    fn dim_roles_only_in_2025() {
        let old = scheme(SpecVersion::V2021, false);
        let new = scheme(SpecVersion::V2025, false);
        assert_eq!(old.roles().count(), 55);
        assert_eq!(new.roles().count(), 59);
        assert_eq!(
            old.resolve(Role::PrimaryDim).unwrap_err(),
            SchemeError::RoleUnavailable {
                role: Role::PrimaryDim,
                version: SpecVersion::V2021,
            }
        );
        assert!(new.resolve(Role::PrimaryDim).is_ok());
    }

    #[test]
    fn resolve_by_name() {
        let scheme = scheme(SpecVersion::V2021, false);
        let by_name = scheme.resolve_name("onPrimaryContainer").unwrap();
        let by_role = scheme.resolve(Role::OnPrimaryContainer).unwrap();
        assert_eq!(by_name, by_role);
        assert!(matches!(
            scheme.resolve_name("nope"),
            Err(SchemeError::UnknownRole(_))
        ));
    }

    #[test]
    fn overrides_change_mode_only() {
        let scheme = scheme(SpecVersion::V2021, true);
        let light = scheme.ctx().with_overrides(false, 0.0);
        assert!(!light.is_dark());
        assert_eq!(light.tone_of(Role::Surface).unwrap(), 98.0);
        assert_eq!(scheme.ctx().tone_of(Role::Surface).unwrap(), 6.0);
        // Palettes are shared, not regenerated.
        assert_eq!(
            light.palette(Palette::Primary),
            scheme.palette(Palette::Primary)
        );
    }

    #[test]
    fn scheme_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DynamicScheme>();
        assert_send_sync::<DynamicColor>();
    }
}
