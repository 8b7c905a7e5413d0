//! Spec versions: the rulebooks that turn roles into descriptors.
//!
//! Each version is a stateless `'static` value implementing [`ColorSpec`].
//! A scheme picks one when it is built and every role lookup goes through
//! it, including the lookups rules make for their backgrounds and partners.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tone_hct::Hct;

use crate::dynamic_color::DynamicColor;
use crate::error::{Result, SchemeError};
use crate::palettes::{PaletteGenerator, TonalSpot2021, TonalSpot2025};
use crate::role::Role;
use crate::scheme::Ctx;

pub mod spec_2021;
pub mod spec_2025;

pub use spec_2021::ColorSpec2021;
pub use spec_2025::ColorSpec2025;

static SPEC_2021: ColorSpec2021 = ColorSpec2021;
static SPEC_2025: ColorSpec2025 = ColorSpec2025;
static PALETTES_2021: TonalSpot2021 = TonalSpot2021;
static PALETTES_2025: TonalSpot2025 = TonalSpot2025;

// ---------------------------------------------------------------------------
// SpecVersion
// ---------------------------------------------------------------------------

/// Which revision of the color rules a scheme follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpecVersion {
    #[default]
    #[serde(rename = "2021")]
    V2021,
    #[serde(rename = "2025")]
    V2025,
}

impl SpecVersion {
    pub const ALL: [Self; 2] = [Self::V2021, Self::V2025];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::V2021 => "2021",
            Self::V2025 => "2025",
        }
    }

    #[must_use]
    pub fn color_spec(self) -> &'static dyn ColorSpec {
        match self {
            Self::V2021 => &SPEC_2021,
            Self::V2025 => &SPEC_2025,
        }
    }

    #[must_use]
    pub fn palette_generator(self) -> &'static dyn PaletteGenerator {
        match self {
            Self::V2021 => &PALETTES_2021,
            Self::V2025 => &PALETTES_2025,
        }
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpecVersion {
    type Err = SchemeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "2021" => Ok(Self::V2021),
            "2025" => Ok(Self::V2025),
            other => Err(SchemeError::UnknownSpecVersion(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ColorSpec
// ---------------------------------------------------------------------------

/// A version's rulebook: role descriptors plus the tone algorithm that runs
/// them.
pub trait ColorSpec: Send + Sync {
    fn version(&self) -> SpecVersion;

    /// The descriptor for `role`, or `None` if this version lacks the role.
    fn node(&self, role: Role) -> Option<DynamicColor>;

    /// Solve `color`'s tone. The caller clamps the result to [0, 100].
    fn tone(&self, ctx: &Ctx<'_>, color: &DynamicColor) -> Result<f64>;

    fn supports(&self, role: Role) -> bool {
        self.node(role).is_some()
    }

    /// Sample `color`'s palette at `tone`, chroma scaled by the role's
    /// multiplier.
    fn hct_at(&self, ctx: &Ctx<'_>, color: &DynamicColor, tone: f64) -> Hct {
        let palette = ctx.palette(color.palette());
        Hct::from(
            palette.hue(),
            palette.chroma() * color.chroma_multiplier(ctx),
            tone,
        )
    }

    fn hct(&self, ctx: &Ctx<'_>, color: &DynamicColor) -> Result<Hct> {
        Ok(self.hct_at(ctx, color, color.tone(ctx)?))
    }
}

/// The surface that content roles contrast against by default.
#[must_use]
pub fn highest_surface(ctx: &Ctx<'_>) -> Role {
    if ctx.is_dark() {
        Role::SurfaceBright
    } else {
        Role::SurfaceDim
    }
}
