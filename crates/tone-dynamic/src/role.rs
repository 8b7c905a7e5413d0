//! The fixed catalog of semantic color roles.
//!
//! A role is a name a UI asks for ("primary", "on_surface_variant"). Which
//! roles a scheme can resolve depends on its spec version; the catalog here
//! is the union of all versions.

use std::fmt;
use std::str::FromStr;

use crate::error::SchemeError;

macro_rules! roles {
    ($($(#[$meta:meta])* $variant:ident => $name:literal,)+) => {
        /// A semantic color role.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Role {
            $($(#[$meta])* $variant,)+
        }

        impl Role {
            /// Every role in catalog order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Stable snake_case identifier.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }
    };
}

roles! {
    // ── Palette key colors ───────────────────────────────────
    PrimaryPaletteKeyColor => "primary_palette_key_color",
    SecondaryPaletteKeyColor => "secondary_palette_key_color",
    TertiaryPaletteKeyColor => "tertiary_palette_key_color",
    NeutralPaletteKeyColor => "neutral_palette_key_color",
    NeutralVariantPaletteKeyColor => "neutral_variant_palette_key_color",
    ErrorPaletteKeyColor => "error_palette_key_color",

    // ── Surfaces ─────────────────────────────────────────────
    Background => "background",
    OnBackground => "on_background",
    Surface => "surface",
    SurfaceDim => "surface_dim",
    SurfaceBright => "surface_bright",
    SurfaceContainerLowest => "surface_container_lowest",
    SurfaceContainerLow => "surface_container_low",
    SurfaceContainer => "surface_container",
    SurfaceContainerHigh => "surface_container_high",
    SurfaceContainerHighest => "surface_container_highest",
    OnSurface => "on_surface",
    SurfaceVariant => "surface_variant",
    OnSurfaceVariant => "on_surface_variant",
    InverseSurface => "inverse_surface",
    InverseOnSurface => "inverse_on_surface",
    Outline => "outline",
    OutlineVariant => "outline_variant",
    Shadow => "shadow",
    Scrim => "scrim",
    SurfaceTint => "surface_tint",

    // ── Primary ──────────────────────────────────────────────
    Primary => "primary",
    /// 2025 only.
    PrimaryDim => "primary_dim",
    OnPrimary => "on_primary",
    PrimaryContainer => "primary_container",
    OnPrimaryContainer => "on_primary_container",
    InversePrimary => "inverse_primary",

    // ── Secondary ────────────────────────────────────────────
    Secondary => "secondary",
    /// 2025 only.
    SecondaryDim => "secondary_dim",
    OnSecondary => "on_secondary",
    SecondaryContainer => "secondary_container",
    OnSecondaryContainer => "on_secondary_container",

    // ── Tertiary ─────────────────────────────────────────────
    Tertiary => "tertiary",
    /// 2025 only.
    TertiaryDim => "tertiary_dim",
    OnTertiary => "on_tertiary",
    TertiaryContainer => "tertiary_container",
    OnTertiaryContainer => "on_tertiary_container",

    // ── Error ────────────────────────────────────────────────
    Error => "error",
    /// 2025 only.
    ErrorDim => "error_dim",
    OnError => "on_error",
    ErrorContainer => "error_container",
    OnErrorContainer => "on_error_container",

    // ── Fixed ────────────────────────────────────────────────
    PrimaryFixed => "primary_fixed",
    PrimaryFixedDim => "primary_fixed_dim",
    OnPrimaryFixed => "on_primary_fixed",
    OnPrimaryFixedVariant => "on_primary_fixed_variant",
    SecondaryFixed => "secondary_fixed",
    SecondaryFixedDim => "secondary_fixed_dim",
    OnSecondaryFixed => "on_secondary_fixed",
    OnSecondaryFixedVariant => "on_secondary_fixed_variant",
    TertiaryFixed => "tertiary_fixed",
    TertiaryFixedDim => "tertiary_fixed_dim",
    OnTertiaryFixed => "on_tertiary_fixed",
    OnTertiaryFixedVariant => "on_tertiary_fixed_variant",
}

impl Role {
    /// Look a role up by name.
    ///
    /// Accepts the snake_case identifier, camelCase (`onPrimaryContainer`)
    /// and kebab-case (`on-primary-container`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let mut normalized = String::with_capacity(name.len() + 8);
        for ch in name.trim().chars() {
            if ch.is_ascii_uppercase() {
                if !normalized.is_empty() {
                    normalized.push('_');
                }
                normalized.push(ch.to_ascii_lowercase());
            } else if ch == '-' {
                normalized.push('_');
            } else {
                normalized.push(ch);
            }
        }
        Self::ALL.iter().copied().find(|role| role.name() == normalized)
    }

    /// Fixed-dim roles are exempt from the 2025 awkward-tone remapping.
    #[must_use]
    pub const fn is_fixed_dim(self) -> bool {
        matches!(
            self,
            Self::PrimaryFixedDim | Self::SecondaryFixedDim | Self::TertiaryFixedDim
        )
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| SchemeError::UnknownRole(s.to_string()))
    }
}
