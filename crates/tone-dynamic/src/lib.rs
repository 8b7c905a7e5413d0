//! # tone-dynamic — Dynamic Color Resolution
//!
//! Turns one seed color into a full set of semantic UI colors ("roles")
//! that meet contrast targets against each other, in light or dark mode, at
//! any contrast level from reduced to high.
//!
//! # Architecture
//!
//! ```text
//! seed + is_dark + contrast_level + spec version
//!     │
//!     ▼
//! palettes.rs:       six tonal palettes from the seed (per version)
//!     │
//!     ▼
//! scheme.rs:         DynamicScheme freezes seed, mode, contrast, palettes
//!     │
//!     ▼
//! spec/:             role → DynamicColor descriptor (per version)
//!     │
//!     ▼
//! dynamic_color.rs:  tone rules, contrast curves, tone-delta pairs
//!     │
//!     ▼
//! ResolvedColor:     palette sampled at the solved tone
//! ```
//!
//! # Versions
//!
//! Two rulebooks exist, 2021 and 2025. They share the role catalog and the
//! descriptor shape but differ in palettes, tones and how pairs are solved.
//! 2025 adds four "dim" roles that 2021 refuses with
//! [`SchemeError::RoleUnavailable`].
//!
//! Nothing is cached: each lookup re-runs the rules, so a scheme is just
//! its inputs and its palettes, and is freely shareable across threads.

pub mod chroma_search;
pub mod config;
pub mod contrast_curve;
pub mod dynamic_color;
pub mod error;
pub mod palettes;
pub mod role;
pub mod scheme;
pub mod spec;
pub mod tone_delta_pair;

pub use config::SchemeConfig;
pub use contrast_curve::ContrastCurve;
pub use dynamic_color::DynamicColor;
pub use error::{Result, SchemeError};
pub use palettes::{Palette, Palettes};
pub use role::Role;
pub use scheme::{Ctx, DynamicScheme, ResolvedColor, SchemeBuilder};
pub use spec::{ColorSpec, SpecVersion};
pub use tone_delta_pair::{DeltaConstraint, TonePolarity, ToneDeltaPair};
