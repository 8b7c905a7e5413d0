// SPDX-License-Identifier: MIT
//
// tone-hct — the color space underneath tone's dynamic color engine.
//
// HCT pairs CAM16 hue and chroma with CIE L* as "tone". Tone is what the
// contrast math cares about: two tones fully determine a contrast ratio,
// whatever their hue or chroma. Hue and chroma are what the eye reads as
// "the same color", so a tonal palette can sweep tone while keeping them.
//
// Pipeline:
//
//   Argb ↔ linear sRGB ↔ XYZ ↔ CAM16 (J, C, h)
//                         │
//                         └── Y ↔ L* (tone)
//
// This crate has no dependencies and does no allocation outside the key
// color search in `palette`.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Hue/chroma/tone variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod argb;
pub mod cam16;
pub mod contrast;
pub mod hct;
pub mod palette;

pub use argb::Argb;
pub use hct::Hct;
pub use palette::TonalPalette;
