// SPDX-License-Identifier: MIT
//
// Pixel model — opaque sRGB packed as 0xAARRGGBB, plus the CIE XYZ and
// L* conversions every other module in this crate is built on.
//
// Linear components use the 0–100 scale (Y = 100 is the white point), which
// keeps the CAM16 constants in their published form.
//
// Conversion pipeline:
//
//   Argb ↔ linear sRGB (0–100) ↔ XYZ (D65)
//                                  │
//                                  └── Y ↔ L*

use std::fmt;

// ─── Argb ────────────────────────────────────────────────────────────────────

/// An sRGB pixel packed as `0xAARRGGBB`.
///
/// Every color this workspace produces is opaque; alpha is carried only so
/// the packed form matches what UI toolkits expect.
///
/// # Examples
///
/// ```
/// use tone_hct::Argb;
///
/// let purple = Argb::hex("#6750a4").unwrap();
/// assert_eq!(purple.red(), 0x67);
/// assert_eq!(purple.to_hex(), "#6750a4");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argb(pub u32);

impl Argb {
    /// Pure black.
    pub const BLACK: Self = Self(0xff00_0000);

    /// Pure white.
    pub const WHITE: Self = Self(0xffff_ffff);

    /// Pack opaque 8-bit components.
    #[inline]
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xff00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Parse `#RGB` or `#RRGGBB` (the `#` is optional).
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    #[inline]
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Format as `#rrggbb` (alpha dropped).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())
    }

    // ─── Linear RGB ──────────────────────────────────────────────────────

    /// Build a pixel from linear sRGB components on the 0–100 scale.
    /// Out-of-range components are clipped.
    #[must_use]
    pub fn from_linear_rgb(linear: [f64; 3]) -> Self {
        Self::from_rgb(
            delinearized(linear[0]),
            delinearized(linear[1]),
            delinearized(linear[2]),
        )
    }

    /// Linear sRGB components on the 0–100 scale.
    #[must_use]
    pub fn to_linear_rgb(self) -> [f64; 3] {
        [
            linearized(self.red()),
            linearized(self.green()),
            linearized(self.blue()),
        ]
    }

    // ─── XYZ ─────────────────────────────────────────────────────────────

    /// Build a pixel from CIE XYZ (D65, Y on the 0–100 scale).
    #[must_use]
    pub fn from_xyz(xyz: [f64; 3]) -> Self {
        Self::from_linear_rgb(matrix_multiply(xyz, XYZ_TO_SRGB))
    }

    /// CIE XYZ (D65, Y on the 0–100 scale).
    #[must_use]
    pub fn to_xyz(self) -> [f64; 3] {
        matrix_multiply(self.to_linear_rgb(), SRGB_TO_XYZ)
    }

    /// Relative luminance on the 0–100 scale.
    #[must_use]
    pub fn y(self) -> f64 {
        self.to_xyz()[1]
    }

    // ─── L* ──────────────────────────────────────────────────────────────

    /// The gray pixel with the given L*.
    #[must_use]
    pub fn from_lstar(lstar: f64) -> Self {
        let component = delinearized(y_from_lstar(lstar));
        Self::from_rgb(component, component, component)
    }

    /// CIE L* of this pixel (0 = black, 100 = white).
    #[must_use]
    pub fn lstar(self) -> f64 {
        lstar_from_y(self.y())
    }
}

impl fmt::Debug for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Argb({})", self.to_hex())
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for Argb {
    /// Default is opaque black.
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Matrices ────────────────────────────────────────────────────────────────

/// Linear sRGB → XYZ (D65).
pub const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412_338_95, 0.357_620_64, 0.180_510_42],
    [0.2126, 0.7152, 0.0722],
    [0.019_321_41, 0.119_163_82, 0.950_344_78],
];

/// XYZ (D65) → linear sRGB.
pub const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [3.241_377_479_238_868_5, -1.537_665_240_285_185_1, -0.498_853_668_462_680_53],
    [-0.969_145_251_300_532_1, 1.875_885_345_106_787_2, 0.041_565_856_169_120_61],
    [0.055_620_936_896_913_05, -0.203_955_245_647_421_23, 1.057_179_911_122_033_5],
];

/// D65 reference white.
pub const WHITE_POINT_D65: [f64; 3] = [95.047, 100.0, 108.883];

/// Multiply a row vector by a 3×3 matrix (row-major).
#[inline]
#[must_use]
pub fn matrix_multiply(row: [f64; 3], matrix: [[f64; 3]; 3]) -> [f64; 3] {
    [
        row[2].mul_add(matrix[0][2], row[0].mul_add(matrix[0][0], row[1] * matrix[0][1])),
        row[2].mul_add(matrix[1][2], row[0].mul_add(matrix[1][0], row[1] * matrix[1][1])),
        row[2].mul_add(matrix[2][2], row[0].mul_add(matrix[2][0], row[1] * matrix[2][1])),
    ]
}

// ─── Transfer Functions ──────────────────────────────────────────────────────

/// Remove the sRGB gamma from an 8-bit component (result on the 0–100 scale).
#[inline]
#[must_use]
pub fn linearized(component: u8) -> f64 {
    let normalized = f64::from(component) / 255.0;
    if normalized <= 0.040_449_936 {
        normalized / 12.92 * 100.0
    } else {
        ((normalized + 0.055) / 1.055).powf(2.4) * 100.0
    }
}

/// Apply the sRGB gamma to a 0–100 linear component, rounding to 8 bits.
#[inline]
#[must_use]
pub fn delinearized(linear: f64) -> u8 {
    let normalized = linear / 100.0;
    let encoded = if normalized <= 0.003_130_8 {
        normalized * 12.92
    } else {
        1.055f64.mul_add(normalized.powf(1.0 / 2.4), -0.055)
    };
    to_u8(encoded)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // NaN saturates to 0; clamp guarantees 0.0 <= value <= 255.0 otherwise.
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── L* ↔ Y ──────────────────────────────────────────────────────────────────

const LAB_E: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_E {
        t.cbrt()
    } else {
        LAB_KAPPA.mul_add(t, 16.0) / 116.0
    }
}

#[inline]
fn lab_inv_f(ft: f64) -> f64 {
    let ft3 = ft * ft * ft;
    if ft3 > LAB_E {
        ft3
    } else {
        116.0f64.mul_add(ft, -16.0) / LAB_KAPPA
    }
}

/// Relative luminance Y (0–100) of a given L*.
#[inline]
#[must_use]
pub fn y_from_lstar(lstar: f64) -> f64 {
    100.0 * lab_inv_f((lstar + 16.0) / 116.0)
}

/// L* of a given relative luminance Y (0–100).
#[inline]
#[must_use]
pub fn lstar_from_y(y: f64) -> f64 {
    lab_f(y / 100.0).mul_add(116.0, -16.0)
}

// ─── Angles ──────────────────────────────────────────────────────────────────

/// Normalize an angle in degrees to [0, 360).
#[inline]
#[must_use]
pub fn sanitize_degrees(degrees: f64) -> f64 {
    let d = degrees % 360.0;
    if d < 0.0 { d + 360.0 } else { d }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Argb> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Argb::from_rgb(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Argb::from_rgb(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
