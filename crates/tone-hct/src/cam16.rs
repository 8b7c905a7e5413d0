// SPDX-License-Identifier: MIT
//
// CAM16 color appearance model.
//
// CAM16 predicts how a color looks under given viewing conditions. HCT only
// needs its hue and chroma correlates (and J for the inverse), evaluated
// under one fixed environment: D65 white, a mid-gray (L* 50) background and
// an average surround.
//
// Pipeline:
//
//   XYZ → cone response (M16) → chromatic adaptation (D) → post-adaptation
//   compression → opponent dimensions (a, b) → J, C, h
//
// Reference: Li et al., "Comprehensive color solutions: CAM16, CAT16, and
// CAM16-UCS" (2017).

use std::f64::consts::PI;
use std::sync::LazyLock;

use crate::argb::{Argb, WHITE_POINT_D65, sanitize_degrees, y_from_lstar};

// ─── Viewing Conditions ──────────────────────────────────────────────────────

/// Precomputed environment parameters for CAM16.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewingConditions {
    pub n: f64,
    pub aw: f64,
    pub nbb: f64,
    pub ncb: f64,
    pub c: f64,
    pub nc: f64,
    pub rgb_d: [f64; 3],
    pub fl: f64,
    pub fl_root: f64,
    pub z: f64,
}

static STANDARD: LazyLock<ViewingConditions> = LazyLock::new(|| {
    ViewingConditions::new(
        WHITE_POINT_D65,
        (200.0 / PI) * y_from_lstar(50.0) / 100.0,
        50.0,
        2.0,
        false,
    )
});

impl ViewingConditions {
    /// The sRGB reference environment HCT is defined in.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Derive the model parameters for an environment.
    ///
    /// - `white_point`: XYZ of the adopted white
    /// - `adapting_luminance`: luminance of the adapting field, cd/m²
    /// - `background_lstar`: L* of the background
    /// - `surround`: 0 (dark) to 2 (average)
    /// - `discounting_illuminant`: whether the eye fully adapts to the white
    #[must_use]
    pub fn new(
        white_point: [f64; 3],
        adapting_luminance: f64,
        background_lstar: f64,
        surround: f64,
        discounting_illuminant: bool,
    ) -> Self {
        let [x, y, z] = white_point;
        let r_w = (-0.051_461f64).mul_add(z, 0.401_288f64.mul_add(x, 0.650_173 * y));
        let g_w = 0.045_854f64.mul_add(z, (-0.250_268f64).mul_add(x, 1.204_414 * y));
        let b_w = 0.953_127f64.mul_add(z, (-0.002_079f64).mul_add(x, 0.048_952 * y));

        let f = 0.8 + surround / 10.0;
        let c = if f >= 0.9 {
            lerp(0.59, 0.69, (f - 0.9) * 10.0)
        } else {
            lerp(0.525, 0.59, (f - 0.8) * 10.0)
        };
        let d = if discounting_illuminant {
            1.0
        } else {
            (f * (1.0 - (1.0 / 3.6) * ((-adapting_luminance - 42.0) / 92.0).exp())).clamp(0.0, 1.0)
        };
        let nc = f;
        let rgb_d = [
            d.mul_add(100.0 / r_w, 1.0 - d),
            d.mul_add(100.0 / g_w, 1.0 - d),
            d.mul_add(100.0 / b_w, 1.0 - d),
        ];

        let k = 1.0 / 5.0f64.mul_add(adapting_luminance, 1.0);
        let k4 = k * k * k * k;
        let k4f = 1.0 - k4;
        let fl = (0.1 * k4f * k4f).mul_add((5.0 * adapting_luminance).cbrt(), k4 * adapting_luminance);

        let n = y_from_lstar(background_lstar) / white_point[1];
        let z = 1.48 + n.sqrt();
        let nbb = 0.725 / n.powf(0.2);
        let ncb = nbb;

        let adapt = |component: f64, white: f64| {
            let factor = (fl * component * white / 100.0).powf(0.42);
            400.0 * factor / (factor + 27.13)
        };
        let rgb_a = [adapt(rgb_d[0], r_w), adapt(rgb_d[1], g_w), adapt(rgb_d[2], b_w)];
        let aw = 0.05f64.mul_add(rgb_a[2], 2.0f64.mul_add(rgb_a[0], rgb_a[1])) * nbb;

        Self {
            n,
            aw,
            nbb,
            ncb,
            c,
            nc,
            rgb_d,
            fl,
            fl_root: fl.powf(0.25),
            z,
        }
    }
}

#[inline]
fn lerp(start: f64, stop: f64, amount: f64) -> f64 {
    (1.0 - amount).mul_add(start, amount * stop)
}

// ─── Cam16 ───────────────────────────────────────────────────────────────────

/// A color's CAM16 appearance correlates, plus its CAM16-UCS coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cam16 {
    /// Hue angle in degrees, [0, 360).
    pub hue: f64,
    /// Chroma.
    pub chroma: f64,
    /// Lightness.
    pub j: f64,
    /// Brightness.
    pub q: f64,
    /// Colorfulness.
    pub m: f64,
    /// Saturation.
    pub s: f64,
    pub jstar: f64,
    pub astar: f64,
    pub bstar: f64,
}

impl Cam16 {
    /// Appearance of a pixel under the standard environment.
    #[must_use]
    pub fn from_argb(argb: Argb) -> Self {
        Self::from_argb_in(argb, ViewingConditions::standard())
    }

    /// Appearance of a pixel under the given environment.
    #[must_use]
    pub fn from_argb_in(argb: Argb, vc: &ViewingConditions) -> Self {
        Self::from_xyz_in(argb.to_xyz(), vc)
    }

    /// Appearance of an XYZ stimulus under the given environment.
    #[must_use]
    pub fn from_xyz_in(xyz: [f64; 3], vc: &ViewingConditions) -> Self {
        let [x, y, z] = xyz;

        // XYZ → cone responses.
        let r_c = (-0.051_461f64).mul_add(z, 0.401_288f64.mul_add(x, 0.650_173 * y));
        let g_c = 0.045_854f64.mul_add(z, (-0.250_268f64).mul_add(x, 1.204_414 * y));
        let b_c = 0.953_127f64.mul_add(z, (-0.002_079f64).mul_add(x, 0.048_952 * y));

        // Chromatic adaptation, then post-adaptation compression.
        let compress = |component: f64| {
            let af = (vc.fl * component.abs() / 100.0).powf(0.42);
            component.signum() * 400.0 * af / (af + 27.13)
        };
        let r_a = compress(vc.rgb_d[0] * r_c);
        let g_a = compress(vc.rgb_d[1] * g_c);
        let b_a = compress(vc.rgb_d[2] * b_c);

        // Opponent dimensions.
        let a = (11.0f64.mul_add(r_a, -12.0 * g_a) + b_a) / 11.0;
        let b = 2.0f64.mul_add(-b_a, r_a + g_a) / 9.0;
        let u = 21.0f64.mul_add(b_a, 20.0 * r_a + 20.0 * g_a) / 20.0;
        let p2 = (40.0f64.mul_add(r_a, 20.0 * g_a) + b_a) / 20.0;

        let hue = sanitize_degrees(b.atan2(a).to_degrees());
        let hue_radians = hue.to_radians();

        let ac = p2 * vc.nbb;
        let j = 100.0 * (ac / vc.aw).powf(vc.c * vc.z);
        let q = (4.0 / vc.c) * (j / 100.0).sqrt() * (vc.aw + 4.0) * vc.fl_root;

        let hue_prime = if hue < 20.14 { hue + 360.0 } else { hue };
        let e_hue = 0.25 * ((hue_prime.to_radians() + 2.0).cos() + 3.8);
        let p1 = 50000.0 / 13.0 * e_hue * vc.nc * vc.ncb;
        let t = p1 * a.hypot(b) / (u + 0.305);
        let alpha = t.powf(0.9) * (1.64 - 0.29f64.powf(vc.n)).powf(0.73);

        let chroma = alpha * (j / 100.0).sqrt();
        let m = chroma * vc.fl_root;
        let s = 50.0 * ((alpha * vc.c) / (vc.aw + 4.0)).sqrt();

        Self::with_ucs(hue, hue_radians, chroma, j, q, m, s)
    }

    /// Build from lightness, chroma and hue under the standard environment.
    #[must_use]
    pub fn from_jch(j: f64, c: f64, h: f64) -> Self {
        Self::from_jch_in(j, c, h, ViewingConditions::standard())
    }

    /// Build from lightness, chroma and hue under the given environment.
    #[must_use]
    pub fn from_jch_in(j: f64, c: f64, h: f64, vc: &ViewingConditions) -> Self {
        let q = (4.0 / vc.c) * (j / 100.0).sqrt() * (vc.aw + 4.0) * vc.fl_root;
        let m = c * vc.fl_root;
        let alpha = c / (j / 100.0).sqrt();
        let s = 50.0 * ((alpha * vc.c) / (vc.aw + 4.0)).sqrt();
        Self::with_ucs(h, h.to_radians(), c, j, q, m, s)
    }

    fn with_ucs(hue: f64, hue_radians: f64, chroma: f64, j: f64, q: f64, m: f64, s: f64) -> Self {
        let jstar = (1.0 + 100.0 * 0.007) * j / 0.007f64.mul_add(j, 1.0);
        let mstar = 1.0 / 0.0228 * 0.0228f64.mul_add(m, 1.0).ln();
        Self {
            hue,
            chroma,
            j,
            q,
            m,
            s,
            jstar,
            astar: mstar * hue_radians.cos(),
            bstar: mstar * hue_radians.sin(),
        }
    }

    /// Perceptual distance in CAM16-UCS. Values under ~1 are hard to see.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dj = self.jstar - other.jstar;
        let da = self.astar - other.astar;
        let db = self.bstar - other.bstar;
        let de_prime = db.mul_add(db, dj.mul_add(dj, da * da)).sqrt();
        1.41 * de_prime.powf(0.63)
    }

    /// The pixel for this appearance under the standard environment.
    /// Out-of-gamut appearances are clipped per channel.
    #[must_use]
    pub fn to_argb(&self) -> Argb {
        self.viewed(ViewingConditions::standard())
    }

    /// The pixel for this appearance under the given environment.
    #[must_use]
    pub fn viewed(&self, vc: &ViewingConditions) -> Argb {
        let alpha = if self.chroma == 0.0 || self.j == 0.0 {
            0.0
        } else {
            self.chroma / (self.j / 100.0).sqrt()
        };

        let t = (alpha / (1.64 - 0.29f64.powf(vc.n)).powf(0.73)).powf(1.0 / 0.9);
        let h_rad = self.hue.to_radians();

        let e_hue = 0.25 * ((h_rad + 2.0).cos() + 3.8);
        let ac = vc.aw * (self.j / 100.0).powf(1.0 / vc.c / vc.z);
        let p1 = e_hue * (50000.0 / 13.0) * vc.nc * vc.ncb;
        let p2 = ac / vc.nbb;

        let h_sin = h_rad.sin();
        let h_cos = h_rad.cos();

        let gamma = 23.0 * (p2 + 0.305) * t
            / (108.0 * t).mul_add(h_sin, 23.0f64.mul_add(p1, 11.0 * t * h_cos));
        let a = gamma * h_cos;
        let b = gamma * h_sin;

        let r_a = 288.0f64.mul_add(b, 460.0f64.mul_add(p2, 451.0 * a)) / 1403.0;
        let g_a = 261.0f64.mul_add(-b, 460.0f64.mul_add(p2, -891.0 * a)) / 1403.0;
        let b_a = 6300.0f64.mul_add(-b, 460.0f64.mul_add(p2, -220.0 * a)) / 1403.0;

        let decompress = |component: f64| {
            let base = (27.13 * component.abs() / (400.0 - component.abs())).max(0.0);
            component.signum() * (100.0 / vc.fl) * base.powf(1.0 / 0.42)
        };
        let r_f = decompress(r_a) / vc.rgb_d[0];
        let g_f = decompress(g_a) / vc.rgb_d[1];
        let b_f = decompress(b_a) / vc.rgb_d[2];

        let x = 0.149_186_77f64.mul_add(b_f, 1.862_067_86f64.mul_add(r_f, -1.011_254_63 * g_f));
        let y = (-0.008_973_98f64).mul_add(b_f, 0.387_526_54f64.mul_add(r_f, 0.621_447_44 * g_f));
        let z = 1.049_964_44f64.mul_add(b_f, (-0.015_841_50f64).mul_add(r_f, -0.034_122_94 * g_f));

        Argb::from_xyz([x, y, z])
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
