//! Contrast targets as a function of the scheme's contrast level.

/// Four calibrated contrast ratios, one per reference contrast level.
///
/// Between the reference levels the ratio is interpolated linearly; outside
/// [-1, 1] the curve is flat.
///
/// ```text
/// level   -1     0     0.5    1
/// ratio   low  normal medium high
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastCurve {
    pub low: f64,
    pub normal: f64,
    pub medium: f64,
    pub high: f64,
}

impl ContrastCurve {
    #[must_use]
    pub const fn new(low: f64, normal: f64, medium: f64, high: f64) -> Self {
        Self {
            low,
            normal,
            medium,
            high,
        }
    }

    /// Contrast ratio wanted at `contrast_level`.
    #[must_use]
    pub fn value_at(&self, contrast_level: f64) -> f64 {
        if contrast_level <= -1.0 {
            self.low
        } else if contrast_level < 0.0 {
            lerp(self.low, self.normal, contrast_level + 1.0)
        } else if contrast_level < 0.5 {
            lerp(self.normal, self.medium, contrast_level / 0.5)
        } else if contrast_level < 1.0 {
            lerp(self.medium, self.high, (contrast_level - 0.5) / 0.5)
        } else {
            self.high
        }
    }
}

fn lerp(start: f64, stop: f64, amount: f64) -> f64 {
    (stop - start).mul_add(amount, start)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVE: ContrastCurve = ContrastCurve::new(3.0, 4.5, 7.0, 11.0);

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn reference_levels_hit_calibration_points() {
        assert!(approx_eq(CURVE.value_at(-1.0), 3.0));
        assert!(approx_eq(CURVE.value_at(0.0), 4.5));
        assert!(approx_eq(CURVE.value_at(0.5), 7.0));
        assert!(approx_eq(CURVE.value_at(1.0), 11.0));
    }

    #[test]
    fn interpolates_between_levels() {
        assert!(approx_eq(CURVE.value_at(-0.5), 3.75));
        assert!(approx_eq(CURVE.value_at(0.25), 5.75));
        assert!(approx_eq(CURVE.value_at(0.75), 9.0));
    }

    #[test]
    fn flat_outside_range() {
        assert!(approx_eq(CURVE.value_at(-3.0), 3.0));
        assert!(approx_eq(CURVE.value_at(2.0), 11.0));
    }

    #[test]
    fn monotone_for_increasing_curve() {
        let mut previous = CURVE.value_at(-1.0);
        for step in -19..=20 {
            let value = CURVE.value_at(f64::from(step) / 20.0);
            assert!(value >= previous - 1e-12);
            previous = value;
        }
    }
}
