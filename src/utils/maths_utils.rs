/// Linearly maps a value from one range to another while preserving its relative proportion.
pub fn remap(val: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let t = (val - in_min) / (in_max - in_min);
    out_min + t * (out_max - out_min)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// `num / den`, or `None` when the denominator is (near) zero.
#[inline]
pub fn safe_ratio(num: f64, den: f64) -> Option<f64> {
    if den.abs() <= f64::EPSILON {
        None
    } else {
        Some(num / den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_flips_ranges() {
        assert_eq!(remap(25.0, 0.0, 100.0, 200.0, 0.0), 150.0);
    }

    #[test]
    fn safe_ratio_refuses_zero() {
        assert_eq!(safe_ratio(1.0, 0.0), None);
        assert_eq!(safe_ratio(1.0, 4.0), Some(0.25));
    }
}
