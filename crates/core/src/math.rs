//! Scalar helpers shared by physics and rendering.
//!
//! None of these panic on degenerate ranges: a collapsed or inverted range
//! yields its boundary value.

/// Clamp `val` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics; when `min > max` values below
/// `min` return `min` and everything else returns `max`.
///
/// # Examples
///
/// ```
/// use floatybox_core::math::clamp;
///
/// assert_eq!(clamp(5.0, 1.0, 3.0), 3.0);
/// assert_eq!(clamp(-2, 0, 10), 0);
/// assert_eq!(clamp(2.5, 1.0, 3.0), 2.5);
/// ```
pub fn clamp<T: PartialOrd>(val: T, min: T, max: T) -> T {
    if val < min {
        return min;
    }
    if val > max {
        return max;
    }
    val
}

/// Linear interpolation from `a` to `b` by `t`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Map `val` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// An empty input range maps everything to `out_min`.
pub fn scale(val: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    out_min + (out_max - out_min) * ((val - in_min) / span)
}

/// Eased interpolation factor for a per-second `decay` over `dt` seconds.
///
/// `1 - decay^dt`: the share of the remaining distance covered this step.
pub fn ease_out(decay: f64, dt: f64) -> f64 {
    1.0 - decay.powf(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clamp_collapsed_range_returns_boundary() {
        assert_eq!(clamp(7.0, 2.0, 2.0), 2.0);
        assert_eq!(clamp(-7.0, 2.0, 2.0), 2.0);
    }

    #[test]
    fn clamp_inverted_range_does_not_panic() {
        assert_eq!(clamp(0.0, 1.0, -2.0), 1.0);
        assert_eq!(clamp(5.0, 1.0, -2.0), -2.0);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn scale_maps_ranges() {
        assert_eq!(scale(5.0, 0.0, 10.0, 0.0, 1.0), 0.5);
        assert_eq!(scale(5.0, 3.0, 3.0, 0.25, 1.0), 0.25);
    }

    #[test]
    fn ease_out_is_zero_without_time() {
        assert_eq!(ease_out(0.1, 0.0), 0.0);
        assert!((ease_out(0.1, 1.0) - 0.9).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn clamp_stays_in_range(val in -1e6f64..1e6, a in -1e3f64..1e3, b in -1e3f64..1e3) {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let out = clamp(val, min, max);
            prop_assert!(out >= min && out <= max);
            prop_assert_eq!(out == val, val >= min && val <= max);
        }
    }
}
