use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Pass `v` through, or name it in a [`CoreError::NonFinite`].
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Round to a fixed number of decimal places. Exact halves round up
/// (toward +inf), so `-0.125` becomes `-0.12`.
pub fn round_to(v: Real, decimals: u32) -> Real {
    let scale = 10f64.powi(decimals as i32);
    let x = v * scale;
    let floor = x.floor();
    let rounded = if x - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded / scale
}

/// Fixed-point text for axis labels and tables.
pub fn format_fixed(v: Real, decimals: usize) -> String {
    format!("{:.*}", decimals, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn round_to_one_and_two_decimals() {
        assert_eq!(round_to(309.96, 1), 310.0);
        assert_eq!(round_to(300.04, 1), 300.0);
        assert_eq!(round_to(0.6049, 2), 0.6);
        assert_eq!(round_to(0.125, 2), 0.13);
    }

    #[test]
    fn round_to_sends_halves_up() {
        assert_eq!(round_to(4.625, 2), 4.63);
        assert_eq!(round_to(-0.125, 2), -0.12);
        assert_eq!(round_to(-2.5, 0), -2.0);
        assert_eq!(round_to(0.49999999999999994, 0), 0.0);
    }

    #[test]
    fn format_fixed_pads_decimals() {
        assert_eq!(format_fixed(0.0, 2), "0.00");
        assert_eq!(format_fixed(2.5, 2), "2.50");
        assert_eq!(format_fixed(5.0, 1), "5.0");
    }
}
