/// Compares `value` against `target` relative to the target's magnitude.
///
/// Targets whose magnitude is at most `tolerance` cannot be compared relatively, so the
/// comparison switches to an absolute one in that case.
pub fn approx_equal(value: f64, target: f64, tolerance: f64) -> bool {
    if target.abs() <= tolerance {
        return value.abs() <= tolerance;
    }
    (value / target - 1.0).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_comparison() {
        assert!(approx_equal(100.5, 100.0, 0.01));
        assert!(approx_equal(99.0, 100.0, 0.01));
        assert!(!approx_equal(98.9, 100.0, 0.01));
    }

    #[test]
    fn test_absolute_comparison_near_zero() {
        assert!(approx_equal(0.005, 0.0, 0.01));
        assert!(approx_equal(-0.009, 0.001, 0.01));
        assert!(!approx_equal(0.02, 0.0, 0.01));
    }

    #[test]
    fn test_negative_targets() {
        assert!(approx_equal(-50.2, -50.0, 0.01));
        assert!(!approx_equal(50.0, -50.0, 0.01));
    }
}
