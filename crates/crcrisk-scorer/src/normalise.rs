//! Reference-gene normalisation.

/// ΔLog2 normalisation: target expression minus reference expression.
/// Both inputs are already log2-transformed, so the difference is the
/// log2 fold change of the target against the reference.
pub fn delta_log2(target: f64, reference: f64) -> f64 {
    target - reference
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_values_normalise_to_zero() {
        assert_eq!(delta_log2(6.9, 6.9), 0.0);
    }

    #[test]
    fn test_delta_sign() {
        assert!(delta_log2(10.0, 6.9) > 0.0);
        assert!(delta_log2(4.0, 6.9) < 0.0);
        assert!((delta_log2(10.0, 6.9) - 3.1).abs() < 1e-12);
    }
}
