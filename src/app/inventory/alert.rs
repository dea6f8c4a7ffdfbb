//! 低库存规则

/// 库存低于阈值（严格小于）即为低库存
pub fn is_low_stock(quantity: i64, threshold: i64) -> bool {
    quantity < threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_examples() {
        assert!(is_low_stock(3, 5));
        assert!(!is_low_stock(10, 5));
    }

    #[test]
    fn test_boundary_is_not_low() {
        assert!(!is_low_stock(5, 5));
        assert!(is_low_stock(4, 5));
        assert!(is_low_stock(0, 1));
        assert!(!is_low_stock(0, 0));
    }

    #[test]
    fn test_matches_strict_comparison() {
        for threshold in 0..8 {
            for quantity in 0..12 {
                assert_eq!(is_low_stock(quantity, threshold), quantity < threshold);
            }
        }
    }
}
