use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Trade value of units, bundles and converters.
///
/// Printed values are whole numbers or halves, which Q32.32 represents
/// exactly, and unlike `f64` it is totally ordered.
pub type Value = Fixed64;

/// Convert an f64 to a [`Value`]. Use for catalog construction and tests.
#[inline]
pub fn f64_to_value(v: f64) -> Value {
    Value::from_num(v)
}

/// Convert a [`Value`] to f64 for display.
#[inline]
pub fn value_to_f64(v: Value) -> f64 {
    v.to_num::<f64>()
}

/// Multiply a unit value by a count, saturating instead of overflowing.
#[inline]
pub fn scaled(value: Value, count: u32) -> Value {
    value.saturating_mul(Value::saturating_from_num(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_are_exact() {
        let large = f64_to_value(1.5);
        let sum = large + large + large;
        assert_eq!(value_to_f64(sum), 4.5);
    }

    #[test]
    fn scaled_multiplies_by_count() {
        assert_eq!(scaled(f64_to_value(1.5), 4), f64_to_value(6.0));
        assert_eq!(scaled(f64_to_value(3.0), 0), Value::ZERO);
    }

    #[test]
    fn scaled_saturates() {
        assert_eq!(scaled(Value::MAX, 2), Value::MAX);
    }

    #[test]
    fn values_are_ordered() {
        let a = f64_to_value(1.0);
        let b = f64_to_value(1.5);
        assert!(a < b);
        assert_eq!(a.max(b), b);
    }
}
