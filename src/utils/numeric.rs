//! Small numeric helpers shared by the derivative and rescaling code.

/// Falling factorial `e * (e - 1) * ... * (e - n + 1)`.
///
/// This is the coefficient picked up by `x^e` after `n` differentiations.
/// For `n == 0` the empty product is `1`.
pub fn falling_factorial(e: f64, n: usize) -> f64 {
    let mut product = 1.0;
    for k in 0..n {
        product *= e - k as f64;
    }
    product
}

/// Integer power by repeated squaring.
pub fn int_pow(x: f64, n: u32) -> f64 {
    let mut result = 1.0;
    let mut base = x;
    let mut exp = n;
    while exp > 0 {
        if exp & 1 == 1 {
            result *= base;
        }
        base *= base;
        exp >>= 1;
    }
    result
}

/// Returns a copy of `values` with every element multiplied by `factor`.
pub fn scaled(values: &[f64], factor: f64) -> Vec<f64> {
    values.iter().map(|&v| v * factor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_falling_factorial() {
        assert_relative_eq!(falling_factorial(5.0, 0), 1.0);
        assert_relative_eq!(falling_factorial(5.0, 1), 5.0);
        assert_relative_eq!(falling_factorial(5.0, 3), 60.0); // 5*4*3
        assert_relative_eq!(falling_factorial(1.5, 2), 0.75); // 1.5*0.5
        assert_eq!(falling_factorial(2.0, 3), 0.0); // 2*1*0
    }

    #[test]
    fn test_int_pow() {
        assert_relative_eq!(int_pow(2.0, 0), 1.0);
        assert_relative_eq!(int_pow(2.0, 10), 1024.0);
        assert_relative_eq!(int_pow(-3.0, 3), -27.0);
        assert_relative_eq!(int_pow(0.5, 4), 0.0625);
    }

    #[test]
    fn test_scaled() {
        assert_eq!(scaled(&[1.0, -2.0, 0.5], 2.0), vec![2.0, -4.0, 1.0]);
        assert!(scaled(&[], 3.0).is_empty());
    }
}
