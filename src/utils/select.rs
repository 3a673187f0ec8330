//! Order-statistics selection for the trimmed criteria.
//!
//! [`partial_sort_smallest`] moves the `c` smallest values of a buffer to its
//! front without sorting the rest. It is built on `select_nth_unstable_by`
//! (introselect), which runs in O(n) on average and never degrades past
//! O(n log n).

use std::cmp::Ordering;

use crate::error::{RobustFitError, Result};

/// Natural numeric order with every NaN placed after all other values.
///
/// Residual squares are never negative, but a NaN residual can still carry a
/// sign bit, so `f64::total_cmp` alone would put some NaNs first.
pub fn nan_last(a: &f64, b: &f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
}

/// Rearrange `buffer` in place so its first `c` entries are the `c` smallest.
///
/// After the call:
/// - `buffer[..c]` holds the `c` smallest values (in unspecified order),
/// - `buffer[c - 1]` is the `c`-th smallest value, i.e. the largest of the prefix,
/// - the whole buffer is a permutation of its original contents.
///
/// # Arguments
///
/// * `buffer` - The values to partially order
/// * `c` - How many of the smallest values to gather, `1 <= c <= buffer.len()`
///
/// # Returns
///
/// * `Ok(())`, or `InvalidArgument` if `c` is out of range
pub fn partial_sort_smallest(buffer: &mut [f64], c: usize) -> Result<()> {
    let n = buffer.len();
    if c == 0 || c > n {
        return Err(RobustFitError::invalid(format!(
            "retained count {} must lie in [1, {}]",
            c, n
        )));
    }

    buffer.select_nth_unstable_by(c - 1, nan_last);
    Ok(())
}
