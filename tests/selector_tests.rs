//! Property tests for the order-statistics selector.

use robustfit_rs::utils::{nan_last, partial_sort_smallest};

use crate::test_helpers::{random_values, seeded_rng};

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(nan_last);
    v
}

#[test]
fn test_prefix_holds_the_smallest_values() {
    let mut rng = seeded_rng(1);
    for n in [1, 2, 3, 7, 64, 257] {
        let values = random_values(&mut rng, n, -100.0, 100.0);
        let reference = sorted(&values);

        for c in [1, n / 2 + 1, n] {
            let mut buffer = values.clone();
            partial_sort_smallest(&mut buffer, c).unwrap();

            // the c-th smallest value sits at c - 1
            assert_eq!(buffer[c - 1], reference[c - 1]);
            assert!(buffer[..c].iter().all(|&v| v <= reference[c - 1]));
            assert!(buffer[c..].iter().all(|&v| v >= reference[c - 1]));

            // the buffer is a permutation of the input
            assert_eq!(sorted(&buffer), reference);
        }
    }
}

#[test]
fn test_duplicates() {
    let mut buffer = [3.0, 1.0, 3.0, 1.0, 2.0, 3.0];
    partial_sort_smallest(&mut buffer, 4).unwrap();
    assert_eq!(buffer[3], 3.0);
    assert_eq!(sorted(&buffer[..4]), vec![1.0, 1.0, 2.0, 3.0]);
}

#[test]
fn test_nan_is_selected_last() {
    let mut buffer = [f64::NAN, 2.0, -f64::NAN, 1.0];
    partial_sort_smallest(&mut buffer, 2).unwrap();
    assert_eq!(sorted(&buffer[..2]), vec![1.0, 2.0]);
    assert!(buffer[2..].iter().all(|v| v.is_nan()));
}

#[test]
fn test_out_of_range_counts() {
    let mut buffer = [1.0, 2.0];
    assert!(partial_sort_smallest(&mut buffer, 0).is_err());
    assert!(partial_sort_smallest(&mut buffer, 3).is_err());
    let mut empty: [f64; 0] = [];
    assert!(partial_sort_smallest(&mut empty, 1).is_err());
}
