//! Utility functions and helpers for the robustfit-rs library.

pub mod numeric;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod select;

// Re-export commonly used utilities
pub use numeric::{falling_factorial, int_pow, scaled};
pub use select::{nan_last, partial_sort_smallest};

#[cfg(feature = "parallel")]
pub use parallel::{evaluate_candidates_parallel, values_parallel};
