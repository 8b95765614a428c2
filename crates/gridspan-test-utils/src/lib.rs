//! Test utilities for gridspan development.
//!
//! Provides deterministic point-cloud fixtures (see [`fixtures`]) and
//! float assertions that report the first offending index.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{collinear, lattice, seeded_cloud};

/// Assert that two slices have the same length and agree element-wise
/// within `tol` (absolute).
#[track_caller]
pub fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch: {actual:?} vs {expected:?}"
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tol,
            "element {i} differs: {a} vs {e} (tol {tol})\n  actual:   {actual:?}\n  expected: {expected:?}"
        );
    }
}

/// Assert that `values` is sorted in non-decreasing order.
#[track_caller]
pub fn assert_sorted(values: &[f64]) {
    if let Some(i) = values.windows(2).position(|w| w[0] > w[1]) {
        panic!("not sorted at {i}: {} > {}", values[i], values[i + 1]);
    }
}

/// Assert that every element of `subset` also appears in `superset`.
///
/// Both slices must be sorted ascending.
#[track_caller]
pub fn assert_subset(subset: &[usize], superset: &[usize]) {
    for value in subset {
        assert!(
            superset.binary_search(value).is_ok(),
            "{value} missing from superset {superset:?}"
        );
    }
}
