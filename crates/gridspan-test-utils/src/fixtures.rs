//! Deterministic point clouds.
//!
//! - [`seeded_cloud`]: uniform scatter inside a region from a ChaCha8 seed.
//! - [`lattice`]: exact integer lattice with a known spacing.
//! - [`collinear`]: points on the first axis at given positions.

use gridspan_core::{Coordinates, Region};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// `n` points drawn uniformly inside `region` with a fixed seed.
///
/// Independent of the library's own generators, so tests can compare
/// against it.
pub fn seeded_cloud(region: &Region, n: usize, seed: u64) -> Coordinates {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let arrays = region
        .pairs()
        .map(|(lo, hi)| (0..n).map(|_| lo + (hi - lo) * rng.random::<f64>()).collect())
        .collect();
    Coordinates::from_arrays(arrays).expect("fixture arrays share a length")
}

/// A 2-D lattice of `nx * ny` points with unit spacing starting at the
/// origin, x varying slowest.
pub fn lattice(nx: usize, ny: usize) -> Coordinates {
    let mut x = Vec::with_capacity(nx * ny);
    let mut y = Vec::with_capacity(nx * ny);
    for i in 0..nx {
        for j in 0..ny {
            x.push(i as f64);
            y.push(j as f64);
        }
    }
    Coordinates::from_arrays(vec![x, y]).expect("fixture arrays share a length")
}

/// Points on the first axis of a `ndim`-dimensional space; other
/// coordinates are zero.
pub fn collinear(positions: &[f64], ndim: usize) -> Coordinates {
    let mut arrays = vec![vec![0.0; positions.len()]; ndim.max(1)];
    arrays[0] = positions.to_vec();
    Coordinates::from_arrays(arrays).expect("fixture arrays share a length")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_cloud_is_reproducible_and_inside() {
        let region = Region::new([0.0, 1.0, 10.0, 20.0]).unwrap();
        let a = seeded_cloud(&region, 100, 5);
        assert_eq!(a, seeded_cloud(&region, 100, 5));
        assert!(region.inside(&a).unwrap().into_iter().all(|b| b));
    }

    #[test]
    fn lattice_order() {
        let c = lattice(2, 3);
        assert_eq!(c.array(0), &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(c.array(1), &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn collinear_pads_with_zeros() {
        let c = collinear(&[0.0, 1.0, 3.0], 2);
        assert_eq!(c.array(0), &[0.0, 1.0, 3.0]);
        assert_eq!(c.array(1), &[0.0; 3]);
    }
}
