//! Benchmark profiles for the gridspan toolkit.
//!
//! Provides fixed inputs shared by the Criterion benches:
//!
//! - [`reference_region`]: a 100 x 100 km projected region
//! - [`reference_grid_options`]: 100 m spacing over it (~1M nodes)
//! - [`reference_cloud`]: seeded scattered points inside the region
//! - [`geographic_cloud`]: seeded points uniform on the sphere

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gridspan_core::{Adjust, Coordinates, Region, SamplingOptions};
use gridspan_coords::{random_coordinates, random_coordinates_spherical};

/// Side length of [`reference_region`], in metres.
pub const REFERENCE_EXTENT: f64 = 100_000.0;

/// West, east, south, north bounds of a square projected region.
pub fn reference_region() -> Region {
    Region::new([0.0, REFERENCE_EXTENT, 0.0, REFERENCE_EXTENT])
        .expect("reference region bounds are ordered and finite")
}

/// 100 m node spacing, adjusting the region so the spacing is exact.
pub fn reference_grid_options() -> SamplingOptions {
    SamplingOptions::default()
        .spacing(100.0)
        .adjust(Adjust::Region)
}

/// `n` points drawn uniformly from [`reference_region`].
pub fn reference_cloud(n: usize, seed: u64) -> Coordinates {
    random_coordinates(&reference_region(), n, Some(seed))
        .expect("reference region is valid for sampling")
}

/// `n` points drawn uniformly over the whole globe, in degrees.
pub fn geographic_cloud(n: usize, seed: u64) -> Coordinates {
    let globe = Region::new([-180.0, 180.0, -90.0, 90.0])
        .expect("global bounds are ordered and finite");
    random_coordinates_spherical(&globe, n, Some(seed))
        .expect("global bounds are geographic")
}
