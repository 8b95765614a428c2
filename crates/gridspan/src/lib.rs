//! gridspan: reproducible coordinate grids, profiles, spatial blocking and
//! nearest-neighbor statistics.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all gridspan sub-crates. For most users, adding `gridspan` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use gridspan::prelude::*;
//!
//! // A 1 km grid over a 10 x 5 km region, adjusting the region so the
//! // spacing is kept exactly.
//! let region = Region::new([0.0, 10_000.0, 0.0, 5_000.0]).unwrap();
//! let opts = SamplingOptions::default().spacing(1_000.0).adjust(Adjust::Region);
//! let grid = grid_coordinates(&region, &opts).unwrap();
//! assert_eq!(grid.shape(), &[11, 6]);
//!
//! // Scatter some points, bin them into 2.5 km blocks and summarise
//! // their spacing.
//! let points = random_coordinates(&region, 200, Some(42)).unwrap();
//! let blocks = block_split(&points, &BlockOptions::default().size(2_500.0)).unwrap();
//! assert!(blocks.labels.iter().all(|&label| label < blocks.nblocks()));
//!
//! let stats = neighbor_distance_statistics(&points, 1, &[Statistic::Mean]).unwrap();
//! assert!(stats[0] > 0.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for items not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gridspan-core` | Errors, regions, coordinate sets, sampling options |
//! | [`coords`] | `gridspan-coords` | Line, grid, random, profile and great-circle generators |
//! | [`split`] | `gridspan-split` | Block splitting, rolling and expanding windows |
//! | [`neighbors`] | `gridspan-neighbors` | Neighbor indices and distance statistics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core data model (`gridspan-core`).
///
/// Contains the [`types::GridError`] taxonomy, [`types::Region`],
/// [`types::Coordinates`] and the option types that steer reconciliation.
pub use gridspan_core as types;

/// Coordinate generators (`gridspan-coords`).
///
/// Every generator shares the 1-D reconciler [`coords::reconcile`]; unit
/// sphere helpers live in [`coords::spherical`].
pub use gridspan_coords as coords;

/// Spatial partitioning (`gridspan-split`).
pub use gridspan_split as split;

/// Nearest-neighbor indices and distance statistics (`gridspan-neighbors`).
///
/// The [`neighbors::NeighborIndex`] trait is the seam for alternative
/// spatial indices.
pub use gridspan_neighbors as neighbors;

/// Common imports for typical gridspan usage.
///
/// ```rust
/// use gridspan::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use gridspan_core::{Adjust, Broadcast, Coordinates, Region, SamplingOptions};

    // Errors
    pub use gridspan_core::GridError;

    // Generators
    pub use gridspan_coords::{
        great_circle_coordinates, grid_coordinates, line_coordinates, profile_coordinates,
        random_coordinates, random_coordinates_spherical, Grid, Profile,
    };

    // Partitioning
    pub use gridspan_split::{
        block_split, expanding_window, rolling_window, rolling_window_spherical, BlockOptions,
        RollingWindowOptions,
    };

    // Neighbors
    pub use gridspan_neighbors::{
        neighbor_distance_statistics, neighbor_distances, NeighborIndex, Statistic,
    };
}
