//! Nearest-neighbor distances and their summary statistics.
//!
//! [`neighbor_distances`] finds, for every point, the distances to its `k`
//! nearest *other* points and keeps their median. A point is never its own
//! neighbor, but a distinct point at the same location is, at distance 0.
//! [`neighbor_distance_statistics`] reduces that array with one or more
//! [`Statistic`]s.
//!
//! Queries go through the [`NeighborIndex`] trait. The default index is a
//! [`KdTree`] built fresh for each call; [`BruteForce`] is the quadratic
//! reference implementation and can be swapped in with
//! [`neighbor_distances_with`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod index;
pub mod kdtree;
pub mod statistics;

pub use index::{BruteForce, Neighbor, NeighborIndex};
pub use kdtree::KdTree;
pub use statistics::{
    neighbor_distance_statistics, neighbor_distances, neighbor_distances_with, Statistic,
};
