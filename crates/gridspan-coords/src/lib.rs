//! Coordinate generation for gridspan.
//!
//! Every generator in this crate is built on one 1-D primitive,
//! [`reconcile`], which turns a domain plus a requested spacing or size
//! into an exact point count and spacing. Because the line, grid, profile
//! and great-circle generators all share it, n-dimensional outputs use the
//! same rounding rules in every dimension.
//!
//! - [`line_coordinates`]: evenly spaced values on one axis
//! - [`grid_coordinates`]: dense n-dimensional grids (row-major, first
//!   dimension slowest)
//! - [`random_coordinates`] / [`random_coordinates_spherical`]: seeded
//!   uniform scatters
//! - [`profile_coordinates`] / [`great_circle_coordinates`]: points along
//!   a straight segment or a minor great-circle arc

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;
pub mod line;
pub mod profile;
pub mod random;
pub mod spherical;

pub use grid::{grid_coordinates, mesh, shape_to_spacing, spacing_to_shape, Grid};
pub use line::{line_coordinates, reconcile, LineSpec};
pub use profile::{great_circle_coordinates, profile_coordinates, Profile};
pub use random::{random_coordinates, random_coordinates_spherical};
