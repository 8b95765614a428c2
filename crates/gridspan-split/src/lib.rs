//! Spatial partitioning of point clouds.
//!
//! - [`block_split`]: label every point with the regular block it falls in
//! - [`rolling_window`] / [`rolling_window_spherical`]: fixed-size,
//!   possibly overlapping windows on a regular grid of centres
//! - [`expanding_window`]: nested windows of growing size around one centre
//!
//! Block and window centres come from the same reconciler as
//! `gridspan_coords::grid_coordinates`, and are laid out row-major with
//! the first dimension varying slowest. Block labels and window order use
//! that same flattening.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod expanding;
pub mod options;
pub mod rolling;

pub use block::{block_split, BlockSplit};
pub use expanding::expanding_window;
pub use options::{BlockOptions, RollingWindowOptions, WindowPlacement};
pub use rolling::{rolling_window, rolling_window_spherical, RollingWindows};
