//! Core types for the gridspan workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! data model shared by the coordinate generators, the spatial partitioner
//! and the neighbor statistics: the [`GridError`] taxonomy, axis-aligned
//! [`Region`]s, [`Coordinates`] sets, and the option types that select how
//! a requested spacing or size is reconciled against a domain.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coordinates;
pub mod error;
pub mod options;
pub mod region;

pub use coordinates::{Coordinates, Point};
pub use error::GridError;
pub use options::{Adjust, Broadcast, SamplingOptions, Step};
pub use region::Region;
