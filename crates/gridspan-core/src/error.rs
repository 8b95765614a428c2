//! Error taxonomy shared by every gridspan crate.
//!
//! Every public operation validates its inputs eagerly and returns one of
//! these variants before doing any numeric work, so a failure never leaves
//! a partially built output behind.

use std::error::Error;
use std::fmt;

/// Errors from coordinate generation, partitioning and neighbor statistics.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// A region or 1-D domain is malformed: odd or zero length,
    /// non-finite bounds, or a lower bound above its upper bound.
    InvalidDomain {
        /// What went wrong.
        reason: String,
    },
    /// An argument is out of range or conflicts with another argument,
    /// e.g. both (or neither) of size and spacing were given.
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// What went wrong.
        reason: String,
    },
    /// Coordinate arrays (or points) do not have matching shapes.
    ShapeMismatch {
        /// Description of the mismatch.
        reason: String,
    },
    /// A unique interpolation path does not exist, e.g. antipodal or
    /// coincident endpoints.
    DegenerateGeometry {
        /// Description of the degeneracy.
        reason: String,
    },
    /// Fewer points than the operation requires.
    InsufficientPoints {
        /// The operation that was attempted.
        operation: &'static str,
        /// Minimum number of points required.
        required: usize,
        /// Number of points supplied.
        found: usize,
    },
}

impl GridError {
    /// Shorthand for [`GridError::InvalidDomain`].
    pub fn domain(reason: impl Into<String>) -> Self {
        Self::InvalidDomain {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`GridError::InvalidArgument`].
    pub fn argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`GridError::ShapeMismatch`].
    pub fn shape(reason: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`GridError::DegenerateGeometry`].
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { reason } => write!(f, "invalid domain: {reason}"),
            Self::InvalidArgument { name, reason } => {
                write!(f, "invalid argument '{name}': {reason}")
            }
            Self::ShapeMismatch { reason } => write!(f, "shape mismatch: {reason}"),
            Self::DegenerateGeometry { reason } => {
                write!(f, "degenerate geometry: {reason}")
            }
            Self::InsufficientPoints {
                operation,
                required,
                found,
            } => write!(
                f,
                "{operation} requires at least {required} points, got {found}"
            ),
        }
    }
}

impl Error for GridError {}
