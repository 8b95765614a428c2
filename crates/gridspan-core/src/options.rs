//! Options that drive coordinate generation.
//!
//! A generator is configured with exactly one of a point count (`size`) or
//! a point `spacing`, plus an [`Adjust`] policy that decides which side
//! absorbs the rounding error when the spacing does not divide the domain.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;

// ── Adjust ─────────────────────────────────────────────────────────

/// Which quantity deviates from the request when a spacing does not
/// evenly divide the domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Adjust {
    /// Keep the domain bounds and shrink the spacing to fit (default).
    #[default]
    Spacing,
    /// Keep the requested spacing and grow the domain symmetrically
    /// about its centre.
    Region,
}

impl fmt::Display for Adjust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spacing => write!(f, "spacing"),
            Self::Region => write!(f, "region"),
        }
    }
}

impl FromStr for Adjust {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spacing" => Ok(Self::Spacing),
            "region" => Ok(Self::Region),
            other => Err(GridError::argument(
                "adjust",
                format!("Invalid value for 'adjust' argument '{other}'. Should be 'spacing' or 'region'"),
            )),
        }
    }
}

// ── Broadcast ──────────────────────────────────────────────────────

/// A per-dimension quantity given either once for every dimension or
/// explicitly for each one.
#[derive(Clone, Debug, PartialEq)]
pub enum Broadcast<T> {
    /// The same value in every dimension.
    All(T),
    /// One value per dimension, in region order.
    Each(Vec<T>),
}

impl<T: Copy> Broadcast<T> {
    /// Expand to exactly `ndim` values.
    ///
    /// Returns `Err(GridError::InvalidArgument)` if an explicit list does
    /// not have `ndim` entries.
    pub fn resolve(&self, ndim: usize, name: &'static str) -> Result<Vec<T>, GridError> {
        match self {
            Self::All(value) => Ok(vec![*value; ndim]),
            Self::Each(values) if values.len() == ndim => Ok(values.clone()),
            Self::Each(values) => Err(GridError::argument(
                name,
                format!(
                    "Invalid {name} with {} values. Should have {ndim} values, one per dimension",
                    values.len()
                ),
            )),
        }
    }

    /// The single value if every dimension shares it.
    pub fn uniform(&self) -> Option<T>
    where
        T: PartialEq,
    {
        match self {
            Self::All(value) => Some(*value),
            Self::Each(values) => {
                let first = *values.first()?;
                values.iter().all(|v| *v == first).then_some(first)
            }
        }
    }
}

macro_rules! impl_broadcast_from {
    ($($t:ty),*) => {$(
        impl From<$t> for Broadcast<$t> {
            fn from(value: $t) -> Self {
                Self::All(value)
            }
        }

        impl From<Vec<$t>> for Broadcast<$t> {
            fn from(values: Vec<$t>) -> Self {
                Self::Each(values)
            }
        }

        impl From<&[$t]> for Broadcast<$t> {
            fn from(values: &[$t]) -> Self {
                Self::Each(values.to_vec())
            }
        }

        impl<const N: usize> From<[$t; N]> for Broadcast<$t> {
            fn from(values: [$t; N]) -> Self {
                Self::Each(values.to_vec())
            }
        }
    )*};
}

impl_broadcast_from!(f64, usize);

// ── Step ───────────────────────────────────────────────────────────

/// The quantity that drives generation along one dimension.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Number of border-registered points.
    Size(usize),
    /// Requested distance between adjacent points.
    Spacing(f64),
}

impl Step {
    /// Check that a size is at least 1 or a spacing is finite and positive.
    pub fn validate(&self) -> Result<(), GridError> {
        match *self {
            Self::Size(0) => Err(GridError::argument(
                "size",
                "must be a positive integer, got 0",
            )),
            Self::Size(_) => Ok(()),
            Self::Spacing(s) if !s.is_finite() || s <= 0.0 => Err(GridError::argument(
                "spacing",
                format!("must be finite and positive, got {s}"),
            )),
            Self::Spacing(_) => Ok(()),
        }
    }
}

// ── SamplingOptions ────────────────────────────────────────────────

/// Configuration shared by the line, grid and profile generators.
///
/// Exactly one of `size` and `spacing` must be set.
///
/// # Examples
///
/// ```
/// use gridspan_core::{Adjust, SamplingOptions, Step};
///
/// let opts = SamplingOptions::default().spacing(2.5).adjust(Adjust::Region);
/// assert_eq!(
///     opts.resolve(2).unwrap(),
///     vec![Step::Spacing(2.5), Step::Spacing(2.5)]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SamplingOptions {
    /// Number of border-registered points per dimension.
    pub size: Option<Broadcast<usize>>,
    /// Requested spacing per dimension.
    pub spacing: Option<Broadcast<f64>>,
    /// Which quantity absorbs rounding error. Ignored when `size` is set.
    pub adjust: Adjust,
    /// Return cell centres instead of cell borders.
    pub pixel_register: bool,
}

impl SamplingOptions {
    /// Set the number of points.
    pub fn size(mut self, size: impl Into<Broadcast<usize>>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the point spacing.
    pub fn spacing(mut self, spacing: impl Into<Broadcast<f64>>) -> Self {
        self.spacing = Some(spacing.into());
        self
    }

    /// Set the adjustment policy (default: [`Adjust::Spacing`]).
    pub fn adjust(mut self, adjust: Adjust) -> Self {
        self.adjust = adjust;
        self
    }

    /// Set pixel registration (default: `false`).
    pub fn pixel_register(mut self, pixel_register: bool) -> Self {
        self.pixel_register = pixel_register;
        self
    }

    /// Check that exactly one of `size` and `spacing` is set.
    pub fn validate(&self) -> Result<(), GridError> {
        match (&self.size, &self.spacing) {
            (Some(size), Some(spacing)) => Err(GridError::argument(
                "size",
                format!(
                    "Both size ({size:?}) and spacing ({spacing:?}) provided. Only one is allowed"
                ),
            )),
            (None, None) => Err(GridError::argument(
                "size",
                "Either a size or a spacing must be provided",
            )),
            _ => Ok(()),
        }
    }

    /// Resolve into one validated [`Step`] per dimension.
    pub fn resolve(&self, ndim: usize) -> Result<Vec<Step>, GridError> {
        self.validate()?;
        let steps: Vec<Step> = match (&self.size, &self.spacing) {
            (Some(size), None) => size
                .resolve(ndim, "size")?
                .into_iter()
                .map(Step::Size)
                .collect(),
            (None, Some(spacing)) => spacing
                .resolve(ndim, "spacing")?
                .into_iter()
                .map(Step::Spacing)
                .collect(),
            _ => unreachable!("validated above"),
        };
        for step in &steps {
            step.validate()?;
        }
        Ok(steps)
    }
}
