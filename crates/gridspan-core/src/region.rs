//! Axis-aligned bounding regions.
//!
//! A region is a flat sequence `[min_1, max_1, ..., min_D, max_D]`. The
//! constructor enforces the invariants once so downstream code can index
//! bounds without re-checking them.

use std::fmt;

use smallvec::SmallVec;

use crate::coordinates::Coordinates;
use crate::error::GridError;
use crate::options::Broadcast;

/// A validated D-dimensional axis-aligned bounding box.
///
/// # Examples
///
/// ```
/// use gridspan_core::Region;
///
/// let region = Region::new([0.0, 10.0, -5.0, 5.0]).unwrap();
/// assert_eq!(region.ndim(), 2);
/// assert_eq!(region.bounds(1), (-5.0, 5.0));
/// assert!(Region::new([1.0, 0.0]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    bounds: SmallVec<[f64; 6]>,
}

impl Region {
    /// Build a region from a flat bounds sequence.
    ///
    /// Returns `Err(GridError::InvalidDomain)` if the sequence is empty,
    /// has odd length, contains a non-finite value, or any lower bound is
    /// larger than its upper bound.
    pub fn new(bounds: impl AsRef<[f64]>) -> Result<Self, GridError> {
        let bounds = bounds.as_ref();
        if bounds.is_empty() || bounds.len() % 2 != 0 {
            return Err(GridError::domain(format!(
                "Invalid region {bounds:?}. Must have an even number of elements, \
                 a lower and an upper boundary for each dimension"
            )));
        }
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(GridError::domain(format!(
                "Invalid region {bounds:?}. All boundaries must be finite"
            )));
        }
        let bad: Vec<String> = bounds
            .chunks_exact(2)
            .enumerate()
            .filter(|(_, pair)| pair[0] > pair[1])
            .map(|(dim, pair)| format!("{dim} ({} > {})", pair[0], pair[1]))
            .collect();
        if !bad.is_empty() {
            return Err(GridError::domain(format!(
                "Invalid region {bounds:?}. Lower boundary larger than upper boundary \
                 in dimension(s): {}",
                bad.join("; ")
            )));
        }
        Ok(Self {
            bounds: SmallVec::from_slice(bounds),
        })
    }

    /// Bounding region of a coordinate set.
    ///
    /// Returns `Err(GridError::InsufficientPoints)` for an empty set.
    pub fn from_coordinates(coordinates: &Coordinates) -> Result<Self, GridError> {
        if coordinates.is_empty() {
            return Err(GridError::InsufficientPoints {
                operation: "bounding region",
                required: 1,
                found: 0,
            });
        }
        let mut bounds = SmallVec::<[f64; 6]>::with_capacity(2 * coordinates.ndim());
        for axis in coordinates.arrays() {
            let (lo, hi) = axis
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            bounds.push(lo);
            bounds.push(hi);
        }
        Self::new(bounds)
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.bounds.len() / 2
    }

    /// `(min, max)` of dimension `dim`.
    ///
    /// # Panics
    ///
    /// Panics if `dim >= self.ndim()`.
    pub fn bounds(&self, dim: usize) -> (f64, f64) {
        (self.bounds[2 * dim], self.bounds[2 * dim + 1])
    }

    /// Iterate `(min, max)` pairs in dimension order.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.bounds.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// `max - min` of dimension `dim`.
    pub fn extent(&self, dim: usize) -> f64 {
        let (lo, hi) = self.bounds(dim);
        hi - lo
    }

    /// The flat bounds sequence.
    pub fn as_slice(&self) -> &[f64] {
        &self.bounds
    }

    /// Extend every boundary outwards by `pad` (per dimension or shared).
    ///
    /// Negative padding shrinks the region and fails with
    /// `InvalidDomain` if that would invert a dimension.
    pub fn pad(&self, pad: impl Into<Broadcast<f64>>) -> Result<Self, GridError> {
        let pad = pad.into().resolve(self.ndim(), "pad")?;
        let padded: SmallVec<[f64; 6]> = self
            .pairs()
            .zip(pad)
            .flat_map(|((lo, hi), p)| [lo - p, hi + p])
            .collect();
        Self::new(padded)
    }

    /// Whether `point` lies inside the region (boundaries inclusive).
    ///
    /// Points with the wrong number of dimensions are never inside.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.ndim()
            && self
                .pairs()
                .zip(point)
                .all(|((lo, hi), &v)| v >= lo && v <= hi)
    }

    /// Membership mask for every point of a coordinate set.
    pub fn inside(&self, coordinates: &Coordinates) -> Result<Vec<bool>, GridError> {
        if coordinates.ndim() != self.ndim() {
            return Err(GridError::shape(format!(
                "coordinates have {} dimensions but the region has {}",
                coordinates.ndim(),
                self.ndim()
            )));
        }
        Ok(coordinates
            .points()
            .map(|point| self.contains(&point))
            .collect())
    }

    /// Check that the region is a valid geographic `[W, E, S, N]` box.
    ///
    /// Longitudes must lie in `[-180, 360]` and span at most 360 degrees;
    /// latitudes must lie in `[-90, 90]`. Extra dimensions (e.g. a radius
    /// or height pair) are not checked.
    pub fn check_geographic(&self) -> Result<(), GridError> {
        if self.ndim() < 2 {
            return Err(GridError::domain(format!(
                "Invalid geographic region {:?}. Must have at least longitude and latitude bounds",
                self.as_slice()
            )));
        }
        let (west, east) = self.bounds(0);
        let (south, north) = self.bounds(1);
        if west < -180.0 || east > 360.0 || east - west > 360.0 {
            return Err(GridError::domain(format!(
                "Invalid longitude range [{west}, {east}]. Longitudes must be in [-180, 360] \
                 and span at most 360 degrees"
            )));
        }
        if south < -90.0 || north > 90.0 {
            return Err(GridError::domain(format!(
                "Invalid latitude range [{south}, {north}]. Latitudes must be in [-90, 90]"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, b) in self.bounds.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{b}")?;
        }
        write!(f, ")")
    }
}

impl TryFrom<&[f64]> for Region {
    type Error = GridError;

    fn try_from(bounds: &[f64]) -> Result<Self, Self::Error> {
        Self::new(bounds)
    }
}

impl TryFrom<Vec<f64>> for Region {
    type Error = GridError;

    fn try_from(bounds: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(bounds)
    }
}
