//! Nearest-neighbor distances and their reductions.

use std::fmt;
use std::str::FromStr;

use gridspan_core::{Coordinates, GridError};
use tracing::debug;

use crate::index::NeighborIndex;
use crate::kdtree::KdTree;

const OPERATION: &str = "nearest-neighbor distance";

// ── Statistic ──────────────────────────────────────────────────────

/// A reduction over the per-point neighbor distances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Statistic {
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
    /// Arithmetic mean.
    Mean,
    /// Median (mean of the two middle values for an even count).
    Median,
    /// Population standard deviation.
    Std,
    /// Population variance.
    Var,
    /// Peak to peak: `max - min`.
    Ptp,
}

impl Statistic {
    /// Every statistic, in declaration order.
    pub const ALL: [Statistic; 7] = [
        Self::Min,
        Self::Max,
        Self::Mean,
        Self::Median,
        Self::Std,
        Self::Var,
        Self::Ptp,
    ];

    /// Reduce `values`. Returns NaN for an empty slice.
    pub fn apply(self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        let n = values.len() as f64;
        let min = || values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = || values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = || values.iter().sum::<f64>() / n;
        let var = || {
            let m = mean();
            values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / n
        };
        match self {
            Self::Min => min(),
            Self::Max => max(),
            Self::Mean => mean(),
            Self::Median => median(values),
            Self::Std => var().sqrt(),
            Self::Var => var(),
            Self::Ptp => max() - min(),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Std => "std",
            Self::Var => "var",
            Self::Ptp => "ptp",
        };
        f.write_str(name)
    }
}

impl FromStr for Statistic {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stat| stat.to_string() == s)
            .ok_or_else(|| {
                GridError::argument(
                    "statistic",
                    format!(
                        "Invalid statistic '{s}'. Should be one of: min, max, mean, median, \
                         std, var, ptp"
                    ),
                )
            })
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

// ── Distances ──────────────────────────────────────────────────────

fn validate(coordinates: &Coordinates, k_nearest: usize) -> Result<(), GridError> {
    if k_nearest == 0 {
        return Err(GridError::argument(
            "k_nearest",
            "must be at least 1, got 0",
        ));
    }
    let found = coordinates.len();
    if found < k_nearest + 1 {
        return Err(GridError::InsufficientPoints {
            operation: OPERATION,
            required: k_nearest + 1,
            found,
        });
    }
    if coordinates.arrays().iter().flatten().any(|v| !v.is_finite()) {
        return Err(GridError::argument(
            "coordinates",
            "neighbor distances need finite coordinates",
        ));
    }
    Ok(())
}

/// Per-point nearest-neighbor distance.
///
/// For every point this is the median of the distances to its
/// `k_nearest` nearest other points; with `k_nearest = 1` it is the
/// plain first-nearest-neighbor distance. Uses a [`KdTree`].
///
/// # Errors
///
/// - `InvalidArgument` if `k_nearest` is 0 or a coordinate is not finite.
/// - `InsufficientPoints` if there are not more than `k_nearest` points
///   (so fewer than 2 always fails).
///
/// # Examples
///
/// ```
/// use gridspan_core::Coordinates;
/// use gridspan_neighbors::neighbor_distances;
///
/// let coords = Coordinates::from_arrays(vec![vec![0.0, 1.0, 3.0]]).unwrap();
/// assert_eq!(neighbor_distances(&coords, 1).unwrap(), vec![1.0, 1.0, 2.0]);
/// ```
pub fn neighbor_distances(
    coordinates: &Coordinates,
    k_nearest: usize,
) -> Result<Vec<f64>, GridError> {
    validate(coordinates, k_nearest)?;
    let tree = KdTree::new(coordinates);
    debug!(
        points = coordinates.len(),
        nodes = tree.node_count(),
        k_nearest,
        "built neighbor index"
    );
    Ok(distances_from(&tree, coordinates, k_nearest))
}

/// [`neighbor_distances`] with a caller-supplied index built over
/// `coordinates`.
///
/// Returns `Err(GridError::ShapeMismatch)` if the index does not hold the
/// same number of points and dimensions as `coordinates`.
pub fn neighbor_distances_with<I: NeighborIndex>(
    index: &I,
    coordinates: &Coordinates,
    k_nearest: usize,
) -> Result<Vec<f64>, GridError> {
    validate(coordinates, k_nearest)?;
    if index.len() != coordinates.len() || index.ndim() != coordinates.ndim() {
        return Err(GridError::shape(format!(
            "index holds {} points in {} dimensions but the coordinates have {} in {}",
            index.len(),
            index.ndim(),
            coordinates.len(),
            coordinates.ndim()
        )));
    }
    Ok(distances_from(index, coordinates, k_nearest))
}

fn distances_from<I: NeighborIndex>(
    index: &I,
    coordinates: &Coordinates,
    k_nearest: usize,
) -> Vec<f64> {
    coordinates
        .points()
        .enumerate()
        .map(|(i, point)| {
            let found: Vec<f64> = index
                .nearest(&point, k_nearest, Some(i))
                .iter()
                .map(|n| n.distance)
                .collect();
            median(&found)
        })
        .collect()
}

/// Reduce the per-point neighbor distances with each of `statistics`.
///
/// Returns one value per requested statistic, in request order.
///
/// # Errors
///
/// As [`neighbor_distances`], plus `InvalidArgument` if `statistics` is
/// empty.
///
/// # Examples
///
/// ```
/// use gridspan_core::Coordinates;
/// use gridspan_neighbors::{neighbor_distance_statistics, Statistic};
///
/// let coords = Coordinates::from_arrays(vec![vec![0.0, 1.0, 3.0]]).unwrap();
/// let stats = neighbor_distance_statistics(&coords, 1, &[Statistic::Min, Statistic::Max]).unwrap();
/// assert_eq!(stats, vec![1.0, 2.0]);
/// ```
pub fn neighbor_distance_statistics(
    coordinates: &Coordinates,
    k_nearest: usize,
    statistics: &[Statistic],
) -> Result<Vec<f64>, GridError> {
    if statistics.is_empty() {
        return Err(GridError::argument(
            "statistics",
            "at least one statistic must be requested",
        ));
    }
    let distances = neighbor_distances(coordinates, k_nearest)?;
    Ok(statistics.iter().map(|stat| stat.apply(&distances)).collect())
}
