//! Rolling windows on a regular grid of centres.
//!
//! Centres are placed like a border-registered grid over the region
//! shrunk by half a window on every side, so every window lies inside the
//! region. A window exactly as wide as the region leaves a single centre in
//! that dimension. So does a dimension where the region has zero width:
//! any window size fits there, and the centre sits on the only value.

use gridspan_coords::spherical::angular_distance;
use gridspan_coords::{mesh, reconcile};
use gridspan_core::{Adjust, Coordinates, GridError, Region, Step};
use tracing::{debug, trace};

use crate::options::{RollingWindowOptions, WindowPlacement};

/// Relative tolerance under which a window counts as filling its region.
const FIT_TOLERANCE: f64 = 1e-9;

/// Window centres and the points each window holds.
#[derive(Clone, Debug, PartialEq)]
pub struct RollingWindows {
    /// Window centres, shaped like the grid of windows.
    pub centers: Coordinates,
    /// Ascending point indices for each window, in flat centre order.
    pub indices: Vec<Vec<usize>>,
}

impl RollingWindows {
    /// Number of windows.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether there are no windows.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Shape of the grid of windows.
    pub fn shape(&self) -> &[usize] {
        self.centers.shape()
    }
}

fn resolve_region(
    coordinates: &Coordinates,
    region: Option<&Region>,
) -> Result<Region, GridError> {
    let region = match region {
        Some(region) => region.clone(),
        None => Region::from_coordinates(coordinates)?,
    };
    if region.ndim() != coordinates.ndim() {
        return Err(GridError::shape(format!(
            "Region {region} has {} dimensions but the coordinates have {}",
            region.ndim(),
            coordinates.ndim()
        )));
    }
    Ok(region)
}

/// Window centres along each dimension of `region`.
fn center_axes(
    region: &Region,
    size: &[f64],
    placement: &WindowPlacement,
    adjust: Adjust,
) -> Result<Vec<Vec<f64>>, GridError> {
    region
        .pairs()
        .zip(size)
        .enumerate()
        .map(|(dim, ((lo, hi), &size))| {
            let extent = hi - lo;
            if extent > 0.0 && size > extent * (1.0 + FIT_TOLERANCE) {
                return Err(GridError::argument(
                    "size",
                    format!(
                        "Invalid window size '{size}' in dimension {dim}. Must be no larger \
                         than the region extent {extent}"
                    ),
                ));
            }
            let (start, stop) = (lo + size / 2.0, hi - size / 2.0);
            let step = match placement {
                WindowPlacement::Spacing(spacing) => Step::Spacing(spacing[dim]),
                WindowPlacement::Shape(shape) => Step::Size(shape[dim]),
                WindowPlacement::Overlap(overlap) => Step::Spacing(size * (1.0 - overlap)),
            };
            step.validate()?;
            // Also true for a flat dimension, where `stop < start`.
            if stop - start <= FIT_TOLERANCE * extent.max(size) {
                if let Step::Size(n) = step {
                    if n > 1 {
                        return Err(GridError::argument(
                            "shape",
                            format!(
                                "Invalid window shape {n} in dimension {dim}. A window of size \
                                 {size} fits only once in the region"
                            ),
                        ));
                    }
                }
                let center = (lo + hi) / 2.0;
                trace!(dim, center, "single window centre");
                return Ok(vec![center]);
            }
            if step == Step::Size(1) {
                return Ok(vec![(start + stop) / 2.0]);
            }
            let fit = reconcile(start, stop, step, adjust)?;
            trace!(dim, count = fit.size, spacing = fit.spacing, "window centres");
            Ok(fit.values(false))
        })
        .collect()
}

/// Point indices sorted by one coordinate, for range queries along it.
struct SortedAxis<'a> {
    values: &'a [f64],
    order: Vec<usize>,
}

impl<'a> SortedAxis<'a> {
    fn new(values: &'a [f64]) -> Self {
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        Self { values, order }
    }

    /// Indices whose value lies in `[lo, hi]`.
    fn range(&self, lo: f64, hi: f64) -> &[usize] {
        let first = self.order.partition_point(|&i| self.values[i] < lo);
        let last = self.order.partition_point(|&i| self.values[i] <= hi);
        &self.order[first..last.max(first)]
    }
}

/// Split points into fixed-size, possibly overlapping windows.
///
/// Each window is an axis-aligned box of width `size` (per dimension)
/// around its centre; a point belongs to every window whose box contains
/// it, borders included. With the default placement adjacent windows touch
/// without overlapping; `overlap`, `spacing` or `shape` in `options`
/// change the centre spacing.
///
/// # Errors
///
/// - `InvalidArgument` for invalid options or a window larger than the
///   region ("Invalid window size"). Flat dimensions of the region are
///   exempt from the size check; there a `shape` above 1 is rejected.
/// - `InsufficientPoints` if no region is given and there are no points.
/// - `ShapeMismatch` if the region and coordinates differ in dimension.
///
/// # Examples
///
/// ```
/// use gridspan_core::Coordinates;
/// use gridspan_split::{rolling_window, RollingWindowOptions};
///
/// let coords = Coordinates::from_arrays(vec![vec![0.0, 1.0, 2.0, 3.0, 4.0]]).unwrap();
/// let windows = rolling_window(&coords, &RollingWindowOptions::new(2.0).overlap(0.5)).unwrap();
/// assert_eq!(windows.centers.array(0), &[1.0, 2.0, 3.0]);
/// assert_eq!(windows.indices, vec![vec![0, 1, 2], vec![1, 2, 3], vec![2, 3, 4]]);
/// ```
pub fn rolling_window(
    coordinates: &Coordinates,
    options: &RollingWindowOptions,
) -> Result<RollingWindows, GridError> {
    let region = resolve_region(coordinates, options.region.as_ref())?;
    let (size, placement) = options.resolve(region.ndim())?;
    let axes = center_axes(&region, &size, &placement, options.adjust)?;
    let centers = mesh(&axes)?;

    let first = SortedAxis::new(coordinates.array(0));
    let indices: Vec<Vec<usize>> = centers
        .points()
        .map(|center| {
            let half = size[0] / 2.0;
            let mut members: Vec<usize> = first
                .range(center[0] - half, center[0] + half)
                .iter()
                .copied()
                .filter(|&i| {
                    (1..center.len()).all(|dim| {
                        (coordinates.array(dim)[i] - center[dim]).abs() <= size[dim] / 2.0
                    })
                })
                .collect();
            members.sort_unstable();
            members
        })
        .collect();
    debug!(
        points = coordinates.len(),
        windows = indices.len(),
        shape = ?centers.shape(),
        ?size,
        "built rolling windows"
    );
    Ok(RollingWindows { centers, indices })
}

/// Rolling windows on the sphere.
///
/// Coordinates are `(longitude, latitude)` in degrees. Centres are placed
/// exactly as in [`rolling_window`], treating degrees as Cartesian units.
/// A point belongs to a window when its great-circle angular distance from
/// the centre is at most `size / 2` degrees, so `size` must be the same in
/// both dimensions.
///
/// # Errors
///
/// As [`rolling_window`], plus `InvalidArgument` if `size` differs between
/// dimensions and `InvalidDomain` if the region is not geographic.
///
/// # Examples
///
/// ```
/// use gridspan_core::{Coordinates, Region};
/// use gridspan_split::{rolling_window_spherical, RollingWindowOptions};
///
/// let coords = Coordinates::from_arrays(vec![vec![1.0, 5.0, 9.0], vec![0.0, 0.0, 0.0]]).unwrap();
/// let opts = RollingWindowOptions::new(10.0)
///     .region(Region::new([0.0, 10.0, -5.0, 5.0]).unwrap());
/// let windows = rolling_window_spherical(&coords, &opts).unwrap();
/// assert_eq!(windows.len(), 1);
/// assert_eq!(windows.indices[0], vec![0, 1, 2]);
/// ```
pub fn rolling_window_spherical(
    coordinates: &Coordinates,
    options: &RollingWindowOptions,
) -> Result<RollingWindows, GridError> {
    let Some(size) = options.size.uniform() else {
        return Err(GridError::argument(
            "size",
            format!(
                "spherical windows need a single size for both dimensions, got {:?}",
                options.size
            ),
        ));
    };
    if coordinates.ndim() != 2 {
        return Err(GridError::shape(format!(
            "spherical windows need (longitude, latitude) coordinates, got {} arrays",
            coordinates.ndim()
        )));
    }
    let region = resolve_region(coordinates, options.region.as_ref())?;
    region.check_geographic()?;
    let (sizes, placement) = options.resolve(2)?;
    let axes = center_axes(&region, &sizes, &placement, options.adjust)?;
    let centers = mesh(&axes)?;

    let radius = size / 2.0;
    let longitude = coordinates.array(0);
    // Angular distance is never smaller than the latitude difference.
    let latitude = SortedAxis::new(coordinates.array(1));
    let indices: Vec<Vec<usize>> = centers
        .points()
        .map(|center| {
            let mut members: Vec<usize> = latitude
                .range(center[1] - radius, center[1] + radius)
                .iter()
                .copied()
                .filter(|&i| {
                    angular_distance((longitude[i], latitude.values[i]), (center[0], center[1]))
                        <= radius
                })
                .collect();
            members.sort_unstable();
            members
        })
        .collect();
    debug!(
        points = coordinates.len(),
        windows = indices.len(),
        shape = ?centers.shape(),
        size,
        "built spherical rolling windows"
    );
    Ok(RollingWindows { centers, indices })
}
