//! Dense n-dimensional grids.
//!
//! # Ordering
//!
//! Dimensions follow the region order. A grid with axes of lengths
//! `[N_1, ..., N_D]` has that shape and is stored row-major: the first
//! dimension varies slowest and the last fastest, so cell `(i_1, ..., i_D)`
//! sits at flat index `sum(i_k * stride_k)` with
//! `stride_k = N_{k+1} * ... * N_D`. Block labels in `gridspan-split` use the
//! same flattening.

use gridspan_core::{Adjust, Broadcast, Coordinates, GridError, Region, SamplingOptions, Step};
use tracing::debug;

use crate::line::{reconcile, reconcile_axis};

/// A generated grid and the geometry that was actually used.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    /// Dense coordinates, one array per dimension, shaped like the grid.
    pub coordinates: Coordinates,
    /// The 1-D coordinate values along each axis.
    pub axes: Vec<Vec<f64>>,
    /// Actual spacing along each axis.
    pub spacing: Vec<f64>,
    /// Actual region: the input region, grown per axis by
    /// [`Adjust::Region`] where the spacing did not fit.
    pub region: Region,
}

impl Grid {
    /// Number of grid points along each axis.
    pub fn shape(&self) -> &[usize] {
        self.coordinates.shape()
    }
}

/// Row-major strides for `shape` (last dimension has stride 1).
pub(crate) fn strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; shape.len()];
    for k in (0..shape.len().saturating_sub(1)).rev() {
        strides[k] = strides[k + 1] * shape[k + 1];
    }
    strides
}

/// Outer product of 1-D axes into dense coordinate arrays.
///
/// The result has shape `[axes[0].len(), ..., axes[D-1].len()]` and
/// `coordinates.array(k)[flat] == axes[k][i_k]` for the multi-index of
/// `flat` in row-major order.
///
/// # Examples
///
/// ```
/// use gridspan_coords::mesh;
///
/// let grid = mesh(&[vec![0.0, 1.0], vec![5.0, 6.0, 7.0]]).unwrap();
/// assert_eq!(grid.shape(), &[2, 3]);
/// assert_eq!(grid.array(0), &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
/// assert_eq!(grid.array(1), &[5.0, 6.0, 7.0, 5.0, 6.0, 7.0]);
/// ```
pub fn mesh(axes: &[Vec<f64>]) -> Result<Coordinates, GridError> {
    let shape: Vec<usize> = axes.iter().map(Vec::len).collect();
    let total = shape
        .iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n))
        .ok_or_else(|| GridError::argument("shape", format!("grid shape {shape:?} overflows")))?;
    let strides = strides(&shape);
    let arrays = axes
        .iter()
        .zip(&strides)
        .map(|(axis, &stride)| {
            (0..total)
                .map(|flat| axis[(flat / stride) % axis.len()])
                .collect()
        })
        .collect();
    Coordinates::new(&shape, arrays)
}

/// Generate a dense grid over `region`.
///
/// The spacing or size in `options` may be shared by every dimension or
/// given per dimension (in region order). Each axis is reconciled
/// independently with the same [`Adjust`] policy and pixel registration.
///
/// # Examples
///
/// ```
/// use gridspan_coords::grid_coordinates;
/// use gridspan_core::{Region, SamplingOptions};
///
/// let region = Region::new([0.0, 5.0, 0.0, 10.0]).unwrap();
/// let grid = grid_coordinates(&region, &SamplingOptions::default().spacing(2.5)).unwrap();
/// assert_eq!(grid.shape(), &[3, 5]);
/// assert_eq!(grid.axes[0], vec![0.0, 2.5, 5.0]);
/// // The last dimension varies fastest.
/// assert_eq!(&grid.coordinates.array(1)[..5], &[0.0, 2.5, 5.0, 7.5, 10.0]);
/// ```
pub fn grid_coordinates(region: &Region, options: &SamplingOptions) -> Result<Grid, GridError> {
    let steps = options.resolve(region.ndim())?;
    let mut axes = Vec::with_capacity(steps.len());
    let mut spacing = Vec::with_capacity(steps.len());
    let mut bounds = Vec::with_capacity(2 * steps.len());
    for ((lo, hi), step) in region.pairs().zip(steps) {
        let fit = reconcile_axis(lo, hi, step, options.adjust, options.pixel_register)?;
        axes.push(fit.values(options.pixel_register));
        spacing.push(fit.spacing);
        bounds.push(fit.start);
        bounds.push(fit.stop);
    }
    let coordinates = mesh(&axes)?;
    let region = Region::new(bounds)?;
    debug!(
        shape = ?coordinates.shape(),
        ?spacing,
        %region,
        pixel_register = options.pixel_register,
        "generated grid coordinates"
    );
    Ok(Grid {
        coordinates,
        axes,
        spacing,
        region,
    })
}

/// Grid shape that [`grid_coordinates`] would produce for `spacing`,
/// together with the (possibly adjusted) region.
///
/// # Examples
///
/// ```
/// use gridspan_coords::spacing_to_shape;
/// use gridspan_core::{Adjust, Region};
///
/// let region = Region::new([-5.0, 0.0, 5.0, 10.0]).unwrap();
/// let (shape, adjusted) = spacing_to_shape(&region, 2.6, Adjust::Region, false).unwrap();
/// assert_eq!(shape, vec![3, 3]);
/// assert!((adjusted.bounds(0).1 - 0.1).abs() < 1e-12);
/// ```
pub fn spacing_to_shape(
    region: &Region,
    spacing: impl Into<Broadcast<f64>>,
    adjust: Adjust,
    pixel_register: bool,
) -> Result<(Vec<usize>, Region), GridError> {
    let spacing = spacing.into().resolve(region.ndim(), "spacing")?;
    let mut shape = Vec::with_capacity(spacing.len());
    let mut bounds = Vec::with_capacity(2 * spacing.len());
    for ((lo, hi), s) in region.pairs().zip(spacing) {
        let fit = reconcile(lo, hi, Step::Spacing(s), adjust)?;
        shape.push(fit.len(pixel_register));
        bounds.push(fit.start);
        bounds.push(fit.stop);
    }
    Ok((shape, Region::new(bounds)?))
}

/// Spacing of a grid with `shape` points per axis over `region`.
///
/// With `pixel_register`, `shape` counts cell centres, so the spacing is
/// `extent / n`; otherwise it counts borders and the spacing is
/// `extent / (n - 1)`.
///
/// # Errors
///
/// `InvalidArgument` if a border-registered axis has fewer than 2 points
/// or a pixel-registered axis has none; `InvalidDomain` if an axis has
/// zero extent.
pub fn shape_to_spacing(
    region: &Region,
    shape: impl Into<Broadcast<usize>>,
    pixel_register: bool,
) -> Result<Vec<f64>, GridError> {
    let shape = shape.into().resolve(region.ndim(), "shape")?;
    let borders = if pixel_register { 1 } else { 0 };
    region
        .pairs()
        .zip(shape)
        .map(|((lo, hi), n)| {
            if n + borders < 2 {
                return Err(GridError::argument(
                    "shape",
                    format!("cannot derive a spacing from {n} point(s) per axis"),
                ));
            }
            Ok(reconcile(lo, hi, Step::Size(n + borders), Adjust::Spacing)?.spacing)
        })
        .collect()
}
