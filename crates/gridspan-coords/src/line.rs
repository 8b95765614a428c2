//! Spacing/size reconciliation on a single axis.
//!
//! [`reconcile`] is the primitive every other generator calls once per
//! dimension. Given `[start, stop]` and either a point count or a spacing,
//! it computes the number of intervals and then, if the spacing does not
//! divide the domain, lets the [`Adjust`] policy decide what gives:
//!
//! - [`Adjust::Spacing`]: the bounds stay put and the spacing shrinks to
//!   `extent / n_intervals`.
//! - [`Adjust::Region`]: the spacing stays put and the domain grows by
//!   `n_intervals * spacing - extent`, half on each side.
//!
//! With a spacing, `n_intervals = ceil(extent / spacing)`, except that a
//! ratio within a relative `1e-9` of an integer snaps to it so that
//! `10 / 0.1` gives 100 intervals and not 101.

use gridspan_core::{Adjust, GridError, SamplingOptions, Step};
use tracing::{debug, trace};

/// Ratios this close (relative) to an integer count as exact multiples.
const SNAP_TOLERANCE: f64 = 1e-9;

/// Upper bound on intervals per axis.
const MAX_INTERVALS: f64 = (1u64 << 32) as f64;

/// The outcome of reconciling a domain with a spacing or size.
///
/// `size` is the number of border-registered points; a pixel-registered
/// line over the same domain has `size - 1` points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSpec {
    /// First border, possibly moved by [`Adjust::Region`].
    pub start: f64,
    /// Last border, possibly moved by [`Adjust::Region`].
    pub stop: f64,
    /// Number of border-registered points.
    pub size: usize,
    /// Actual distance between adjacent points (0 for a single point).
    pub spacing: f64,
}

impl LineSpec {
    /// Number of intervals between border points.
    pub fn intervals(&self) -> usize {
        self.size.saturating_sub(1)
    }

    /// Number of values [`values`](Self::values) will produce.
    pub fn len(&self, pixel_register: bool) -> usize {
        if pixel_register {
            self.intervals()
        } else {
            self.size
        }
    }

    /// Materialise the border values, or the interval centres when
    /// `pixel_register` is set.
    ///
    /// The last border value is pinned to `stop` exactly.
    pub fn values(&self, pixel_register: bool) -> Vec<f64> {
        if pixel_register {
            return (0..self.intervals())
                .map(|i| self.start + (i as f64 + 0.5) * self.spacing)
                .collect();
        }
        let mut values: Vec<f64> = (0..self.size)
            .map(|i| self.start + i as f64 * self.spacing)
            .collect();
        if self.size > 1 {
            values[self.size - 1] = self.stop;
        }
        values
    }
}

/// Reconcile `[start, stop]` with a size or spacing under `adjust`.
///
/// `adjust` only matters for [`Step::Spacing`].
///
/// # Errors
///
/// - `InvalidDomain` if a bound is not finite, `start > stop`, or
///   `start == stop` with anything other than `Step::Size(1)`.
/// - `InvalidArgument` if the size is 0, the spacing is not finite and
///   positive, or the spacing is so small the interval count overflows.
///
/// # Examples
///
/// ```
/// use gridspan_coords::reconcile;
/// use gridspan_core::{Adjust, Step};
///
/// let spec = reconcile(0.0, 10.0, Step::Spacing(2.6), Adjust::Region).unwrap();
/// assert_eq!(spec.size, 5);
/// assert!((spec.start + 0.2).abs() < 1e-12);
/// assert!((spec.stop - 10.2).abs() < 1e-12);
/// ```
pub fn reconcile(start: f64, stop: f64, step: Step, adjust: Adjust) -> Result<LineSpec, GridError> {
    step.validate()?;
    if !start.is_finite() || !stop.is_finite() {
        return Err(GridError::domain(format!(
            "Invalid domain [{start}, {stop}]. Bounds must be finite"
        )));
    }
    if start > stop {
        return Err(GridError::domain(format!(
            "Invalid domain [{start}, {stop}]. Lower bound larger than upper bound"
        )));
    }
    if start == stop && step != Step::Size(1) {
        return Err(GridError::domain(format!(
            "Invalid domain [{start}, {stop}]. A zero-width domain only admits a single point"
        )));
    }

    let extent = stop - start;
    let spec = match step {
        Step::Size(1) => LineSpec {
            start,
            stop,
            size: 1,
            spacing: 0.0,
        },
        Step::Size(size) => LineSpec {
            start,
            stop,
            size,
            spacing: extent / (size - 1) as f64,
        },
        Step::Spacing(spacing) => {
            let ratio = extent / spacing;
            if !ratio.is_finite() || ratio > MAX_INTERVALS {
                return Err(GridError::argument(
                    "spacing",
                    format!("spacing {spacing} is too small for domain [{start}, {stop}]"),
                ));
            }
            let intervals = snap_ceil(ratio);
            let n = intervals as f64;
            match adjust {
                Adjust::Spacing => LineSpec {
                    start,
                    stop,
                    size: intervals + 1,
                    spacing: extent / n,
                },
                Adjust::Region => {
                    let excess = n * spacing - extent;
                    let new_start = start - excess / 2.0;
                    LineSpec {
                        start: new_start,
                        stop: new_start + n * spacing,
                        size: intervals + 1,
                        spacing,
                    }
                }
            }
        }
    };
    trace!(
        start,
        stop,
        ?step,
        %adjust,
        size = spec.size,
        spacing = spec.spacing,
        "reconciled axis"
    );
    Ok(spec)
}

/// Ceiling of `ratio`, snapping near-integers, never below 1.
fn snap_ceil(ratio: f64) -> usize {
    let nearest = ratio.round();
    let count = if (ratio - nearest).abs() <= SNAP_TOLERANCE * nearest.max(1.0) {
        nearest
    } else {
        ratio.ceil()
    };
    (count as usize).max(1)
}

/// Reconcile one axis of a sampling request, rejecting pixel
/// registration on a single point.
pub(crate) fn reconcile_axis(
    start: f64,
    stop: f64,
    step: Step,
    adjust: Adjust,
    pixel_register: bool,
) -> Result<LineSpec, GridError> {
    if pixel_register && step == Step::Size(1) {
        return Err(GridError::argument(
            "size",
            "pixel registration needs at least 2 border points (1 interval), got size 1",
        ));
    }
    reconcile(start, stop, step, adjust)
}

/// Generate evenly spaced values between `start` and `stop`.
///
/// Driven by exactly one of `options.size` (number of border points) or
/// `options.spacing`. With `pixel_register`, the centres of the
/// intervals are returned instead, one value fewer than the borders.
///
/// # Examples
///
/// ```
/// use gridspan_coords::line_coordinates;
/// use gridspan_core::{Adjust, SamplingOptions};
///
/// let values = line_coordinates(0.0, 10.0, &SamplingOptions::default().size(5)).unwrap();
/// assert_eq!(values, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
///
/// let opts = SamplingOptions::default().spacing(2.5).pixel_register(true);
/// assert_eq!(line_coordinates(0.0, 10.0, &opts).unwrap(), vec![1.25, 3.75, 6.25, 8.75]);
///
/// let opts = SamplingOptions::default().spacing(2.6).adjust(Adjust::Region);
/// let values = line_coordinates(0.0, 10.0, &opts).unwrap();
/// assert_eq!(values.len(), 5);
/// assert!((values[0] + 0.2).abs() < 1e-12);
/// ```
pub fn line_coordinates(
    start: f64,
    stop: f64,
    options: &SamplingOptions,
) -> Result<Vec<f64>, GridError> {
    let step = options.resolve(1)?[0];
    let spec = reconcile_axis(start, stop, step, options.adjust, options.pixel_register)?;
    let values = spec.values(options.pixel_register);
    debug!(
        start = spec.start,
        stop = spec.stop,
        spacing = spec.spacing,
        count = values.len(),
        pixel_register = options.pixel_register,
        "generated line coordinates"
    );
    Ok(values)
}
