//! Expanding windows around a single centre.

use gridspan_core::{Coordinates, GridError};
use tracing::debug;

/// Indices of the points inside boxes of growing size around `center`.
///
/// Window `k` is the axis-aligned box of half-width `sizes[k] / 2` in
/// every dimension; borders are included. Indices are ascending. When
/// `sizes` increase, each window's indices are a superset of the previous
/// window's. A point with a NaN coordinate is in no window.
///
/// # Errors
///
/// - `ShapeMismatch` if `center` and the coordinates differ in dimension.
/// - `InvalidArgument` if a size is not finite and positive, or the
///   centre is not finite.
///
/// # Examples
///
/// ```
/// use gridspan_core::Coordinates;
/// use gridspan_split::expanding_window;
///
/// let coords = Coordinates::from_arrays(vec![vec![0.0, 1.0, -2.0, 4.0]]).unwrap();
/// let windows = expanding_window(&coords, &[0.0], &[1.0, 4.0, 10.0]).unwrap();
/// assert_eq!(windows, vec![vec![0], vec![0, 1, 2], vec![0, 1, 2, 3]]);
/// ```
pub fn expanding_window(
    coordinates: &Coordinates,
    center: &[f64],
    sizes: &[f64],
) -> Result<Vec<Vec<usize>>, GridError> {
    if center.len() != coordinates.ndim() {
        return Err(GridError::shape(format!(
            "Window centre has {} coordinates but the points have {} dimensions",
            center.len(),
            coordinates.ndim()
        )));
    }
    if center.iter().any(|c| !c.is_finite()) {
        return Err(GridError::argument(
            "center",
            format!("Invalid window centre {center:?}. Must be finite"),
        ));
    }
    if let Some(bad) = sizes.iter().find(|s| !s.is_finite() || **s <= 0.0) {
        return Err(GridError::argument(
            "sizes",
            format!("Invalid window size '{bad}'. Must be finite and positive"),
        ));
    }

    // Chebyshev distance from the centre decides membership for every size.
    let mut reach = vec![0.0f64; coordinates.len()];
    for (array, &c) in coordinates.arrays().iter().zip(center) {
        for (r, &x) in reach.iter_mut().zip(array) {
            let d = (x - c).abs();
            // NaN sticks, so the point fails every size test below.
            if d.is_nan() || d > *r {
                *r = d;
            }
        }
    }
    let windows: Vec<Vec<usize>> = sizes
        .iter()
        .map(|size| {
            let half = size / 2.0;
            reach
                .iter()
                .enumerate()
                .filter(|&(_, &r)| r <= half)
                .map(|(i, _)| i)
                .collect()
        })
        .collect();
    debug!(
        points = coordinates.len(),
        windows = windows.len(),
        ?center,
        "built expanding windows"
    );
    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridspan_test_utils::{assert_subset, lattice};

    #[test]
    fn windows_nest() {
        let c = lattice(10, 10);
        let windows = expanding_window(&c, &[4.5, 4.5], &[1.0, 3.0, 5.0, 9.0, 20.0]).unwrap();
        let counts: Vec<usize> = windows.iter().map(Vec::len).collect();
        assert_eq!(counts, vec![4, 16, 36, 100, 100]);
        for pair in windows.windows(2) {
            assert_subset(&pair[0], &pair[1]);
        }
    }

    #[test]
    fn box_not_ball() {
        // (1, 1) is outside the unit-radius ball but inside the box.
        let c = Coordinates::from_arrays(vec![vec![1.0], vec![1.0]]).unwrap();
        let windows = expanding_window(&c, &[0.0, 0.0], &[2.0]).unwrap();
        assert_eq!(windows, vec![vec![0]]);
    }

    #[test]
    fn errors() {
        let c = lattice(2, 2);
        assert!(matches!(
            expanding_window(&c, &[0.0], &[1.0]),
            Err(GridError::ShapeMismatch { .. })
        ));
        for bad in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                expanding_window(&c, &[0.0, 0.0], &[1.0, bad]),
                Err(GridError::InvalidArgument { name: "sizes", .. })
            ));
        }
    }

    #[test]
    fn nan_points_are_in_no_window() {
        let c = Coordinates::from_arrays(vec![vec![0.0, f64::NAN, 100.0], vec![0.0, 0.0, 0.0]])
            .unwrap();
        let windows = expanding_window(&c, &[0.0, 0.0], &[1.0, 1_000.0]).unwrap();
        assert_eq!(windows, vec![vec![0], vec![0, 2]]);

        // NaN in a later dimension must not be masked by an earlier reach.
        let c = Coordinates::from_arrays(vec![vec![0.5, 0.5], vec![0.0, f64::NAN]]).unwrap();
        let windows = expanding_window(&c, &[0.0, 0.0], &[10.0]).unwrap();
        assert_eq!(windows, vec![vec![0]]);
    }

    #[test]
    fn non_finite_centre_fails() {
        let c = lattice(2, 2);
        assert!(matches!(
            expanding_window(&c, &[0.0, f64::NAN], &[1.0]),
            Err(GridError::InvalidArgument { name: "center", .. })
        ));
    }

    #[test]
    fn no_sizes_no_windows() {
        let c = lattice(2, 2);
        assert!(expanding_window(&c, &[0.0, 0.0], &[]).unwrap().is_empty());
    }
}
