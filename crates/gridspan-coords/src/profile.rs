//! Points along a straight segment or a great-circle arc.
//!
//! Both generators reconcile the total path length like a 1-D domain
//! `[0, length]`, then map each distance back onto the path. Under
//! [`Adjust::Region`](gridspan_core::Adjust::Region) the path is extended
//! past both endpoints, so distances may be negative or exceed the length.

use gridspan_core::{Coordinates, GridError, SamplingOptions};
use tracing::debug;

use crate::line::{reconcile_axis, LineSpec};
use crate::spherical::{central_angle, cross, from_unit_vector, norm, to_unit_vector, wrap_180, wrap_360};

/// `sin` of the central angle below which two points count as coincident
/// or antipodal.
const DEGENERATE_SIN: f64 = 1e-12;

/// Points along a path and their distances from its beginning.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    /// Flat coordinates of the points, one array per dimension.
    pub coordinates: Coordinates,
    /// Distance of each point from the beginning of the path.
    pub distances: Vec<f64>,
}

fn reconcile_length(length: f64, options: &SamplingOptions) -> Result<LineSpec, GridError> {
    let step = options.resolve(1)?[0];
    reconcile_axis(0.0, length, step, options.adjust, options.pixel_register)
}

/// Evenly spaced points on the segment from `beginning` to `end`.
///
/// The size or spacing in `options` applies to the segment length.
///
/// # Errors
///
/// - `ShapeMismatch` if the points are empty or have different lengths.
/// - `InvalidDomain` if a coordinate is not finite.
/// - `DegenerateGeometry` if the points coincide.
///
/// # Examples
///
/// ```
/// use gridspan_coords::profile_coordinates;
/// use gridspan_core::SamplingOptions;
///
/// let profile = profile_coordinates(&[0.0, 0.0], &[3.0, 4.0], &SamplingOptions::default().size(6)).unwrap();
/// assert_eq!(profile.distances, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(profile.coordinates.point(5).as_slice(), &[3.0, 4.0]);
/// ```
pub fn profile_coordinates(
    beginning: &[f64],
    end: &[f64],
    options: &SamplingOptions,
) -> Result<Profile, GridError> {
    if beginning.len() != end.len() || beginning.is_empty() {
        return Err(GridError::shape(format!(
            "Beginning and end points of the profile must have the same number of coordinates \
             ({} != {})",
            beginning.len(),
            end.len()
        )));
    }
    if beginning.iter().chain(end).any(|v| !v.is_finite()) {
        return Err(GridError::domain(format!(
            "Invalid profile endpoints {beginning:?} and {end:?}. Coordinates must be finite"
        )));
    }
    let delta: Vec<f64> = beginning.iter().zip(end).map(|(b, e)| e - b).collect();
    let length = delta.iter().map(|d| d * d).sum::<f64>().sqrt();
    if length == 0.0 {
        return Err(GridError::degenerate(format!(
            "profile endpoints coincide at {beginning:?}"
        )));
    }

    let fit = reconcile_length(length, options)?;
    let distances = fit.values(options.pixel_register);
    // Land the last border on `end` exactly when the path was not extended.
    let pin_end = !options.pixel_register && fit.start == 0.0 && fit.stop == length;
    let arrays = beginning
        .iter()
        .zip(end)
        .zip(&delta)
        .map(|((&b, &e), &d)| {
            let mut array: Vec<f64> = distances.iter().map(|s| b + d * (s / length)).collect();
            if let (true, Some(last)) = (pin_end, array.last_mut()) {
                *last = e;
            }
            array
        })
        .collect();
    let coordinates = Coordinates::from_arrays(arrays)?;
    debug!(
        ndim = beginning.len(),
        length,
        count = distances.len(),
        spacing = fit.spacing,
        "generated profile coordinates"
    );
    Ok(Profile {
        coordinates,
        distances,
    })
}

/// Evenly spaced points on the minor great-circle arc between two
/// `(longitude, latitude)` points in degrees.
///
/// Size or spacing apply to the arc length on a sphere of `radius`, and
/// the returned distances are in the units of `radius`. Output
/// longitudes are in `[0, 360)` if either input longitude exceeds 180,
/// otherwise in `(-180, 180]`.
///
/// # Errors
///
/// - `ShapeMismatch` if either point does not have exactly two values.
/// - `InvalidDomain` if a coordinate is not finite or a latitude is
///   outside `[-90, 90]`.
/// - `InvalidArgument` if `radius` is not finite and positive.
/// - `DegenerateGeometry` if the points coincide or are antipodal.
///
/// # Examples
///
/// ```
/// use gridspan_coords::great_circle_coordinates;
/// use gridspan_core::SamplingOptions;
///
/// let arc = great_circle_coordinates(&[0.0, 0.0], &[90.0, 0.0], &SamplingOptions::default().size(4), 1.0)
///     .unwrap();
/// let longitude = arc.coordinates.array(0);
/// assert!((longitude[1] - 30.0).abs() < 1e-9);
/// assert!((arc.distances[3] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn great_circle_coordinates(
    beginning: &[f64],
    end: &[f64],
    options: &SamplingOptions,
    radius: f64,
) -> Result<Profile, GridError> {
    let (&[lon1, lat1], &[lon2, lat2]) = (beginning, end) else {
        return Err(GridError::shape(format!(
            "great-circle endpoints must be (longitude, latitude) pairs, got {} and {} values",
            beginning.len(),
            end.len()
        )));
    };
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GridError::argument(
            "radius",
            format!("must be finite and positive, got {radius}"),
        ));
    }
    for (lon, lat) in [(lon1, lat1), (lon2, lat2)] {
        if !lon.is_finite() || !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GridError::domain(format!(
                "Invalid great-circle endpoint ({lon}, {lat}). Latitude must be in [-90, 90]"
            )));
        }
    }

    let a = to_unit_vector(lon1, lat1);
    let b = to_unit_vector(lon2, lat2);
    let sin_omega = norm(cross(a, b));
    let omega = central_angle(a, b);
    if sin_omega <= DEGENERATE_SIN {
        let kind = if omega < std::f64::consts::FRAC_PI_2 {
            "coincide"
        } else {
            "are antipodal"
        };
        return Err(GridError::degenerate(format!(
            "great-circle endpoints ({lon1}, {lat1}) and ({lon2}, {lat2}) {kind}; \
             the arc between them is not unique"
        )));
    }

    let length = omega * radius;
    let fit = reconcile_length(length, options)?;
    let distances = fit.values(options.pixel_register);
    let wrap: fn(f64) -> f64 = if lon1 > 180.0 || lon2 > 180.0 {
        wrap_360
    } else {
        wrap_180
    };
    let (longitude, latitude): (Vec<f64>, Vec<f64>) = distances
        .iter()
        .map(|d| {
            let t = d / length;
            let wa = ((1.0 - t) * omega).sin() / sin_omega;
            let wb = (t * omega).sin() / sin_omega;
            let (lon, lat) = from_unit_vector([
                wa * a[0] + wb * b[0],
                wa * a[1] + wb * b[1],
                wa * a[2] + wb * b[2],
            ]);
            (wrap(lon), lat)
        })
        .unzip();
    debug!(
        angle_deg = omega.to_degrees(),
        length,
        count = distances.len(),
        "generated great-circle coordinates"
    );
    Ok(Profile {
        coordinates: Coordinates::from_arrays(vec![longitude, latitude])?,
        distances,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spherical::angular_distance;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use gridspan_core::Adjust;
    use std::f64::consts::PI;

    fn size(n: usize) -> SamplingOptions {
        SamplingOptions::default().size(n)
    }

    #[test]
    fn profile_in_three_dimensions() {
        let p = profile_coordinates(&[0.0, 0.0, 0.0], &[4.0, 0.0, 3.0], &size(6)).unwrap();
        assert_eq!(p.coordinates.ndim(), 3);
        assert_eq!(p.distances, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        for (i, point) in p.coordinates.points().enumerate() {
            let t = i as f64 / 5.0;
            assert_abs_diff_eq!(point[0], 4.0 * t, epsilon = 1e-12);
            assert_abs_diff_eq!(point[1], 0.0);
            assert_abs_diff_eq!(point[2], 3.0 * t, epsilon = 1e-12);
        }
    }

    #[test]
    fn profile_region_adjust_extends_past_endpoints() {
        let opts = SamplingOptions::default().spacing(2.6).adjust(Adjust::Region);
        let p = profile_coordinates(&[0.0, 1.0], &[10.0, 1.0], &opts).unwrap();
        assert_eq!(p.distances.len(), 5);
        assert_abs_diff_eq!(p.distances[0], -0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(p.coordinates.array(0)[0], -0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(p.coordinates.array(0)[4], 10.2, epsilon = 1e-12);
        assert!(p.coordinates.array(1).iter().all(|&y| y == 1.0));
    }

    #[test]
    fn profile_pixel_register() {
        let opts = SamplingOptions::default().size(3).pixel_register(true);
        let p = profile_coordinates(&[0.0], &[4.0], &opts).unwrap();
        assert_eq!(p.distances, vec![1.0, 3.0]);
        assert_eq!(p.coordinates.array(0), &[1.0, 3.0]);
    }

    #[test]
    fn profile_errors() {
        match profile_coordinates(&[0.0, 0.0], &[1.0], &size(3)) {
            Err(GridError::ShapeMismatch { reason }) => {
                assert!(reason.contains("same number of coordinates"))
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
        assert!(matches!(
            profile_coordinates(&[1.0, 2.0], &[1.0, 2.0], &size(3)),
            Err(GridError::DegenerateGeometry { .. })
        ));
        assert!(matches!(
            profile_coordinates(&[1.0, f64::NAN], &[1.0, 2.0], &size(3)),
            Err(GridError::InvalidDomain { .. })
        ));
    }

    #[test]
    fn great_circle_along_equator() {
        let arc = great_circle_coordinates(&[0.0, 0.0], &[90.0, 0.0], &size(4), 1.0).unwrap();
        let lon = arc.coordinates.array(0);
        let lat = arc.coordinates.array(1);
        for (i, expected) in [0.0, 30.0, 60.0, 90.0].into_iter().enumerate() {
            assert_abs_diff_eq!(lon[i], expected, epsilon = 1e-9);
            assert_abs_diff_eq!(lat[i], 0.0, epsilon = 1e-9);
            assert_relative_eq!(arc.distances[i], i as f64 * PI / 6.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn great_circle_along_meridian_with_spacing() {
        let radius = 6_371_000.0;
        let quarter = PI / 2.0 * radius;
        let opts = SamplingOptions::default().spacing(quarter / 3.0);
        let arc = great_circle_coordinates(&[10.0, -45.0], &[10.0, 45.0], &opts, radius).unwrap();
        let lat = arc.coordinates.array(1);
        assert_eq!(lat.len(), 4);
        for (i, expected) in [-45.0, -15.0, 15.0, 45.0].into_iter().enumerate() {
            assert_abs_diff_eq!(lat[i], expected, epsilon = 1e-9);
            assert_abs_diff_eq!(arc.coordinates.array(0)[i], 10.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn great_circle_points_are_evenly_spaced() {
        let arc = great_circle_coordinates(&[-30.0, 10.0], &[60.0, 50.0], &size(11), 1.0).unwrap();
        let points: Vec<(f64, f64)> = arc.coordinates.points().map(|p| (p[0], p[1])).collect();
        let step = angular_distance(points[0], points[1]);
        for pair in points.windows(2) {
            assert_abs_diff_eq!(angular_distance(pair[0], pair[1]), step, epsilon = 1e-9);
        }
        let total = angular_distance((-30.0, 10.0), (60.0, 50.0));
        assert_abs_diff_eq!(step * 10.0, total, epsilon = 1e-9);
    }

    #[test]
    fn great_circle_longitude_convention() {
        let arc = great_circle_coordinates(&[170.0, 0.0], &[190.0, 0.0], &size(3), 1.0).unwrap();
        let lon = arc.coordinates.array(0);
        assert_abs_diff_eq!(lon[0], 170.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lon[1], 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lon[2], 190.0, epsilon = 1e-9);

        let arc = great_circle_coordinates(&[170.0, 0.0], &[-170.0, 0.0], &size(3), 1.0).unwrap();
        let lon = arc.coordinates.array(0);
        assert_abs_diff_eq!(lon[2], -170.0, epsilon = 1e-9);
        assert!(lon[1].abs() > 179.999);
    }

    #[test]
    fn great_circle_coincident_points_fail() {
        match great_circle_coordinates(&[20.0, 30.0], &[20.0, 30.0], &size(5), 1.0) {
            Err(GridError::DegenerateGeometry { reason }) => assert!(reason.contains("coincide")),
            other => panic!("expected DegenerateGeometry, got {other:?}"),
        }
        // Same point written with a different longitude.
        assert!(matches!(
            great_circle_coordinates(&[-160.0, 10.0], &[200.0, 10.0], &size(5), 1.0),
            Err(GridError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn great_circle_antipodal_points_fail() {
        for (a, b) in [
            ([0.0, 0.0], [180.0, 0.0]),
            ([45.0, 30.0], [-135.0, -30.0]),
            ([0.0, 90.0], [0.0, -90.0]),
        ] {
            match great_circle_coordinates(&a, &b, &size(5), 1.0) {
                Err(GridError::DegenerateGeometry { reason }) => {
                    assert!(reason.contains("antipodal"))
                }
                other => panic!("expected DegenerateGeometry, got {other:?}"),
            }
        }
    }

    #[test]
    fn great_circle_argument_errors() {
        assert!(matches!(
            great_circle_coordinates(&[0.0, 0.0, 1.0], &[10.0, 0.0], &size(3), 1.0),
            Err(GridError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            great_circle_coordinates(&[0.0, 0.0], &[10.0, 0.0], &size(3), 0.0),
            Err(GridError::InvalidArgument { name: "radius", .. })
        ));
        assert!(matches!(
            great_circle_coordinates(&[0.0, 0.0], &[10.0, 91.0], &size(3), 1.0),
            Err(GridError::InvalidDomain { .. })
        ));
    }
}
